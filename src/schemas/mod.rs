pub mod validation;

pub use validation::{is_valid_itinerary, itinerary_schema, itinerary_violations};
