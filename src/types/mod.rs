pub mod itinerary;
pub mod result;
pub mod trip;

pub use itinerary::{DayPlan, ErrorRecord, Itinerary};
pub use result::{PlanOutcome, TripExport};
pub use trip::{TripRequest, DEFAULT_CURRENCY};
