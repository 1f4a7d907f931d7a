pub mod generator;
pub mod planner;

pub use crate::services::interpreter::{parse_response, ParseStrategy, ParsedResponse};
pub use crate::services::prompt::build_prompt;
pub use generator::{sample_response, SampleGenerator, TextGenerator};
pub use planner::TripPlanner;
