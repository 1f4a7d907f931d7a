//! student-trip-planner: budget-friendly student itineraries from a text generation backend
//!
//! A [`TripRequest`] is rendered into a prompt, sent to Gemini (or any other
//! [`TextGenerator`]), and the reply is interpreted into an [`Itinerary`] plus a
//! summary. Replies that are not clean JSON are recovered where possible and
//! replaced by a placeholder plan otherwise, so planning never fails once the
//! request itself is valid.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use student_trip_planner::{PlanOutcome, PlannerConfig, TripPlanner, TripRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PlannerConfig::from_env()?.with_demo_fallback(true);
//!     let planner = TripPlanner::from_config(config)?;
//!
//!     let request = TripRequest::new(
//!         "Paris",
//!         3,
//!         200.0,
//!         ["history", "food"],
//!         "metro",
//!         "hostel",
//!         "USD",
//!     )?;
//!
//!     match planner.plan_trip(&request).await? {
//!         PlanOutcome::Planned { itinerary, summary } => {
//!             println!("{summary}\nTotal: {}", itinerary.total_cost());
//!         }
//!         PlanOutcome::Failed { record, .. } => eprintln!("{}", record.error),
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod schemas;
pub mod services;
pub mod types;

pub use config::{PlannerConfig, Provider, ProviderStatus};
pub use self::core::{
    build_prompt, parse_response, sample_response, ParseStrategy, ParsedResponse,
    SampleGenerator, TextGenerator, TripPlanner,
};
pub use error::{PlannerError, Result};
pub use schemas::validation::is_valid_itinerary;
pub use services::budget::{average_daily_cost, remaining_budget, total_cost, CostSummary};
pub use services::gemini_client::GeminiClient;
pub use types::{DayPlan, ErrorRecord, Itinerary, PlanOutcome, TripExport, TripRequest};

#[cfg(feature = "cli")]
pub mod cli;
