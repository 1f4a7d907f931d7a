use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::{
    config::PlannerConfig,
    core::generator::TextGenerator,
    error::{PlannerError, Result},
    services::{gemini_client::GeminiClient, interpreter::parse_response, prompt::build_prompt},
    types::{ErrorRecord, PlanOutcome, TripRequest},
};

const BACKEND_SUGGESTION: &str = "Please check your API key configuration or try again later.";

/// Turns trip requests into itineraries using a text generation backend.
#[derive(Debug, Clone)]
pub struct TripPlanner {
    generator: Arc<dyn TextGenerator>,
    strict_credentials: bool,
}

impl TripPlanner {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            strict_credentials: false,
        }
    }

    /// Planner backed by Gemini with the given settings.
    pub fn from_config(config: PlannerConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(GeminiClient::new(config)?)))
    }

    pub fn from_env() -> Result<Self> {
        Self::from_config(PlannerConfig::from_env()?)
    }

    /// Return [`PlannerError::MissingApiKey`] instead of a failed outcome.
    pub fn with_strict_credentials(mut self, strict: bool) -> Self {
        self.strict_credentials = strict;
        self
    }

    pub fn generator(&self) -> &dyn TextGenerator {
        self.generator.as_ref()
    }

    /// Generate an itinerary for `request`.
    ///
    /// Backend failures are folded into [`PlanOutcome::Failed`]; unparseable
    /// replies yield the placeholder plan. The only error returned is a
    /// missing API key when strict credentials are enabled.
    pub async fn plan_trip(&self, request: &TripRequest) -> Result<PlanOutcome> {
        info!(
            target: "trip_planner::planner",
            destination = request.destination(),
            days = request.duration_days(),
            budget = request.budget(),
            currency = request.currency(),
            backend = self.generator.name(),
            "planning trip"
        );

        let prompt = build_prompt(request);
        let raw = match self.generator.generate(&prompt).await {
            Ok(raw) => raw,
            Err(PlannerError::MissingApiKey) if self.strict_credentials => {
                return Err(PlannerError::MissingApiKey);
            }
            Err(err) => {
                warn!(
                    target: "trip_planner::planner",
                    code = err.error_code(),
                    error = %err,
                    "backend call failed"
                );
                return Ok(failed_outcome(&err));
            }
        };

        let parsed = parse_response(&raw);
        debug!(
            target: "trip_planner::planner",
            strategy = ?parsed.strategy(),
            days = parsed.itinerary.len(),
            valid = parsed.itinerary.is_valid(),
            "interpreted backend response"
        );

        let (itinerary, summary) = parsed.into_parts();
        let summary = if summary.trim().is_empty() {
            format!(
                "{}-day trip to {}.",
                request.duration_days(),
                request.destination()
            )
        } else {
            summary
        };

        Ok(PlanOutcome::Planned { itinerary, summary })
    }
}

fn failed_outcome(err: &PlannerError) -> PlanOutcome {
    let message = err.to_string();
    PlanOutcome::Failed {
        summary: format!(
            "Unable to generate itinerary: {}. Please check your configuration and try again.",
            message
        ),
        record: ErrorRecord::new(message, BACKEND_SUGGESTION),
    }
}
