use serde::{Deserialize, Serialize};

use super::{ErrorRecord, Itinerary, TripRequest};
use crate::error::Result;

/// Result of a planning run. Both variants carry a non-empty summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PlanOutcome {
    /// The backend answered and its reply was interpreted
    Planned {
        itinerary: Itinerary,
        summary: String,
    },
    /// The backend could not be reached or refused the request
    Failed {
        #[serde(flatten)]
        record: ErrorRecord,
        summary: String,
    },
}

impl PlanOutcome {
    pub fn summary(&self) -> &str {
        match self {
            PlanOutcome::Planned { summary, .. } | PlanOutcome::Failed { summary, .. } => summary,
        }
    }

    pub fn itinerary(&self) -> Option<&Itinerary> {
        match self {
            PlanOutcome::Planned { itinerary, .. } => Some(itinerary),
            PlanOutcome::Failed { .. } => None,
        }
    }

    pub fn error_record(&self) -> Option<&ErrorRecord> {
        match self {
            PlanOutcome::Planned { .. } => None,
            PlanOutcome::Failed { record, .. } => Some(record),
        }
    }

    pub fn is_planned(&self) -> bool {
        matches!(self, PlanOutcome::Planned { .. })
    }

    /// Build the downloadable document for a planned trip.
    pub fn export(&self, request: &TripRequest) -> Option<TripExport> {
        let itinerary = self.itinerary()?;
        Some(TripExport::new(
            request.destination(),
            request.currency(),
            self.summary(),
            itinerary.clone(),
        ))
    }
}

/// JSON document offered to the user for download.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripExport {
    pub destination: String,
    pub currency: String,
    pub summary: String,
    pub total_cost: f64,
    pub itinerary: Itinerary,
}

impl TripExport {
    pub fn new(
        destination: impl Into<String>,
        currency: impl Into<String>,
        summary: impl Into<String>,
        itinerary: Itinerary,
    ) -> Self {
        Self {
            destination: destination.into(),
            currency: currency.into(),
            summary: summary.into(),
            total_cost: itinerary.total_cost(),
            itinerary,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Suggested file name, e.g. `travel_itinerary_new_york.json`.
    pub fn file_name(&self) -> String {
        format!(
            "travel_itinerary_{}.json",
            self.destination.replace(' ', "_").to_lowercase()
        )
    }
}
