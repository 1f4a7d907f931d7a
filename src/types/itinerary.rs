use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::{PlannerError, Result},
    schemas::validation::is_valid_itinerary,
    services::budget,
};

pub(crate) const FALLBACK_ACTIVITY: &str = "AI response parsing failed - please try again";
pub(crate) const FALLBACK_NOTES: &str =
    "There was an issue processing the AI response. Please check your configuration.";
pub(crate) const FALLBACK_SUMMARY: &str =
    "Unable to parse AI response. Please check your API configuration and try again.";

/// Per-day itinerary details with activities and budget estimates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    /// 1-based day counter within the itinerary
    pub day: u32,
    /// Activities or attractions for the day in chronological order
    pub activities: Vec<String>,
    /// Estimated total spend for the day in the request currency
    pub cost: f64,
    /// How to get around on this day (metro, bus, walking, ...)
    pub transport: String,
    /// Safety notes and practical tips
    pub notes: String,
}

/// Day-by-day plan exactly as the backend returned it.
///
/// The payload is untrusted: nothing about its shape is guaranteed until
/// [`Itinerary::is_valid`] says so.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Itinerary(Value);

impl Itinerary {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Single-day placeholder used when a backend reply cannot be parsed.
    pub fn fallback() -> Self {
        Self(json!([
            {
                "day": 1,
                "activities": [FALLBACK_ACTIVITY],
                "cost": 0,
                "transport": "N/A",
                "notes": FALLBACK_NOTES
            }
        ]))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Number of entries, or 0 when the payload is not a sequence.
    pub fn len(&self) -> usize {
        self.0.as_array().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_valid(&self) -> bool {
        is_valid_itinerary(&self.0)
    }

    pub fn total_cost(&self) -> f64 {
        budget::total_cost(self)
    }

    /// Decode into typed day plans, reporting the JSON path of the first mismatch.
    pub fn day_plans(&self) -> Result<Vec<DayPlan>> {
        serde_path_to_error::deserialize(&self.0).map_err(|err| {
            let path = err.path().to_string();
            let location = if path.is_empty() || path == "." {
                "<root>".to_string()
            } else {
                path
            };
            PlannerError::Validation(format!(
                "failed to decode itinerary at {}: {}",
                location,
                err.inner()
            ))
        })
    }
}

impl From<Value> for Itinerary {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<Vec<DayPlan>> for Itinerary {
    fn from(days: Vec<DayPlan>) -> Self {
        Self(json!(days))
    }
}

/// Returned in place of an itinerary when generation fails irrecoverably.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// What went wrong
    pub error: String,
    /// What the user can do about it
    pub suggestion: String,
}

impl ErrorRecord {
    pub fn new(error: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            suggestion: suggestion.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_shape() {
        let fallback = Itinerary::fallback();
        assert!(fallback.is_valid());
        assert_eq!(fallback.len(), 1);

        let days = fallback.day_plans().unwrap();
        assert_eq!(days[0].day, 1);
        assert_eq!(days[0].cost, 0.0);
        assert_eq!(days[0].transport, "N/A");
        assert_eq!(days[0].activities, vec![FALLBACK_ACTIVITY.to_string()]);
    }

    #[test]
    fn test_day_plans_reports_path() {
        let itinerary = Itinerary::new(json!([
            {"day": 1, "activities": ["Walk"], "cost": 10, "transport": "bus", "notes": ""},
            {"day": 2, "activities": ["Museum"], "cost": "cheap", "transport": "bus", "notes": ""}
        ]));

        let err = itinerary.day_plans().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("[1].cost"), "unexpected message: {message}");
    }

    #[test]
    fn test_len_of_non_sequence() {
        let itinerary = Itinerary::new(json!({"day": 1}));
        assert_eq!(itinerary.len(), 0);
        assert!(itinerary.is_empty());
        assert!(!itinerary.is_valid());
    }

    #[test]
    fn test_from_day_plans() {
        let itinerary = Itinerary::from(vec![DayPlan {
            day: 1,
            activities: vec!["Louvre".to_string()],
            cost: 17.5,
            transport: "metro".to_string(),
            notes: "Free for EU students".to_string(),
        }]);
        assert!(itinerary.is_valid());
        assert_eq!(itinerary.total_cost(), 17.5);
    }
}
