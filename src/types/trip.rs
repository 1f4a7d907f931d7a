use serde::Serialize;

use crate::error::{PlannerError, Result};

/// Currency used when the caller does not pick one.
pub const DEFAULT_CURRENCY: &str = "USD";

/// A validated request for a student trip itinerary.
///
/// Instances can only be obtained through [`TripRequest::new`], so every
/// request handed to the planner already satisfies the field invariants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRequest {
    destination: String,
    duration_days: u32,
    budget: f64,
    interests: Vec<String>,
    transport: String,
    stay: String,
    currency: String,
}

impl TripRequest {
    /// Validate and build a request.
    ///
    /// Interests are trimmed, blank tags are dropped and duplicates are
    /// removed while keeping the first occurrence. An empty currency falls
    /// back to [`DEFAULT_CURRENCY`].
    pub fn new<I, S>(
        destination: impl Into<String>,
        duration_days: i64,
        budget: f64,
        interests: I,
        transport: impl Into<String>,
        stay: impl Into<String>,
        currency: impl Into<String>,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let destination = destination.into().trim().to_string();
        if destination.is_empty() {
            return Err(PlannerError::EmptyDestination);
        }

        if duration_days <= 0 {
            return Err(PlannerError::NonPositiveDuration(duration_days));
        }
        let duration_days = u32::try_from(duration_days)
            .map_err(|_| PlannerError::DurationTooLong(duration_days))?;

        if !budget.is_finite() || budget <= 0.0 {
            return Err(PlannerError::NonPositiveBudget(budget));
        }

        let mut tags: Vec<String> = Vec::new();
        for interest in interests {
            let interest = interest.into().trim().to_string();
            if !interest.is_empty() && !tags.contains(&interest) {
                tags.push(interest);
            }
        }
        if tags.is_empty() {
            return Err(PlannerError::NoInterests);
        }

        let currency = currency.into().trim().to_string();
        let currency = if currency.is_empty() {
            DEFAULT_CURRENCY.to_string()
        } else {
            currency
        };

        Ok(Self {
            destination,
            duration_days,
            budget,
            interests: tags,
            transport: transport.into().trim().to_string(),
            stay: stay.into().trim().to_string(),
            currency,
        })
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn duration_days(&self) -> u32 {
        self.duration_days
    }

    pub fn budget(&self) -> f64 {
        self.budget
    }

    pub fn interests(&self) -> &[String] {
        &self.interests
    }

    pub fn transport(&self) -> &str {
        &self.transport
    }

    pub fn stay(&self) -> &str {
        &self.stay
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(
        destination: &str,
        duration: i64,
        budget: f64,
        interests: &[&str],
    ) -> Result<TripRequest> {
        TripRequest::new(
            destination,
            duration,
            budget,
            interests.iter().copied(),
            "metro",
            "hostel",
            "USD",
        )
    }

    #[test]
    fn test_valid_request() {
        let req = request("  Paris ", 3, 200.0, &["food", "history"]).unwrap();
        assert_eq!(req.destination(), "Paris");
        assert_eq!(req.duration_days(), 3);
        assert_eq!(req.budget(), 200.0);
        assert_eq!(req.interests(), ["food", "history"]);
        assert_eq!(req.currency(), "USD");
    }

    #[test]
    fn test_duration_beyond_u32_is_invalid_request() {
        let err = request("Paris", 5_000_000_000, 200.0, &["food"]).unwrap_err();
        assert!(matches!(err, PlannerError::DurationTooLong(5_000_000_000)));
        assert!(err.is_invalid_request());
        assert_eq!(err.error_code(), "INVALID_REQUEST");
    }

    #[test]
    fn test_empty_destination() {
        assert!(matches!(
            request("", 3, 200.0, &["food"]),
            Err(PlannerError::EmptyDestination)
        ));
        assert!(matches!(
            request("   ", 3, 200.0, &["food"]),
            Err(PlannerError::EmptyDestination)
        ));
    }

    #[test]
    fn test_non_positive_duration() {
        assert!(matches!(
            request("Paris", 0, 200.0, &["food"]),
            Err(PlannerError::NonPositiveDuration(0))
        ));
        assert!(matches!(
            request("Paris", -2, 200.0, &["food"]),
            Err(PlannerError::NonPositiveDuration(-2))
        ));
    }

    #[test]
    fn test_non_positive_budget() {
        assert!(matches!(
            request("Paris", 3, -10.0, &["food"]),
            Err(PlannerError::NonPositiveBudget(_))
        ));
        assert!(matches!(
            request("Paris", 3, 0.0, &["food"]),
            Err(PlannerError::NonPositiveBudget(_))
        ));
        assert!(matches!(
            request("Paris", 3, f64::NAN, &["food"]),
            Err(PlannerError::NonPositiveBudget(_))
        ));
    }

    #[test]
    fn test_empty_interests() {
        assert!(matches!(
            request("Paris", 3, 200.0, &[]),
            Err(PlannerError::NoInterests)
        ));
        assert!(matches!(
            request("Paris", 3, 200.0, &["  ", ""]),
            Err(PlannerError::NoInterests)
        ));
    }

    #[test]
    fn test_interests_deduplicated_in_order() {
        let req = request("Rome", 2, 150.0, &["art", " food", "art", "food"]).unwrap();
        assert_eq!(req.interests(), ["art", "food"]);
    }

    #[test]
    fn test_blank_currency_defaults() {
        let req = TripRequest::new("Tokyo", 4, 50_000.0, ["food"], "train", "hostel", " ").unwrap();
        assert_eq!(req.currency(), DEFAULT_CURRENCY);
    }
}
