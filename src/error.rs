use thiserror::Error;

/// Main error type for the trip planner
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Destination cannot be empty")]
    EmptyDestination,

    #[error("Duration must be a positive number of days, got {0}")]
    NonPositiveDuration(i64),

    #[error("Duration of {0} days is too long")]
    DurationTooLong(i64),

    #[error("Budget must be a positive number, got {0}")]
    NonPositiveBudget(f64),

    #[error("At least one interest must be selected")]
    NoInterests,

    #[error("Gemini API key not set. Set GEMINI_API_KEY or pass --api-key")]
    MissingApiKey,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Rate limit exceeded: retry after {retry_after}s")]
    RateLimit { retry_after: u64 },

    #[error("Timeout error: {0}")]
    Timeout(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, PlannerError>;

impl PlannerError {
    /// Whether the error comes from a malformed trip request.
    pub fn is_invalid_request(&self) -> bool {
        matches!(
            self,
            PlannerError::EmptyDestination
                | PlannerError::NonPositiveDuration(_)
                | PlannerError::DurationTooLong(_)
                | PlannerError::NonPositiveBudget(_)
                | PlannerError::NoInterests
        )
    }

    /// Check if re-running the whole pipeline could succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PlannerError::Http(_) | PlannerError::RateLimit { .. } | PlannerError::Timeout(_)
        )
    }

    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            PlannerError::EmptyDestination
            | PlannerError::NonPositiveDuration(_)
            | PlannerError::DurationTooLong(_)
            | PlannerError::NonPositiveBudget(_)
            | PlannerError::NoInterests => "INVALID_REQUEST",
            PlannerError::MissingApiKey => "MISSING_API_KEY",
            PlannerError::Config(_) => "CONFIG_ERROR",
            PlannerError::Http(_) => "HTTP_ERROR",
            PlannerError::Backend(_) => "BACKEND_ERROR",
            PlannerError::RateLimit { .. } => "RATE_LIMIT_ERROR",
            PlannerError::Timeout(_) => "TIMEOUT_ERROR",
            PlannerError::Serialization(_) => "SERIALIZATION_ERROR",
            PlannerError::Validation(_) => "VALIDATION_ERROR",
        }
    }

    /// Convert to a structured error payload
    pub fn to_error_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
                "retryable": self.is_retryable()
            }
        })
    }
}

impl From<reqwest::Error> for PlannerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PlannerError::Timeout(err.to_string())
        } else {
            PlannerError::Http(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_request_classification() {
        assert!(PlannerError::EmptyDestination.is_invalid_request());
        assert!(PlannerError::NonPositiveDuration(0).is_invalid_request());
        assert!(PlannerError::NonPositiveBudget(-10.0).is_invalid_request());
        assert!(PlannerError::NoInterests.is_invalid_request());
        assert!(PlannerError::DurationTooLong(5_000_000_000).is_invalid_request());
        assert!(!PlannerError::MissingApiKey.is_invalid_request());
        assert!(!PlannerError::Backend("boom".to_string()).is_invalid_request());
    }

    #[test]
    fn test_error_payload() {
        let payload = PlannerError::RateLimit { retry_after: 3 }.to_error_payload();
        assert_eq!(payload["error"]["code"], "RATE_LIMIT_ERROR");
        assert_eq!(payload["error"]["retryable"], true);

        let payload = PlannerError::NoInterests.to_error_payload();
        assert_eq!(payload["error"]["code"], "INVALID_REQUEST");
        assert_eq!(payload["error"]["retryable"], false);

        let payload = PlannerError::DurationTooLong(5_000_000_000).to_error_payload();
        assert_eq!(payload["error"]["code"], "INVALID_REQUEST");
    }
}
