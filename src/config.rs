//! Backend configuration passed explicitly to the planner.

use std::{fmt, time::Duration};

use crate::error::{PlannerError, Result};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const MODEL_ENV: &str = "GEMINI_MODEL";
pub const BASE_URL_ENV: &str = "GEMINI_BASE_URL";
pub const TIMEOUT_ENV: &str = "TRIP_PLANNER_TIMEOUT_SECS";
pub const DEMO_ENV: &str = "TRIP_PLANNER_DEMO";

/// Text generation provider. Gemini is the only one supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Provider {
    #[default]
    Gemini,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Gemini => "gemini",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the configured provider can be called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderStatus {
    Available,
    NoApiKey,
}

impl ProviderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderStatus::Available => "available",
            ProviderStatus::NoApiKey => "no_api_key",
        }
    }
}

/// Immutable settings for the text generation backend.
#[derive(Clone)]
pub struct PlannerConfig {
    provider: Provider,
    api_key: Option<String>,
    model: String,
    base_url: String,
    timeout: Duration,
    demo_fallback: bool,
}

impl PlannerConfig {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            provider: Provider::Gemini,
            api_key: api_key
                .map(|key| key.trim().to_string())
                .filter(|key| !key.is_empty()),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            demo_fallback: false,
        }
    }

    /// Read settings from the process environment.
    ///
    /// A missing API key is not an error here; it surfaces when the backend is called.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::new(std::env::var(API_KEY_ENV).ok());

        if let Ok(model) = std::env::var(MODEL_ENV) {
            if !model.trim().is_empty() {
                config.model = model.trim().to_string();
            }
        }

        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            if !base_url.trim().is_empty() {
                config.base_url = base_url.trim().to_string();
            }
        }

        if let Ok(timeout) = std::env::var(TIMEOUT_ENV) {
            let seconds = timeout.trim().parse::<u64>().map_err(|err| {
                PlannerError::Config(format!("{TIMEOUT_ENV} must be a whole number of seconds: {err}"))
            })?;
            config.timeout = Duration::from_secs(seconds);
        }

        if let Ok(demo) = std::env::var(DEMO_ENV) {
            config.demo_fallback = parse_flag(&demo);
        }

        Ok(config)
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let key = api_key.into().trim().to_string();
        self.api_key = (!key.is_empty()).then_some(key);
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Serve the built-in sample itinerary when no API key is configured.
    pub fn with_demo_fallback(mut self, demo_fallback: bool) -> Self {
        self.demo_fallback = demo_fallback;
        self
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    /// The configured API key, or [`PlannerError::MissingApiKey`].
    pub fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or(PlannerError::MissingApiKey)
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn demo_fallback(&self) -> bool {
        self.demo_fallback
    }

    pub fn provider_status(&self) -> ProviderStatus {
        if self.has_api_key() {
            ProviderStatus::Available
        } else {
            ProviderStatus::NoApiKey
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self::new(None)
    }
}

impl fmt::Debug for PlannerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlannerConfig")
            .field("provider", &self.provider)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("demo_fallback", &self.demo_fallback)
            .finish()
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
