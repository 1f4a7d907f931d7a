use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::{
    config::PlannerConfig,
    core::generator::{sample_response, TextGenerator},
    error::{PlannerError, Result},
};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini `generateContent` client.
#[derive(Clone, Debug)]
pub struct GeminiClient {
    config: PlannerConfig,
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: PlannerConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|err| PlannerError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    async fn call_gemini(&self, prompt: &str, api_key: &str) -> Result<String> {
        let url = build_generate_url(self.config.base_url(), self.config.model());
        let body = generate_content_body(prompt);

        debug!(
            target: "trip_planner::backend",
            model = self.config.model(),
            prompt_len = prompt.len(),
            "sending generateContent request"
        );

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let headers = response.headers().clone();
        let response_text = response.text().await?;

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = headers
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(PlannerError::RateLimit {
                retry_after: retry_after.max(1),
            });
        }

        let response_json: Value = serde_json::from_str(&response_text).map_err(|err| {
            PlannerError::Backend(format!("HTTP {status}: response is not JSON: {err}"))
        })?;

        if !status.is_success() {
            let api_message = api_error_message(&response_json).unwrap_or(response_text);
            return Err(PlannerError::Backend(format!(
                "HTTP {} error: {}",
                status, api_message
            )));
        }

        if let Some(message) = api_error_message(&response_json) {
            return Err(PlannerError::Backend(format!("API error: {}", message)));
        }

        extract_candidate_text(&response_json)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    fn name(&self) -> &str {
        self.config.provider().as_str()
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let api_key = match self.config.api_key() {
            Ok(key) => key,
            Err(PlannerError::MissingApiKey) if self.config.demo_fallback() => {
                warn!(
                    target: "trip_planner::backend",
                    "Gemini API key not set, using sample itinerary"
                );
                return Ok(sample_response());
            }
            Err(err) => return Err(err),
        };

        self.call_gemini(prompt, api_key).await
    }
}

fn build_generate_url(base_url: &str, model: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    if trimmed.ends_with(":generateContent") {
        trimmed.to_string()
    } else {
        format!("{}/models/{}:generateContent", trimmed, model)
    }
}

fn api_error_message(response: &Value) -> Option<String> {
    let error = response.get("error")?;
    Some(
        error
            .get("message")
            .and_then(|value| value.as_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| error.to_string()),
    )
}

fn extract_candidate_text(response: &Value) -> Result<String> {
    let parts = response
        .get("candidates")
        .and_then(|candidates| candidates.get(0))
        .and_then(|candidate| candidate.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(|parts| parts.as_array());

    let text: String = parts
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part.get("text").and_then(|text| text.as_str()))
                .collect()
        })
        .unwrap_or_default();

    if text.is_empty() {
        let reason = response
            .get("promptFeedback")
            .and_then(|feedback| feedback.get("blockReason"))
            .and_then(|reason| reason.as_str())
            .unwrap_or("no candidate text");
        return Err(PlannerError::Backend(format!(
            "Gemini returned no text: {}",
            reason
        )));
    }

    Ok(text)
}

fn generate_content_body(prompt: &str) -> Value {
    json!({
        "contents": [
            {
                "role": "user",
                "parts": [{ "text": prompt }]
            }
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_generate_url() {
        assert_eq!(
            build_generate_url("https://example.com/v1beta/", "gemini-2.0-flash"),
            "https://example.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
        assert_eq!(
            build_generate_url(
                "https://example.com/v1beta/models/custom:generateContent",
                "ignored"
            ),
            "https://example.com/v1beta/models/custom:generateContent"
        );
    }

    #[test]
    fn test_request_body() {
        let body = generate_content_body("Plan a trip");
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Plan a trip");
    }

    #[test]
    fn test_extract_candidate_text_joins_parts() {
        let response = json!({
            "candidates": [
                {"content": {"parts": [{"text": "{\"itinerary\": "}, {"text": "[]}"}]}}
            ]
        });
        assert_eq!(
            extract_candidate_text(&response).unwrap(),
            "{\"itinerary\": []}"
        );
    }

    #[test]
    fn test_extract_candidate_text_blocked() {
        let response = json!({"promptFeedback": {"blockReason": "SAFETY"}});
        let err = extract_candidate_text(&response).unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[tokio::test]
    async fn test_missing_key_without_demo() {
        let client = GeminiClient::new(PlannerConfig::default()).unwrap();
        let err = client.generate("prompt").await.unwrap_err();
        assert!(matches!(err, PlannerError::MissingApiKey));
    }

    #[tokio::test]
    async fn test_missing_key_with_demo_fallback() {
        let config = PlannerConfig::default().with_demo_fallback(true);
        let client = GeminiClient::new(config).unwrap();
        let raw = client.generate("prompt").await.unwrap();
        assert_eq!(raw, sample_response());
    }
}
