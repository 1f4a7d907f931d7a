use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::types::{itinerary::FALLBACK_SUMMARY, Itinerary};

const ITINERARY_KEY: &str = "itinerary";
const SUMMARY_KEY: &str = "summary";

/// Itinerary and summary recovered from a backend reply.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedResponse {
    pub itinerary: Itinerary,
    pub summary: String,
    strategy: ParseStrategy,
}

/// Which step of the pipeline produced a [`ParsedResponse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStrategy {
    /// The whole reply was a JSON document
    Direct,
    /// A JSON object was cut out of surrounding prose
    Embedded,
    /// Nothing usable was found; a placeholder plan was synthesized
    Fallback,
}

impl ParsedResponse {
    pub fn strategy(&self) -> ParseStrategy {
        self.strategy
    }

    pub fn is_fallback(&self) -> bool {
        self.strategy == ParseStrategy::Fallback
    }

    pub fn into_parts(self) -> (Itinerary, String) {
        (self.itinerary, self.summary)
    }

    fn fallback() -> Self {
        Self {
            itinerary: Itinerary::fallback(),
            summary: FALLBACK_SUMMARY.to_string(),
            strategy: ParseStrategy::Fallback,
        }
    }
}

type Attempt = fn(&str) -> Option<ParsedResponse>;

const ATTEMPTS: [Attempt; 2] = [parse_direct, parse_embedded];

/// Convert a raw backend reply into an itinerary and summary.
///
/// Attempts run in order and the first success wins. If neither the whole
/// text nor the span between the first `{` and the last `}` is a JSON object
/// with both `itinerary` and `summary`, a single-day placeholder plan is
/// returned. No structural validation of the itinerary happens here.
pub fn parse_response(raw: &str) -> ParsedResponse {
    ATTEMPTS
        .iter()
        .find_map(|attempt| attempt(raw))
        .unwrap_or_else(|| {
            warn!(
                target: "trip_planner::interpreter",
                response_len = raw.len(),
                "no itinerary found in backend response, using fallback plan"
            );
            ParsedResponse::fallback()
        })
}

fn parse_direct(raw: &str) -> Option<ParsedResponse> {
    let value = parse_json(raw, ParseStrategy::Direct)?;
    extract(value, ParseStrategy::Direct)
}

fn parse_embedded(raw: &str) -> Option<ParsedResponse> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end <= start {
        debug!(target: "trip_planner::interpreter", "no JSON object span in response");
        return None;
    }

    let value = parse_json(&raw[start..=end], ParseStrategy::Embedded)?;
    extract(value, ParseStrategy::Embedded)
}

fn parse_json(text: &str, strategy: ParseStrategy) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(object)) => Some(object),
        Ok(other) => {
            debug!(
                target: "trip_planner::interpreter",
                ?strategy,
                kind = json_kind(&other),
                "response JSON is not an object"
            );
            None
        }
        Err(err) => {
            debug!(
                target: "trip_planner::interpreter",
                ?strategy,
                error = %err,
                "response is not valid JSON"
            );
            None
        }
    }
}

fn extract(mut object: Map<String, Value>, strategy: ParseStrategy) -> Option<ParsedResponse> {
    if !object.contains_key(ITINERARY_KEY) || !object.contains_key(SUMMARY_KEY) {
        debug!(
            target: "trip_planner::interpreter",
            ?strategy,
            "response JSON lacks `itinerary` or `summary`"
        );
        return None;
    }

    let itinerary = object.remove(ITINERARY_KEY)?;
    let summary = match object.remove(SUMMARY_KEY)? {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    };

    debug!(target: "trip_planner::interpreter", ?strategy, "parsed backend response");
    Some(ParsedResponse {
        itinerary: Itinerary::new(itinerary),
        summary,
        strategy,
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::itinerary::FALLBACK_ACTIVITY;
    use serde_json::json;

    fn payload() -> Value {
        json!({
            "itinerary": [
                {
                    "day": 1,
                    "activities": ["Visit the Eiffel Tower", "Explore Montmartre"],
                    "cost": 45,
                    "transport": "metro",
                    "notes": "Student ID required for discounts."
                }
            ],
            "summary": "A short student trip to Paris."
        })
    }

    fn assert_fallback(parsed: &ParsedResponse) {
        assert!(parsed.is_fallback());
        assert_eq!(parsed.summary, FALLBACK_SUMMARY);
        let days = parsed.itinerary.day_plans().unwrap();
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].day, 1);
        assert_eq!(days[0].cost, 0.0);
        assert_eq!(days[0].transport, "N/A");
        assert_eq!(days[0].activities, vec![FALLBACK_ACTIVITY.to_string()]);
    }

    #[test]
    fn test_direct_parse_returns_values_unchanged() {
        let raw = serde_json::to_string_pretty(&payload()).unwrap();
        let parsed = parse_response(&raw);

        assert_eq!(parsed.strategy(), ParseStrategy::Direct);
        assert_eq!(parsed.itinerary.as_value(), &payload()["itinerary"]);
        assert_eq!(parsed.summary, "A short student trip to Paris.");
    }

    #[test]
    fn test_direct_parse_skips_validation() {
        let raw = r#"{"itinerary": "not a list", "summary": "odd"}"#;
        let parsed = parse_response(raw);

        assert_eq!(parsed.strategy(), ParseStrategy::Direct);
        assert_eq!(parsed.itinerary.as_value(), &json!("not a list"));
        assert!(!parsed.itinerary.is_valid());
    }

    #[test]
    fn test_embedded_json_in_prose() {
        let embedded = payload().to_string();
        let raw = format!("Here is your plan: {embedded} Enjoy!");
        let parsed = parse_response(&raw);
        let direct = parse_response(&embedded);

        assert_eq!(parsed.strategy(), ParseStrategy::Embedded);
        assert_eq!(parsed.itinerary, direct.itinerary);
        assert_eq!(parsed.summary, direct.summary);
    }

    #[test]
    fn test_markdown_fenced_json() {
        let raw = format!("```json\n{}\n```", payload());
        let parsed = parse_response(&raw);

        assert_eq!(parsed.strategy(), ParseStrategy::Embedded);
        assert_eq!(parsed.itinerary.as_value(), &payload()["itinerary"]);
    }

    #[test]
    fn test_missing_key_falls_through() {
        let raw = r#"{"itinerary": []}"#;
        assert_fallback(&parse_response(raw));

        let raw = r#"{"summary": "only a summary"}"#;
        assert_fallback(&parse_response(raw));
    }

    #[test]
    fn test_nested_keys_are_not_found() {
        // The greedy span is the same object, so both attempts fail.
        let raw = r#"{"plan": {"itinerary": [], "summary": "nested"}}"#;
        assert_fallback(&parse_response(raw));
    }

    #[test]
    fn test_no_json_at_all() {
        assert_fallback(&parse_response("Sorry, I cannot help with that."));
        assert_fallback(&parse_response(""));
        assert_fallback(&parse_response("} backwards {"));
    }

    #[test]
    fn test_greedy_span_with_two_objects_fails() {
        let raw = r#"First {"a": 1} then {"itinerary": [], "summary": "x"}"#;
        assert_fallback(&parse_response(raw));
    }

    #[test]
    fn test_truncated_json() {
        let raw = r#"{"itinerary": [{"day": 1, "activities": ["Walk"]"#;
        assert_fallback(&parse_response(raw));
    }

    #[test]
    fn test_non_string_summary() {
        let raw = r#"{"itinerary": [], "summary": {"text": "structured"}}"#;
        let parsed = parse_response(raw);
        assert_eq!(parsed.summary, r#"{"text":"structured"}"#);
    }

    #[test]
    fn test_null_summary_is_empty() {
        let raw = r#"{"itinerary": [], "summary": null}"#;
        let parsed = parse_response(raw);
        assert_eq!(parsed.strategy(), ParseStrategy::Direct);
        assert_eq!(parsed.summary, "");
    }

    #[test]
    fn test_top_level_array_is_not_a_response() {
        let raw = r#"[{"itinerary": [], "summary": "in an array"}]"#;
        let parsed = parse_response(raw);
        // The greedy span recovers the inner object.
        assert_eq!(parsed.strategy(), ParseStrategy::Embedded);
        assert_eq!(parsed.summary, "in an array");
    }
}
