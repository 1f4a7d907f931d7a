use std::sync::OnceLock;

use jsonschema::{Draft, JSONSchema};
use serde_json::{json, Value};
use tracing::{debug, error};

const MAX_SCHEMA_ERRORS: usize = 3;

/// Keys every day entry must carry.
pub const REQUIRED_DAY_FIELDS: [&str; 5] = ["day", "activities", "cost", "transport", "notes"];

/// Draft-7 schema describing a structurally valid itinerary.
///
/// Deliberately permissive: only the presence of the day fields, a non-empty
/// `activities` array and a non-negative numeric `cost` are checked. Day
/// numbering, ordering and uniqueness are not.
pub fn itinerary_schema() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "Itinerary",
        "type": "array",
        "items": {
            "type": "object",
            "required": REQUIRED_DAY_FIELDS,
            "properties": {
                "activities": {
                    "type": "array",
                    "minItems": 1
                },
                "cost": {
                    "type": "number",
                    "minimum": 0
                }
            }
        }
    })
}

fn compiled_schema() -> Option<&'static JSONSchema> {
    static SCHEMA: OnceLock<Option<JSONSchema>> = OnceLock::new();
    SCHEMA
        .get_or_init(|| {
            let schema = itinerary_schema();
            match JSONSchema::options()
                .with_draft(Draft::Draft7)
                .compile(&schema)
            {
                Ok(compiled) => Some(compiled),
                Err(err) => {
                    error!(target: "trip_planner::schema", error = %err, "failed to compile itinerary schema");
                    None
                }
            }
        })
        .as_ref()
}

/// Structural check for an itinerary payload.
///
/// An empty sequence is valid; callers treat it as a degenerate plan.
pub fn is_valid_itinerary(itinerary: &Value) -> bool {
    match compiled_schema() {
        Some(schema) => schema.is_valid(itinerary),
        None => false,
    }
}

/// Human-readable reasons why an itinerary fails validation, capped at a few entries.
pub fn itinerary_violations(itinerary: &Value) -> Vec<String> {
    let Some(schema) = compiled_schema() else {
        return vec!["itinerary schema unavailable".to_string()];
    };

    let mut details = Vec::new();
    if let Err(errors) = schema.validate(itinerary) {
        let mut truncated = false;
        for (idx, error) in errors.enumerate() {
            if idx < MAX_SCHEMA_ERRORS {
                let mut path = error.instance_path.to_string();
                if path.is_empty() {
                    path = "<root>".to_string();
                }
                details.push(format!("{}: {}", path, error));
            } else {
                truncated = true;
                break;
            }
        }

        if truncated {
            details.push("additional errors truncated".to_string());
        }

        debug!(
            target: "trip_planner::schema",
            violations = details.len(),
            "itinerary failed structural validation"
        );
    }
    details
}
