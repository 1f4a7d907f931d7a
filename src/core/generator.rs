use async_trait::async_trait;
use serde_json::json;

use crate::error::Result;

/// A text-in/text-out generation backend.
#[async_trait]
pub trait TextGenerator: Send + Sync + std::fmt::Debug {
    /// Short identifier used in logs
    fn name(&self) -> &str;

    /// Produce a reply for `prompt`
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Backend that always answers with the built-in Paris sample.
#[derive(Debug, Default, Clone, Copy)]
pub struct SampleGenerator;

impl SampleGenerator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TextGenerator for SampleGenerator {
    fn name(&self) -> &str {
        "sample"
    }

    async fn generate(&self, _prompt: &str) -> Result<String> {
        Ok(sample_response())
    }
}

/// Three-day Paris itinerary in the shape the prompt asks for.
pub fn sample_response() -> String {
    let sample = json!({
        "itinerary": [
            {
                "day": 1,
                "activities": [
                    "Visit the Eiffel Tower (student discount available)",
                    "Explore Montmartre district",
                    "Try street food at local markets"
                ],
                "cost": 45,
                "transport": "metro",
                "notes": "Student ID required for discounts. Free walking tour available."
            },
            {
                "day": 2,
                "activities": [
                    "Louvre Museum (free for EU students under 26)",
                    "Walk along the Seine River",
                    "Visit Notre-Dame Cathedral (exterior only)"
                ],
                "cost": 25,
                "transport": "metro + walking",
                "notes": "Book Louvre tickets online to skip queues."
            },
            {
                "day": 3,
                "activities": [
                    "Day trip to Versailles (half-day)",
                    "Explore Latin Quarter",
                    "Evening: Seine River cruise"
                ],
                "cost": 55,
                "transport": "train + metro",
                "notes": "Versailles has student discounts. Book river cruise in advance."
            }
        ],
        "summary": "A fantastic 3-day student adventure in Paris! This budget-friendly itinerary includes iconic landmarks, cultural experiences, and local cuisine. Total estimated cost: $125, well within your $200 budget. Highlights include student discounts at major attractions, efficient metro transport, and authentic local experiences."
    });

    serde_json::to_string_pretty(&sample).unwrap_or_else(|_| sample.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::interpreter::{parse_response, ParseStrategy};

    #[tokio::test]
    async fn test_sample_generator_parses_directly() {
        let raw = SampleGenerator::new().generate("anything").await.unwrap();
        let parsed = parse_response(&raw);

        assert_eq!(parsed.strategy(), ParseStrategy::Direct);
        assert!(parsed.itinerary.is_valid());
        assert_eq!(parsed.itinerary.len(), 3);
        assert_eq!(parsed.itinerary.total_cost(), 125.0);
    }
}
