use serde::Serialize;

use crate::types::Itinerary;

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

/// Sum of the per-day costs, rounded to cents.
///
/// Returns 0 for an itinerary that fails structural validation.
pub fn total_cost(itinerary: &Itinerary) -> f64 {
    if !itinerary.is_valid() {
        return 0.0;
    }

    let total: f64 = itinerary
        .as_value()
        .as_array()
        .map(|days| {
            days.iter()
                .filter_map(|day| day.get("cost").and_then(|cost| cost.as_f64()))
                .sum()
        })
        .unwrap_or(0.0);

    round_to(total, 2)
}

/// Mean spend per day, rounded to one decimal. `None` for empty or invalid plans.
pub fn average_daily_cost(itinerary: &Itinerary) -> Option<f64> {
    if itinerary.is_empty() || !itinerary.is_valid() {
        return None;
    }
    Some(round_to(total_cost(itinerary) / itinerary.len() as f64, 1))
}

/// Budget left after the planned spend; negative when the plan overshoots.
pub fn remaining_budget(budget: f64, itinerary: &Itinerary) -> f64 {
    round_to(budget - total_cost(itinerary), 2)
}

/// Cost figures shown next to a generated plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostSummary {
    pub budget: f64,
    pub total: f64,
    pub remaining: f64,
    pub average_daily: Option<f64>,
}

impl CostSummary {
    pub fn for_itinerary(budget: f64, itinerary: &Itinerary) -> Self {
        Self {
            budget,
            total: total_cost(itinerary),
            remaining: remaining_budget(budget, itinerary),
            average_daily: average_daily_cost(itinerary),
        }
    }

    pub fn within_budget(&self) -> bool {
        self.remaining >= 0.0
    }
}
