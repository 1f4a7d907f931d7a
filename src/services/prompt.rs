use crate::types::TripRequest;

/// JSON shape the backend is asked to return. The interpreter relies on these key names.
const RESPONSE_FORMAT: &str = r#"{
    "itinerary": [
        {
            "day": 1,
            "activities": ["Activity 1", "Activity 2", "Activity 3"],
            "cost": 50,
            "transport": "metro/bus/walking",
            "notes": "Important tips and safety notes"
        }
    ],
    "summary": "A concise 2-3 sentence summary of the trip, highlighting key experiences and budget considerations for students."
}"#;

/// Render the instruction sent to the text generation backend.
pub fn build_prompt(request: &TripRequest) -> String {
    format!(
        "You are an expert travel planner specializing in budget-friendly student travel. \
Create a detailed itinerary for a student trip with the following requirements:

DESTINATION: {destination}
DURATION: {days} days
BUDGET: {budget} {currency} total
INTERESTS: {interests}
TRANSPORT: {transport}
ACCOMMODATION: {stay}

REQUIREMENTS FOR STUDENT TRAVEL:
1. Prioritize budget-friendly options (public transport, hostels, local food, free activities)
2. Include safety tips relevant to student travelers
3. Suggest student discounts and free activities
4. Recommend affordable local restaurants and street food
5. Include practical tips for first-time travelers

OUTPUT FORMAT:
Respond with valid JSON only, using this exact structure:

{format}

IMPORTANT:
- Ensure the JSON is valid and properly formatted
- Provide exactly one entry per day, numbered from 1
- Express every cost as a plain number in {currency}
- Keep total daily costs reasonable for student budgets
- Include practical safety and money-saving tips
- Suggest free activities and student discounts where possible
- Include cultural experiences and local insights
",
        destination = request.destination(),
        days = request.duration_days(),
        budget = request.budget(),
        currency = request.currency(),
        interests = request.interests().join(", "),
        transport = request.transport(),
        stay = request.stay(),
        format = RESPONSE_FORMAT,
    )
}
