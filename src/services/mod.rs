pub mod budget;
pub mod gemini_client;
pub mod interpreter;
pub mod prompt;
