//! Answer generation: prompt assembly and the Cohere chat client

pub mod cohere;
pub mod prompt;

pub use cohere::{CohereClient, InputType};
pub use prompt::PromptBuilder;
