//! AI advisory collaborators — family-history risk analysis, the
//! history-gathering chat, and travel health tips.
//!
//! Each operation is a single request/response call against a local LLM:
//! validate the input, build the prompt, make one request, parse the JSON
//! block out of the reply. No retries, no streaming, no caching; the caller
//! owns all conversation state.

mod flows;
mod ollama;

pub use flows::*;
pub use ollama::{LlmClient, OllamaClient};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("Invalid {field}: {message}")]
    InvalidInput { field: String, message: String },

    #[error("Cannot reach the model at {0}")]
    Connection(String),

    #[error("HTTP client error: {0}")]
    Http(String),

    #[error("Model returned status {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("Unusable model response: {0}")]
    Malformed(String),
}

impl AdvisorError {
    /// The generic string shown to the user. Field validation keeps its
    /// specific message; every provider-side failure collapses to one of two
    /// generic lines and is never retried.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput { message, .. } => message.clone(),
            Self::Connection(_) => {
                "The AI model could not be reached. Please try again later.".into()
            }
            _ => "An unexpected error occurred. Please try again later.".into(),
        }
    }
}
