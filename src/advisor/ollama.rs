use serde::{Deserialize, Serialize};

use super::AdvisorError;
use crate::config;

/// Single-shot text generation. Implemented by `OllamaClient` in production
/// and by canned doubles in tests.
pub trait LlmClient {
    fn generate(&self, model: &str, prompt: &str, system: &str) -> Result<String, AdvisorError>;
}

/// Ollama HTTP client for local LLM inference.
pub struct OllamaClient {
    base_url: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl OllamaClient {
    /// Create a new OllamaClient pointing at the given Ollama instance.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, AdvisorError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AdvisorError::Http(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs,
        })
    }

    /// Instance configured from the environment, 2-minute timeout.
    pub fn from_env() -> Result<Self, AdvisorError> {
        Self::new(&config::ollama_base_url(), 120)
    }
}

/// Request body for Ollama /api/generate
#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    system: &'a str,
    stream: bool,
}

/// Response body from Ollama /api/generate
#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl LlmClient for OllamaClient {
    fn generate(&self, model: &str, prompt: &str, system: &str) -> Result<String, AdvisorError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = GenerateRequest {
            model,
            prompt,
            system,
            stream: false,
        };

        let response = self.client.post(&url).json(&body).send().map_err(|e| {
            if e.is_connect() {
                AdvisorError::Connection(self.base_url.clone())
            } else if e.is_timeout() {
                AdvisorError::Http(format!("Request timed out after {}s", self.timeout_secs))
            } else {
                AdvisorError::Http(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AdvisorError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .map_err(|e| AdvisorError::Malformed(e.to_string()))?;
        Ok(parsed.response)
    }
}
