use serde::{Deserialize, Serialize};

use super::ollama::LlmClient;
use super::AdvisorError;
use crate::config;

// ═══════════════════════════════════════════
// Result types
// ═══════════════════════════════════════════

/// Output of the family-history risk analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyHistoryAnalysis {
    pub risk_factors: String,
}

/// One turn of the history-gathering chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

/// One travel health tip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthTip {
    pub category: String,
    pub title: String,
    pub description: String,
    pub severity: TipSeverity,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TipSeverity {
    Low,
    Medium,
    High,
}

// ═══════════════════════════════════════════
// Flows
// ═══════════════════════════════════════════

const ADVISOR_SYSTEM: &str =
    "You are a careful health information assistant. You never give a diagnosis; \
you summarize and inform. Always answer with a single JSON object in the requested \
format and nothing else.";

/// Analyze a free-text family medical history for potential risk factors.
///
/// The history must be at least 50 characters; shorter input is rejected
/// before any request is dispatched.
pub fn analyze_family_history(
    client: &dyn LlmClient,
    family_history: &str,
) -> Result<FamilyHistoryAnalysis, AdvisorError> {
    if family_history.trim().chars().count() < 50 {
        return Err(AdvisorError::InvalidInput {
            field: "familyHistory".into(),
            message: "Please provide a detailed family history of at least 50 characters.".into(),
        });
    }

    let prompt = format!(
        "You are a medical expert tasked with analyzing family medical history to \
identify potential health risk factors for the user.\n\n\
Based on the following family history, identify and summarize the most significant \
potential health risks for the user:\n\n\
Family History: {family_history}\n\n\
Focus on genetic predispositions, shared environmental factors, and lifestyle \
patterns that could increase the user's risk for certain diseases or conditions. \
Provide a concise summary of these risk factors.\n\n\
OUTPUT FORMAT:\n```json\n{{\"risk_factors\": \"summary text\"}}\n```"
    );

    let response = client.generate(&config::advisor_model(), &prompt, ADVISOR_SYSTEM)?;
    let json = extract_json_block(&response)?;
    serde_json::from_str(json).map_err(|e| AdvisorError::Malformed(format!("analysis: {e}")))
}

/// One stateless turn of the family-history-gathering conversation.
///
/// The transcript belongs to the caller; every call carries the prior
/// exchange verbatim and gets back a single reply.
pub fn family_history_chat(
    client: &dyn LlmClient,
    prior_transcript: &str,
    latest_message: &str,
) -> Result<ChatReply, AdvisorError> {
    if latest_message.trim().is_empty() {
        return Err(AdvisorError::InvalidInput {
            field: "message".into(),
            message: "Please enter a message.".into(),
        });
    }

    let prompt = format!(
        "You are helping a user write down their family medical history by asking \
one focused follow-up question at a time (parents, grandparents, siblings; \
conditions, age of onset). Keep replies short and conversational.\n\n\
CONVERSATION SO FAR:\n{prior_transcript}\n\n\
USER: {latest_message}\n\n\
OUTPUT FORMAT:\n```json\n{{\"response\": \"your reply\"}}\n```"
    );

    let response = client.generate(&config::advisor_model(), &prompt, ADVISOR_SYSTEM)?;
    let json = extract_json_block(&response)?;
    serde_json::from_str(json).map_err(|e| AdvisorError::Malformed(format!("chat: {e}")))
}

/// Location- and age-based travel health tips.
///
/// The location must be at least 2 characters after trimming; anything
/// shorter is rejected as a field-level validation error before dispatch.
pub fn generate_health_tips(
    client: &dyn LlmClient,
    location: &str,
    age: u32,
) -> Result<Vec<HealthTip>, AdvisorError> {
    let location = location.trim();
    if location.chars().count() < 2 {
        return Err(AdvisorError::InvalidInput {
            field: "location".into(),
            message: "Please enter a destination of at least 2 characters.".into(),
        });
    }

    let prompt = format!(
        "You are a travel health advisor. A user is traveling to the destination \
below. Based on their age and destination, provide recommended vaccinations, \
local diseases to be aware of, and general health and safety tips. If the \
location is generic (e.g., \"beach\"), provide general advice for that type of \
environment.\n\n\
User Age: {age}\nDestination: {location}\n\n\
Each tip carries a category (vaccination, disease, or general), a short title, \
a description, and a severity of low, medium, or high.\n\n\
OUTPUT FORMAT:\n```json\n{{\"tips\": [{{\"category\": \"vaccination\", \
\"title\": \"...\", \"description\": \"...\", \"severity\": \"medium\"}}]}}\n```"
    );

    let response = client.generate(&config::advisor_model(), &prompt, ADVISOR_SYSTEM)?;
    let json = extract_json_block(&response)?;

    #[derive(Deserialize)]
    struct TipsResponse {
        #[serde(default)]
        tips: Vec<HealthTip>,
    }

    let parsed: TipsResponse =
        serde_json::from_str(json).map_err(|e| AdvisorError::Malformed(format!("tips: {e}")))?;
    Ok(parsed.tips)
}

// ═══════════════════════════════════════════
// Response handling
// ═══════════════════════════════════════════

/// Extract a JSON block from LLM response text.
/// Handles responses that include text before/after the JSON.
fn extract_json_block(response: &str) -> Result<&str, AdvisorError> {
    let trimmed = response.trim();

    // Strip markdown code fences if present
    if let Some(start) = trimmed.find("```json") {
        let after_fence = &trimmed[start + 7..];
        if let Some(end) = after_fence.find("```") {
            return Ok(after_fence[..end].trim());
        }
    }

    if let Some(start) = trimmed.find("```") {
        let after_fence = &trimmed[start + 3..];
        if let Some(end) = after_fence.find("```") {
            let block = after_fence[..end].trim();
            if block.starts_with('{') || block.starts_with('[') {
                return Ok(block);
            }
        }
    }

    // Find the first { and last }
    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start < end {
            return Ok(&trimmed[start..=end]);
        }
    }

    Err(AdvisorError::Malformed(
        "No JSON block found in model response".into(),
    ))
}

// ─── Tests ────────────────────────────────────────────────────────────────────
