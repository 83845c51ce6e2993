//! Gemini `generateContent` API client.
//!
//! Thin HTTP wrapper for `/models/{model}:generateContent`. Request building
//! and response parsing are pure functions for testability.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::config::LlmTimeouts;
use super::types::{ChatResponse, ContentBlock, LlmError, Message, ROLE_ASSISTANT};

const API_KEY_HEADER: &str = "x-goog-api-key";

// =============================================================================
// CLIENT
// =============================================================================

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, base_url: String, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key, base_url })
    }

    pub async fn chat(
        &self,
        model: &str,
        max_tokens: u32,
        system: &str,
        messages: &[Message],
    ) -> Result<ChatResponse, LlmError> {
        let url = format!("{}/models/{model}:generateContent", self.base_url);
        let body = build_request(max_tokens, system, messages);

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        if status != 200 {
            return Err(LlmError::ApiResponse { status, body: text });
        }

        parse_response(&text, model)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<ApiContent<'a>>,
    contents: Vec<ApiContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct ApiContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<ApiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct ApiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
    #[serde(default)]
    model_version: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u64,
    #[serde(default)]
    candidates_token_count: u64,
}

// =============================================================================
// REQUEST BUILDING
// =============================================================================

/// Gemini calls the assistant role `model`.
fn wire_role(role: &str) -> &str {
    if role == ROLE_ASSISTANT { "model" } else { role }
}

fn build_request<'a>(max_tokens: u32, system: &'a str, messages: &'a [Message]) -> ApiRequest<'a> {
    let system_instruction =
        (!system.is_empty()).then(|| ApiContent { role: None, parts: vec![ApiPart { text: system }] });
    let contents = messages
        .iter()
        .map(|m| ApiContent { role: Some(wire_role(&m.role)), parts: vec![ApiPart { text: &m.content }] })
        .collect();
    ApiRequest { system_instruction, contents, generation_config: GenerationConfig { max_output_tokens: max_tokens } }
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_response(json: &str, model: &str) -> Result<ChatResponse, LlmError> {
    let api: ApiResponse = serde_json::from_str(json).map_err(|e| LlmError::ApiParse(e.to_string()))?;

    // Blocked prompts come back with no candidates at all; that is an empty
    // completion, not a parse failure.
    let candidate = api.candidates.into_iter().next();
    let stop_reason = candidate
        .as_ref()
        .and_then(|c| c.finish_reason.clone())
        .unwrap_or_else(|| "NO_CANDIDATE".into());

    let content = candidate
        .and_then(|c| c.content)
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|p| match (p.text, p.thought) {
            (Some(text), false) => Some(ContentBlock::Text { text }),
            (Some(thinking), true) => Some(ContentBlock::Thinking { thinking }),
            (None, _) => None,
        })
        .collect();

    let (input_tokens, output_tokens) = api
        .usage_metadata
        .map_or((0, 0), |u| (u.prompt_token_count, u.candidates_token_count));

    Ok(ChatResponse {
        content,
        model: api.model_version.unwrap_or_else(|| model.to_string()),
        stop_reason,
        input_tokens,
        output_tokens,
    })
}

#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;
