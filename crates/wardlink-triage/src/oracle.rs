// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Scoring oracle client
//!
//! Summarizes the trailing request window into a triage prompt, calls the
//! generative API, and parses the JSON it returns. Parsing is two-stage:
//! strict first, then best-effort extraction of a JSON object embedded in
//! surrounding prose - models occasionally wrap the payload in commentary
//! or code fences despite the JSON-only instruction.

use crate::error::OracleError;
use crate::record::RequestRecord;
use crate::types::TriageResult;
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// External scoring oracle contract
///
/// Implemented by [`GeminiOracleClient`] in production and by counting mocks
/// in cache tests.
#[async_trait]
pub trait ScoringOracle: Send + Sync {
    /// Rank the given trailing window of history
    async fn score(&self, window: &[RequestRecord]) -> Result<TriageResult, OracleError>;
}

/// HTTP client for the Gemini generateContent endpoint
pub struct GeminiOracleClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
    temperature: f32,
    max_output_tokens: u32,
}

impl GeminiOracleClient {
    /// Build a client. The API key is read from the named environment
    /// variable; the request timeout bounds every oracle call.
    pub fn new(
        endpoint: &str,
        model: &str,
        api_key_env: &str,
        timeout: Duration,
        temperature: f32,
        max_output_tokens: u32,
    ) -> Result<Self, OracleError> {
        let api_key = std::env::var(api_key_env)
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| OracleError::MissingApiKey(api_key_env.to_string()))?;

        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key,
            temperature,
            max_output_tokens,
        })
    }

    fn request_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint, self.model
        )
    }
}

#[async_trait]
impl ScoringOracle for GeminiOracleClient {
    async fn score(&self, window: &[RequestRecord]) -> Result<TriageResult, OracleError> {
        let prompt = build_prompt(window);
        let body = json!({
            "contents": [{"parts": [{"text": prompt}]}],
            "generationConfig": {
                "temperature": self.temperature,
                "maxOutputTokens": self.max_output_tokens,
            }
        });

        let response = self
            .http
            .post(self.request_url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let payload: serde_json::Value = response.json().await?;
        let text = payload
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(|v| v.as_str())
            .ok_or(OracleError::EmptyResponse)?;

        debug!(chars = text.len(), "oracle candidate text received");
        parse_triage_text(text)
    }
}

/// Format history lines and wrap them in the triage instruction
fn build_prompt(window: &[RequestRecord]) -> String {
    let history_text = window
        .iter()
        .map(|r| format!("- [{}] {}", r.formatted_time(), r.label))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are an AI triage assistant for patient monitoring.

Given the following request history (each has a timestamp):
{history_text}

Your tasks:
1. Analyze urgency based on type:
   - Emergency -> highest
   - Bathroom -> high
   - Water/Food -> medium
   - Blanket/Comfort -> low

2. Consider timestamp recency:
   - More recent = higher priority
   - Extremely old request = lower priority

3. Output JSON ONLY in this format:
{{
  "prioritized_tasks": [
      {{"task": "...", "urgency": "high/medium/low", "ai_score": number}},
      ...
  ],
  "ai_insights": [
      "insight 1",
      "insight 2"
  ],
  "wellbeing_summary": {{
      "score": "X/10",
      "rationale": "..."
  }}
}}

Rules:
- Sort tasks highest -> lowest priority using your reasoning.
- Use ai_score to reflect combined urgency + recency.
- KEEP JSON VALID."#
    )
}

/// Two-stage parse of the oracle's candidate text
///
/// Stage 1: strict parse of the whole trimmed text.
/// Stage 2: locate the outermost `{`..`}` block and parse that - covers
/// responses with leading/trailing prose or markdown fences.
pub fn parse_triage_text(text: &str) -> Result<TriageResult, OracleError> {
    let trimmed = text.trim();

    if let Ok(result) = serde_json::from_str::<TriageResult>(trimmed) {
        return Ok(result);
    }

    let start = trimmed.find('{');
    let end = trimmed.rfind('}');
    if let (Some(start), Some(end)) = (start, end) {
        if start < end {
            let block = &trimmed[start..=end];
            return serde_json::from_str::<TriageResult>(block)
                .map_err(|e| OracleError::MalformedResponse(e.to_string()));
        }
    }

    Err(OracleError::MalformedResponse(
        "no JSON object found in response text".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{EMERGENCY_LABEL, WATER_LABEL};
    use crate::types::Urgency;
    use chrono::{TimeZone, Utc};

    fn window() -> Vec<RequestRecord> {
        vec![
            RequestRecord::new(WATER_LABEL, Utc.with_ymd_and_hms(2025, 3, 14, 9, 0, 0).unwrap()),
            RequestRecord::new(
                EMERGENCY_LABEL,
                Utc.with_ymd_and_hms(2025, 3, 14, 9, 5, 0).unwrap(),
            ),
        ]
    }

    const VALID_JSON: &str = r#"{
        "prioritized_tasks": [{"task": "Respond to emergency", "urgency": "high", "ai_score": 9.8}],
        "ai_insights": ["Emergency is the newest event"],
        "wellbeing_summary": {"score": "3/10", "rationale": "Emergency in progress"}
    }"#;

    #[test]
    fn test_prompt_contains_history_lines() {
        let prompt = build_prompt(&window());
        assert!(prompt.contains("- [2025-03-14 09:00:00] Water Request"));
        assert!(prompt.contains("- [2025-03-14 09:05:00] HELP! Emergency"));
        assert!(prompt.contains("Output JSON ONLY"));
    }

    #[test]
    fn test_strict_parse() {
        let result = parse_triage_text(VALID_JSON).unwrap();
        assert_eq!(result.prioritized_tasks[0].urgency, Urgency::High);
    }

    #[test]
    fn test_embedded_block_recovered() {
        let wrapped = format!("Here is the triage:\n```json\n{}\n```\nDone.", VALID_JSON);
        let result = parse_triage_text(&wrapped).unwrap();
        assert_eq!(result.ai_insights.len(), 1);
        assert_eq!(result.wellbeing_summary.score, "3/10");
    }

    #[test]
    fn test_no_json_is_malformed() {
        let err = parse_triage_text("I could not triage this history.").unwrap_err();
        assert!(matches!(err, OracleError::MalformedResponse(_)));
    }

    #[test]
    fn test_broken_embedded_json_is_malformed() {
        let err = parse_triage_text("prefix {\"prioritized_tasks\": [}").unwrap_err();
        assert!(matches!(err, OracleError::MalformedResponse(_)));
    }
}
