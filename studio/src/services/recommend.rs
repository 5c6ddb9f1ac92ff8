//! Word recommendation client.
//!
//! Sends the active run's length and fixed glyphs to an OpenAI-compatible
//! chat-completions endpoint and parses one candidate word per line. The
//! `WordSource` trait is the seam: production uses `ChatCompletionsClient`,
//! tests stub it. `fetch_recommendations` is the fail-soft boundary — every
//! failure degrades to an empty list so the editing loop never blocks on
//! the network.

#[cfg(test)]
#[path = "recommend_test.rs"]
mod recommend_test;

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use puzzle::grid::Constraint;

const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
const DEFAULT_MODEL: &str = "google/gemini-3-flash-preview";
const MAX_RECOMMENDATIONS: usize = 10;
const MAX_TOKENS: u32 = 200;
const TEMPERATURE: f32 = 0.7;
const REQUEST_TIMEOUT_SECS: u64 = 120;
const CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum RecommendError {
    #[error("recommendation API key not configured")]
    NotConfigured,
    #[error("http client build failed: {0}")]
    HttpClientBuild(String),
    #[error("api request failed: {0}")]
    ApiRequest(String),
    #[error("api returned status {status}: {body}")]
    ApiResponse { status: u16, body: String },
    #[error("api response parse failed: {0}")]
    ApiParse(String),
}

/// Source of word suggestions for a run of known length with fixed glyphs.
#[async_trait]
pub trait WordSource: Send + Sync {
    async fn suggest(
        &self,
        length: usize,
        constraints: &[Constraint],
    ) -> Result<Vec<String>, RecommendError>;
}

// =============================================================
// CHAT COMPLETIONS CLIENT
// =============================================================

pub struct ChatCompletionsClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl ChatCompletionsClient {
    /// Build from environment. `OPENROUTER_API_KEY` is required; base URL
    /// and model fall back to OpenRouter defaults.
    pub fn from_env() -> Result<Self, RecommendError> {
        let api_key = std::env::var("OPENROUTER_API_KEY").map_err(|_| RecommendError::NotConfigured)?;
        let base_url =
            std::env::var("RECOMMEND_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = std::env::var("RECOMMEND_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Self::new(api_key, base_url, model)
    }

    pub fn new(api_key: String, base_url: String, model: String) -> Result<Self, RecommendError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| RecommendError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key, base_url: base_url.trim_end_matches('/').to_string(), model })
    }

    async fn send_json(&self, path: &str, body: &impl Serialize) -> Result<String, RecommendError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| RecommendError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| RecommendError::ApiRequest(e.to_string()))?;
        if status != 200 {
            return Err(RecommendError::ApiResponse { status, body: text });
        }
        Ok(text)
    }
}

#[async_trait]
impl WordSource for ChatCompletionsClient {
    async fn suggest(
        &self,
        length: usize,
        constraints: &[Constraint],
    ) -> Result<Vec<String>, RecommendError> {
        let prompt = build_prompt(length, constraints);
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage { role: "user", content: &prompt }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };
        let text = self.send_json("/chat/completions", &body).await?;
        let content = parse_chat_content(&text)?;
        let words = parse_words(&content, length);
        info!(length, constraints = constraints.len(), words = words.len(), "recommend: fetched");
        Ok(words)
    }
}

// =============================================================
// WIRE TYPES
// =============================================================

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

// =============================================================
// PROMPT / PARSING
// =============================================================

pub(crate) fn build_prompt(length: usize, constraints: &[Constraint]) -> String {
    let constraint_text = if constraints.is_empty() {
        "제약 조건 없음".to_string()
    } else {
        constraints
            .iter()
            .map(|c| format!("{}번째 글자는 '{}'", c.position + 1, c.char))
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "다음 조건에 맞는 한국어 단어 10개를 추천해주세요:\n\
         - 글자 수: {length}글자\n\
         - 포함 조건: {constraint_text}\n\n\
         규칙:\n\
         1. 일반적으로 사용되는 한국어 단어만 추천\n\
         2. 고유명사, 브랜드명, 외래어 제외\n\
         3. 비속어, 은어 제외\n\
         4. 각 단어는 정확히 {length}글자여야 함\n\n\
         형식: 단어만 줄바꿈으로 구분하여 출력 (번호, 설명 없이)"
    )
}

/// Extract the assistant text of the first choice; absent content reads as
/// empty rather than failing, matching the fail-soft recommendation flow.
pub(crate) fn parse_chat_content(json_text: &str) -> Result<String, RecommendError> {
    let root: Value =
        serde_json::from_str(json_text).map_err(|e| RecommendError::ApiParse(e.to_string()))?;
    let content = root
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(Value::as_str)
        .unwrap_or("");
    Ok(content.to_string())
}

/// One candidate per line; keep only words of exactly the requested glyph
/// count, capped at `MAX_RECOMMENDATIONS`.
pub(crate) fn parse_words(content: &str, length: usize) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| line.chars().count() == length)
        .take(MAX_RECOMMENDATIONS)
        .map(str::to_string)
        .collect()
}

/// Fetch suggestions, degrading every failure to an empty list.
pub async fn fetch_recommendations(
    source: &dyn WordSource,
    length: usize,
    constraints: &[Constraint],
) -> Vec<String> {
    match source.suggest(length, constraints).await {
        Ok(words) => words,
        Err(e) => {
            warn!(error = %e, length, "recommend: fetch failed");
            Vec::new()
        }
    }
}
