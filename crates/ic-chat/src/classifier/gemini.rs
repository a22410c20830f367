//! Google Gemini classifier — `generateContent` REST API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{Classifier, SYSTEM_PROMPT, normalize_reply};
use crate::config::LlmConfig;
use crate::error::{ClassifyError, ClassifyResult};

/// `generateContent` request body.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

/// `generateContent` response (only fields we need).
#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

/// Classifier backed by the Gemini API.
pub struct GeminiClassifier {
    client: reqwest::Client,
    url: String,
    api_key: String,
}

impl GeminiClassifier {
    pub fn new(config: &LlmConfig) -> ClassifyResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or(ClassifyError::MissingApiKey("gemini"))?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClassifyError::Transport(e.to_string()))?;
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            config.host().trim_end_matches('/'),
            config.model()
        );
        Ok(Self {
            client,
            url,
            api_key,
        })
    }
}

#[async_trait]
impl Classifier for GeminiClassifier {
    async fn classify(&self, question: &str) -> ClassifyResult<String> {
        let body = GenerateRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: SYSTEM_PROMPT,
                }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: question }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.0,
                max_output_tokens: 64,
            },
        };

        let response = self
            .client
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ClassifyError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, "gemini returned non-200");
            return Err(ClassifyError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ClassifyError::Decode(e.to_string()))?;

        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        let reply = normalize_reply(&text);
        if reply.is_empty() {
            return Err(ClassifyError::EmptyReply);
        }
        tracing::debug!(reply = %reply, "gemini classified question");
        Ok(reply)
    }

    fn provider_name(&self) -> &str {
        "gemini"
    }
}
