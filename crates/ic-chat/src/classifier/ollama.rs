//! Ollama classifier — local or LAN-hosted models via `/api/chat`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{Classifier, SYSTEM_PROMPT, normalize_reply};
use crate::config::LlmConfig;
use crate::error::{ClassifyError, ClassifyResult};

/// Ollama chat API request body.
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
    options: ChatOptions,
}

/// A single message in the chat request.
#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatOptions {
    temperature: f32,
}

/// Ollama chat API response (only fields we need).
#[derive(Deserialize)]
struct ChatResponse {
    message: Option<ResponseMessage>,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Classifier backed by an Ollama endpoint.
pub struct OllamaClassifier {
    client: reqwest::Client,
    url: String,
    model: String,
}

impl OllamaClassifier {
    pub fn new(config: &LlmConfig) -> ClassifyResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClassifyError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            url: format!("{}/api/chat", config.host().trim_end_matches('/')),
            model: config.model().to_string(),
        })
    }
}

#[async_trait]
impl Classifier for OllamaClassifier {
    async fn classify(&self, question: &str) -> ClassifyResult<String> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: question,
                },
            ],
            stream: false,
            options: ChatOptions { temperature: 0.0 },
        };

        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ClassifyError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, "ollama returned non-200");
            return Err(ClassifyError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| ClassifyError::Decode(e.to_string()))?;

        let reply = chat
            .message
            .map(|m| normalize_reply(&m.content))
            .unwrap_or_default();
        if reply.is_empty() {
            return Err(ClassifyError::EmptyReply);
        }
        tracing::debug!(reply = %reply, model = %self.model, "ollama classified question");
        Ok(reply)
    }

    fn provider_name(&self) -> &str {
        "ollama"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LlmProvider;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Helper: build an Ollama chat response body.
    fn ollama_response(content: &str) -> serde_json::Value {
        serde_json::json!({
            "model": "phi3:mini",
            "message": {
                "role": "assistant",
                "content": content
            },
            "done": true
        })
    }

    /// Build an OllamaClassifier pointed at the mock server.
    fn classifier_for(server: &MockServer) -> OllamaClassifier {
        OllamaClassifier::new(&LlmConfig {
            provider: LlmProvider::Ollama,
            host: Some(server.uri()),
            timeout_secs: 2,
            ..LlmConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn classify_vendor_question() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_partial_json(serde_json::json!({
                "model": "phi3:mini",
                "stream": false
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(ollama_response("Vendor:Acme Corp")))
            .mount(&server)
            .await;

        let classifier = classifier_for(&server);
        let reply = classifier
            .classify("Which invoices are from Acme Corp?")
            .await
            .unwrap();
        assert_eq!(reply, "vendor:acme corp");
    }

    #[tokio::test]
    async fn missing_message_is_empty_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"done": true})),
            )
            .mount(&server)
            .await;

        let classifier = classifier_for(&server);
        assert!(matches!(
            classifier.classify("show pending invoices").await,
            Err(ClassifyError::EmptyReply)
        ));
    }

    #[tokio::test]
    async fn server_error_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(500).set_body_string("model not loaded"))
            .mount(&server)
            .await;

        let classifier = classifier_for(&server);
        assert!(matches!(
            classifier.classify("status of inv1").await,
            Err(ClassifyError::Status { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_error() {
        let classifier = OllamaClassifier::new(&LlmConfig {
            provider: LlmProvider::Ollama,
            host: Some("http://127.0.0.1:1".into()),
            timeout_secs: 1,
            ..LlmConfig::default()
        })
        .unwrap();
        assert!(matches!(
            classifier.classify("anything").await,
            Err(ClassifyError::Transport(_))
        ));
    }
}
