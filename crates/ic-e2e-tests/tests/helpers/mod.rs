//! Shared test harness for E2E integration tests.
//!
//! Stands up two wiremock servers, one playing Gemini and one playing the
//! invoice service, and drives a real `ChatSession` built from config.

#![allow(dead_code)]

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ic_chat::config::{ChatConfig, LlmConfig, ServiceConfig};
use ic_chat::{ChatSession, HttpInvoiceService, Reply, classifier};
use ic_protocol::{InvoiceRecord, PendingInvoices};
use ic_query::mock::sample_records;

pub const GEMINI_PATH: &str = "/v1beta/models/gemini-1.5-flash:generateContent";

/// End-to-end harness: mock Gemini + mock invoice service + live session.
pub struct TestHarness {
    pub gemini: MockServer,
    pub invoices: MockServer,
    pub session: ChatSession,
}

impl TestHarness {
    /// Harness whose invoice service serves the five sample invoices.
    pub async fn with_sample_data() -> Self {
        let invoices = MockServer::start().await;
        serve_invoices(&invoices, &sample_records()).await;
        Self::with_invoice_server(invoices).await
    }

    /// Harness around a caller-prepared invoice service mock.
    pub async fn with_invoice_server(invoices: MockServer) -> Self {
        let gemini = MockServer::start().await;
        let config = ChatConfig {
            invoice_service: ServiceConfig {
                base_url: invoices.uri(),
                timeout_secs: 2,
            },
            llm: LlmConfig {
                host: Some(gemini.uri()),
                timeout_secs: 2,
                api_key: Some("e2e-key".into()),
                ..LlmConfig::default()
            },
        };
        let classifier = classifier::from_config(&config.llm).unwrap();
        let service = HttpInvoiceService::new(&config.invoice_service).unwrap();

        Self {
            gemini,
            invoices,
            session: ChatSession::new(classifier, Box::new(service)),
        }
    }

    /// Make the mock model answer `question` with `reply`.
    pub async fn script(&self, question: &str, reply: &str) {
        Mock::given(method("POST"))
            .and(path(GEMINI_PATH))
            .and(body_partial_json(json!({
                "contents": [{"role": "user", "parts": [{"text": question}]}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(gemini_response(reply)))
            .mount(&self.gemini)
            .await;
    }

    /// Ask one question and return the rendered markdown.
    pub async fn ask(&self, question: &str) -> Reply {
        self.session.handle(question).await
    }

    /// Requests the invoice service has received so far.
    pub async fn invoice_requests(&self) -> usize {
        self.invoices
            .received_requests()
            .await
            .map(|r| r.len())
            .unwrap_or(0)
    }
}

/// Serve `GET /pending` with `records` and `GET /invoice/{id}` for each one.
/// Unknown IDs fall through to wiremock's default 404.
pub async fn serve_invoices(server: &MockServer, records: &[InvoiceRecord]) {
    let body = PendingInvoices {
        pending_invoices: records.to_vec(),
    };
    Mock::given(method("GET"))
        .and(path("/pending"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(server)
        .await;

    for record in records {
        Mock::given(method("GET"))
            .and(path(format!("/invoice/{}", record.invoice_id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(record))
            .mount(server)
            .await;
    }
}

/// A `generateContent` response carrying `text` as the only candidate.
pub fn gemini_response(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    })
}
