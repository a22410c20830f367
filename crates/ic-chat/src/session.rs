//! Chat session — one question in, one rendered reply out.
//!
//! Each turn runs classify → parse → evaluate → render in sequence. Any
//! failure ends the turn with a visible banner; nothing carries over to the
//! next turn.

use tracing::Instrument;
use uuid::Uuid;

use crate::classifier::Classifier;
use crate::render::{self, Reply};
use ic_query::{InvoiceSource, evaluate, parse_reply};

/// Wires a classifier and an invoice source together.
pub struct ChatSession {
    classifier: Box<dyn Classifier>,
    source: Box<dyn InvoiceSource>,
}

impl ChatSession {
    pub fn new(classifier: Box<dyn Classifier>, source: Box<dyn InvoiceSource>) -> Self {
        Self { classifier, source }
    }

    /// Answer one user question.
    pub async fn handle(&self, question: &str) -> Reply {
        let turn_id = Uuid::now_v7();
        let span = tracing::info_span!("turn", %turn_id, provider = self.classifier.provider_name());
        self.run_turn(question.trim()).instrument(span).await
    }

    async fn run_turn(&self, question: &str) -> Reply {
        if question.is_empty() {
            return render::blank_question();
        }

        let reply = match self.classifier.classify(question).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(error = %e, "classification failed");
                return render::classifier_failure(&e);
            }
        };

        let intent = match parse_reply(&reply) {
            Ok(intent) => intent,
            Err(e) => {
                tracing::warn!(error = %e, "classifier reply could not be processed");
                return render::parse_error(&e);
            }
        };
        tracing::info!(intent = ?intent, filter = intent.is_filter(), "intent parsed");

        match evaluate(&intent, self.source.as_ref()).await {
            Ok(outcome) => render::outcome(&outcome),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    intent = intent.name(),
                    invoice_id = intent.invoice_id(),
                    "invoice query failed"
                );
                render::service_failure(&e)
            }
        }
    }
}
