//! HTTP client for the read-only invoice service.
//!
//! - `GET /pending` → `{"pending_invoices": [...]}`
//! - `GET /invoice/{id}` → one record, 404 when unknown

use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;

use crate::config::ServiceConfig;
use ic_protocol::{InvoiceRecord, PendingInvoices};
use ic_query::{InvoiceSource, SourceError, SourceResult};

/// `InvoiceSource` backed by the invoice service REST API.
pub struct HttpInvoiceService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpInvoiceService {
    pub fn new(config: &ServiceConfig) -> SourceResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SourceError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get(&self, url: &str) -> SourceResult<reqwest::Response> {
        self.client.get(url).send().await.map_err(|e| {
            tracing::warn!(error = %e, url = %url, "invoice service request failed");
            SourceError::Transport(e.to_string())
        })
    }
}

#[async_trait]
impl InvoiceSource for HttpInvoiceService {
    async fn pending_invoices(&self) -> SourceResult<Vec<InvoiceRecord>> {
        let url = format!("{}/pending", self.base_url);
        let response = self.get(&url).await?;

        if !response.status().is_success() {
            return Err(SourceError::Status {
                status: response.status().as_u16(),
                url,
            });
        }

        let body: PendingInvoices = response
            .json()
            .await
            .map_err(|e| SourceError::Decode(e.to_string()))?;
        tracing::debug!(count = body.pending_invoices.len(), "fetched invoice list");
        Ok(body.pending_invoices)
    }

    async fn invoice(&self, invoice_id: &str) -> SourceResult<Option<InvoiceRecord>> {
        let url = format!("{}/invoice/{}", self.base_url, invoice_id);
        let response = self.get(&url).await?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                tracing::debug!(invoice_id = %invoice_id, "invoice not found");
                Ok(None)
            }
            status if status.is_success() => response
                .json()
                .await
                .map(Some)
                .map_err(|e| SourceError::Decode(e.to_string())),
            status => Err(SourceError::Status {
                status: status.as_u16(),
                url,
            }),
        }
    }
}
