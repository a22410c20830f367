//! Invoice source abstraction — where records come from.

use async_trait::async_trait;
use ic_protocol::InvoiceRecord;

use crate::error::SourceResult;

/// Read-only access to invoice records.
///
/// Implemented over HTTP by `ic_chat::service::HttpInvoiceService` and by
/// [`MockInvoiceSource`](crate::mock::MockInvoiceSource) for tests.
#[async_trait]
pub trait InvoiceSource: Send + Sync {
    /// Full collection served by the list endpoint, in service order.
    async fn pending_invoices(&self) -> SourceResult<Vec<InvoiceRecord>>;

    /// One invoice by ID. `Ok(None)` when the service does not know it.
    async fn invoice(&self, invoice_id: &str) -> SourceResult<Option<InvoiceRecord>>;
}
