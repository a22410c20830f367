//! Mock invoice source for testing — serves pre-loaded records.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{SourceError, SourceResult};
use crate::source::InvoiceSource;
use ic_protocol::{InvoiceRecord, InvoiceStatus};

/// A mock source that answers from an in-memory list and counts calls.
pub struct MockInvoiceSource {
    records: Vec<InvoiceRecord>,
    unavailable: bool,
    list_calls: AtomicUsize,
    lookup_calls: AtomicUsize,
}

impl MockInvoiceSource {
    pub fn new(records: Vec<InvoiceRecord>) -> Self {
        Self {
            records,
            unavailable: false,
            list_calls: AtomicUsize::new(0),
            lookup_calls: AtomicUsize::new(0),
        }
    }

    /// A source whose every call fails with a transport error.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::new(Vec::new())
        }
    }

    /// Five invoices: two approved, three pending, mixed parties.
    pub fn with_sample_data() -> Self {
        Self::new(sample_records())
    }

    /// Number of list (`pending_invoices`) calls served so far.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Number of single-invoice lookups served so far.
    pub fn lookup_calls(&self) -> usize {
        self.lookup_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InvoiceSource for MockInvoiceSource {
    async fn pending_invoices(&self) -> SourceResult<Vec<InvoiceRecord>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable {
            return Err(SourceError::Transport("connection refused".into()));
        }
        Ok(self.records.clone())
    }

    async fn invoice(&self, invoice_id: &str) -> SourceResult<Option<InvoiceRecord>> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable {
            return Err(SourceError::Transport("connection refused".into()));
        }
        Ok(self
            .records
            .iter()
            .find(|r| r.invoice_id.eq_ignore_ascii_case(invoice_id))
            .cloned())
    }
}

/// Sample records shared by unit and end-to-end tests.
pub fn sample_records() -> Vec<InvoiceRecord> {
    let record = |id: &str,
                  status: InvoiceStatus,
                  kind: &str,
                  vendor: Option<&str>,
                  customer: Option<&str>,
                  amount: f64,
                  updated: &str| InvoiceRecord {
        invoice_id: id.into(),
        status,
        approver: "R. Mehta".into(),
        kind: kind.into(),
        vendor: vendor.map(Into::into),
        customer: customer.map(Into::into),
        amount,
        last_updated: updated.into(),
        extra: BTreeMap::new(),
    };

    vec![
        record(
            "INV1001",
            InvoiceStatus::approved(),
            "payable",
            Some("Acme Corp"),
            None,
            3000.0,
            "2023-01-10",
        ),
        record(
            "INV1002",
            InvoiceStatus::pending(),
            "payable",
            Some("Acme Corp"),
            None,
            5000.0,
            "2023-01-15T09:30:00",
        ),
        record(
            "INV1003",
            InvoiceStatus::pending(),
            "payable",
            Some("Initech"),
            None,
            7000.0,
            "2023-01-20T10:00:00",
        ),
        record(
            "INV2001",
            InvoiceStatus::approved(),
            "receivable",
            None,
            Some("Globex"),
            12500.0,
            "2023-02-01",
        ),
        record(
            "INV2002",
            InvoiceStatus::pending(),
            "receivable",
            None,
            Some("Umbrella Ltd"),
            800.0,
            "2023-02-03 14:00:00",
        ),
    ]
}
