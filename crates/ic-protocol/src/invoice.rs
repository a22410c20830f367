use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::intent::PartyKey;

/// Normalized approval state, for comparisons and icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    Pending,
    Approved,
    Rejected,
    Other,
}

/// Approval status of an invoice.
///
/// Classified case-insensitively into a [`StatusKind`], but displayed and
/// serialized exactly as the service sent it. Unknown words are kept as
/// `StatusKind::Other` so one odd record never poisons a whole listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct InvoiceStatus {
    kind: StatusKind,
    raw: String,
}

impl InvoiceStatus {
    pub fn parse(raw: &str) -> Self {
        let kind = match raw.trim().to_lowercase().as_str() {
            "pending" => StatusKind::Pending,
            "approved" => StatusKind::Approved,
            "rejected" => StatusKind::Rejected,
            _ => StatusKind::Other,
        };
        Self {
            kind,
            raw: raw.to_string(),
        }
    }

    pub fn pending() -> Self {
        Self::parse("pending")
    }

    pub fn approved() -> Self {
        Self::parse("approved")
    }

    pub fn rejected() -> Self {
        Self::parse("rejected")
    }

    pub fn kind(&self) -> StatusKind {
        self.kind
    }

    /// The status text as received.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Case-insensitive equality against a free-form status word.
    pub fn matches(&self, query: &str) -> bool {
        self.raw.trim().to_lowercase() == query.trim().to_lowercase()
    }
}

impl From<String> for InvoiceStatus {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<InvoiceStatus> for String {
    fn from(status: InvoiceStatus) -> Self {
        status.raw
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single invoice as served by the invoice service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// `INV` followed by digits, unique within a result set.
    pub invoice_id: String,
    pub status: InvoiceStatus,
    pub approver: String,
    /// Payable/receivable kind (`type` on the wire).
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    pub amount: f64,
    /// Raw service timestamp: `YYYY-MM-DD`, optionally followed by a time.
    pub last_updated: String,
    /// Attributes the service sends beyond the known set.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl InvoiceRecord {
    /// Calendar date of `last_updated` with any time-of-day dropped.
    pub fn last_updated_date(&self) -> Option<NaiveDate> {
        let day = self.last_updated.trim().get(..10)?;
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }

    /// Party name for the given key; a missing party reads as "".
    pub fn party(&self, key: PartyKey) -> &str {
        match key {
            PartyKey::Vendor => self.vendor.as_deref().unwrap_or(""),
            PartyKey::Customer => self.customer.as_deref().unwrap_or(""),
        }
    }

    /// Look up an attribute by its exact wire name, rendered as text.
    ///
    /// `vendor` and `customer` belong to every record; a null party reads
    /// as `N/A`, as on the detail card.
    pub fn field(&self, name: &str) -> Option<String> {
        match name {
            "invoice_id" => Some(self.invoice_id.clone()),
            "status" => Some(self.status.to_string()),
            "approver" => Some(self.approver.clone()),
            "type" => Some(self.kind.clone()),
            "vendor" => Some(or_na(&self.vendor)),
            "customer" => Some(or_na(&self.customer)),
            "amount" => Some(self.amount.to_string()),
            "last_updated" => Some(self.last_updated.clone()),
            other => self.extra.get(other).map(|value| match value {
                serde_json::Value::String(s) => s.clone(),
                v => v.to_string(),
            }),
        }
    }
}

fn or_na(party: &Option<String>) -> String {
    party.clone().unwrap_or_else(|| "N/A".into())
}

/// Body of `GET /pending`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PendingInvoices {
    #[serde(default)]
    pub pending_invoices: Vec<InvoiceRecord>,
}
