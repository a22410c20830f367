use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Comparison operator used by amount and date filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Comparison {
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = "=")]
    Equal,
}

impl Comparison {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            ">" => Some(Self::GreaterThan),
            "<" => Some(Self::LessThan),
            "=" => Some(Self::Equal),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::GreaterThan => ">",
            Self::LessThan => "<",
            Self::Equal => "=",
        }
    }

    /// Evaluate `lhs <op> rhs`. Equality is exact.
    pub fn holds<T: PartialOrd>(self, lhs: &T, rhs: &T) -> bool {
        match self {
            Self::GreaterThan => lhs > rhs,
            Self::LessThan => lhs < rhs,
            Self::Equal => lhs == rhs,
        }
    }
}

impl std::fmt::Display for Comparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Which counterparty a party filter looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyKey {
    Vendor,
    Customer,
}

impl PartyKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vendor => "vendor",
            Self::Customer => "customer",
        }
    }
}

impl std::fmt::Display for PartyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured meaning of one user question, decoded from the classifier reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Intent {
    /// One attribute of one invoice (`field:vendor invoice:inv1001`).
    FieldLookup { field: String, invoice_id: String },
    /// Full details of one invoice.
    InvoiceLookup { invoice_id: String },
    /// All invoices with the given status word. Not validated.
    StatusFilter { status: String },
    AmountFilter {
        operator: Comparison,
        threshold: u64,
    },
    PartyFilter { key: PartyKey, name: String },
    DateFilter {
        operator: Comparison,
        date: NaiveDate,
    },
    Unrecognized,
}

impl Intent {
    /// Short label for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FieldLookup { .. } => "field_lookup",
            Self::InvoiceLookup { .. } => "invoice_lookup",
            Self::StatusFilter { .. } => "status_filter",
            Self::AmountFilter { .. } => "amount_filter",
            Self::PartyFilter { .. } => "party_filter",
            Self::DateFilter { .. } => "date_filter",
            Self::Unrecognized => "unrecognized",
        }
    }

    /// Invoice ID for intents keyed by a single invoice.
    pub fn invoice_id(&self) -> Option<&str> {
        match self {
            Self::FieldLookup { invoice_id, .. } | Self::InvoiceLookup { invoice_id } => {
                Some(invoice_id)
            }
            _ => None,
        }
    }

    /// Whether this intent filters the full pending collection.
    pub fn is_filter(&self) -> bool {
        matches!(
            self,
            Self::StatusFilter { .. }
                | Self::AmountFilter { .. }
                | Self::PartyFilter { .. }
                | Self::DateFilter { .. }
        )
    }
}
