//! Pure filter evaluation over an in-memory invoice snapshot.

use ic_protocol::{Intent, InvoiceRecord};

/// Whether `record` satisfies a filter intent.
///
/// Non-filter intents match nothing.
pub fn matches_record(intent: &Intent, record: &InvoiceRecord) -> bool {
    match intent {
        Intent::StatusFilter { status } => record.status.matches(status),
        Intent::AmountFilter {
            operator,
            threshold,
        } => operator.holds(&record.amount, &(*threshold as f64)),
        Intent::PartyFilter { key, name } => {
            record.party(*key).to_lowercase() == name.trim().to_lowercase()
        }
        Intent::DateFilter { operator, date } => record
            .last_updated_date()
            .is_some_and(|day| operator.holds(&day, date)),
        Intent::FieldLookup { .. } | Intent::InvoiceLookup { .. } | Intent::Unrecognized => false,
    }
}

/// Records matching `intent`, in input order.
pub fn filter_records<'a>(intent: &Intent, records: &'a [InvoiceRecord]) -> Vec<&'a InvoiceRecord> {
    records
        .iter()
        .filter(|record| matches_record(intent, record))
        .collect()
}

/// Owned variant of [`filter_records`].
pub fn apply_filter(intent: &Intent, records: &[InvoiceRecord]) -> Vec<InvoiceRecord> {
    filter_records(intent, records)
        .into_iter()
        .cloned()
        .collect()
}
