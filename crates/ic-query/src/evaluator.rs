//! Query evaluator — turns an intent into an outcome using an invoice source.
//!
//! Each intent costs at most one source call: lookups fetch a single record,
//! filters fetch the collection once and run [`apply_filter`] over it.

use ic_protocol::{Intent, InvoiceRecord};

use crate::error::SourceResult;
use crate::filter::apply_filter;
use crate::source::InvoiceSource;

/// Result of evaluating one intent. Not-found cases are values, not errors.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// The requested attribute of one invoice.
    Field {
        invoice_id: String,
        field: String,
        value: String,
    },
    /// The invoice exists but has no attribute by that name.
    FieldNotFound { invoice_id: String, field: String },
    /// Full record for an invoice lookup.
    Invoice(InvoiceRecord),
    NotFound { invoice_id: String },
    /// Records matching a filter intent, in service order.
    Matches {
        filter: Intent,
        records: Vec<InvoiceRecord>,
    },
    Unrecognized,
}

/// Evaluate `intent` against `source`.
///
/// Source failures propagate; the caller reports them for the turn.
pub async fn evaluate(intent: &Intent, source: &dyn InvoiceSource) -> SourceResult<QueryOutcome> {
    match intent {
        Intent::FieldLookup { field, invoice_id } => {
            let Some(record) = source.invoice(invoice_id).await? else {
                return Ok(QueryOutcome::NotFound {
                    invoice_id: invoice_id.clone(),
                });
            };
            Ok(match record.field(field) {
                Some(value) => QueryOutcome::Field {
                    invoice_id: invoice_id.clone(),
                    field: field.clone(),
                    value,
                },
                None => QueryOutcome::FieldNotFound {
                    invoice_id: invoice_id.clone(),
                    field: field.clone(),
                },
            })
        }
        Intent::InvoiceLookup { invoice_id } => Ok(match source.invoice(invoice_id).await? {
            Some(record) => QueryOutcome::Invoice(record),
            None => QueryOutcome::NotFound {
                invoice_id: invoice_id.clone(),
            },
        }),
        Intent::Unrecognized => Ok(QueryOutcome::Unrecognized),
        filter => {
            let records = source.pending_invoices().await?;
            let matches = apply_filter(filter, &records);
            tracing::debug!(
                intent = filter.name(),
                total = records.len(),
                matched = matches.len(),
                "filter evaluated"
            );
            Ok(QueryOutcome::Matches {
                filter: filter.clone(),
                records: matches,
            })
        }
    }
}
