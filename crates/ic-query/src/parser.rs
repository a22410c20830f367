//! Reply parser — decodes the classifier's single-line contract into an `Intent`.
//!
//! The classifier is asked to answer with one of a handful of token patterns
//! (see `ic_chat::classifier::SYSTEM_PROMPT`). Nothing guarantees it does, so
//! parsing is total: every input yields an intent, `Unrecognized`, or an
//! "unprocessable" error for a recognized keyword with a broken value.
//!
//! Checks run in a fixed order and the first hit wins.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

use crate::error::{ParseError, ParseResult};
use ic_protocol::{Comparison, Intent, PartyKey};

static RE_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"field:(\w+)\s+invoice:(inv\d+)").unwrap());

static RE_INVOICE_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\binv\d+\b").unwrap());

static RE_STATUS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"status:\s*(\w+)").unwrap());

static RE_AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"amount\s*([<>=])\s*(\d+)").unwrap());

static RE_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"date\s*([<>=])\s*(\d{4}-\d{2}-\d{2})").unwrap());

/// Decode a classifier reply into an intent.
pub fn parse_reply(reply: &str) -> ParseResult<Intent> {
    let text = reply.trim().to_lowercase();

    // field:<name> invoice:<id>
    if let Some(caps) = RE_FIELD.captures(&text) {
        return Ok(Intent::FieldLookup {
            field: caps[1].to_lowercase(),
            invoice_id: caps[2].to_uppercase(),
        });
    }

    // Bare invoice ID anywhere in the reply
    if let Some(m) = RE_INVOICE_ID.find(&text) {
        return Ok(Intent::InvoiceLookup {
            invoice_id: m.as_str().to_uppercase(),
        });
    }

    if let Some(caps) = RE_STATUS.captures(&text) {
        return Ok(Intent::StatusFilter {
            status: caps[1].to_string(),
        });
    }

    // Once "amount" appears the reply is committed to this branch.
    if text.contains("amount") {
        return parse_amount(&text);
    }

    if let Some(key) = party_key(&text) {
        return parse_party(&text, key);
    }

    if text.contains("date") {
        return parse_date(&text);
    }

    tracing::debug!(reply = %text, "reply matched no intent pattern");
    Ok(Intent::Unrecognized)
}

fn parse_amount(text: &str) -> ParseResult<Intent> {
    let caps = RE_AMOUNT
        .captures(text)
        .ok_or_else(|| ParseError::unprocessable("amount", text))?;
    let operator =
        Comparison::from_symbol(&caps[1]).ok_or_else(|| ParseError::unprocessable("amount", text))?;
    let threshold = caps[2]
        .parse::<u64>()
        .map_err(|_| ParseError::unprocessable("amount", text))?;
    Ok(Intent::AmountFilter {
        operator,
        threshold,
    })
}

/// `vendor:` takes precedence when both markers appear.
fn party_key(text: &str) -> Option<PartyKey> {
    if text.contains("vendor:") {
        Some(PartyKey::Vendor)
    } else if text.contains("customer:") {
        Some(PartyKey::Customer)
    } else {
        None
    }
}

/// The party name is everything after the first colon in the reply.
fn parse_party(text: &str, key: PartyKey) -> ParseResult<Intent> {
    let name = text
        .split_once(':')
        .map(|(_, rest)| rest.trim())
        .unwrap_or_default();
    if name.is_empty() {
        return Err(ParseError::unprocessable(key.as_str(), text));
    }
    Ok(Intent::PartyFilter {
        key,
        name: name.to_string(),
    })
}

fn parse_date(text: &str) -> ParseResult<Intent> {
    let caps = RE_DATE
        .captures(text)
        .ok_or_else(|| ParseError::unprocessable("date", text))?;
    let operator =
        Comparison::from_symbol(&caps[1]).ok_or_else(|| ParseError::unprocessable("date", text))?;
    let date = NaiveDate::parse_from_str(&caps[2], "%Y-%m-%d")
        .map_err(|_| ParseError::unprocessable("date", text))?;
    Ok(Intent::DateFilter { operator, date })
}
