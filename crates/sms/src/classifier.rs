use duka_core::{Direction, ProviderType, RawMessage};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::options::ClassifyOptions;
use crate::patterns::*;
use crate::provider::{
    customer_placeholder, detect_bank_label, AIRTEL_MONEY, AIRTIME_PURCHASE, EQUITY_BANK, KCB,
    MPESA, TKASH, UNKNOWN_PARTY,
};

/// What the classifier pulled out of one message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedFields {
    pub provider: String,
    pub provider_type: ProviderType,
    /// Unsigned magnitude as written in the message.
    pub amount: Decimal,
    pub direction: Direction,
    /// Never empty; falls back to a provider or category placeholder.
    pub counterparty_name: String,
    pub counterparty_phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("Amount '{0}' is malformed or does not fit a decimal")]
    InvalidAmount(String),
}

type ExtractFn = fn(&str, &ClassifyOptions) -> Result<Option<ClassifiedFields>, ExtractError>;

/// One entry of the dispatch table: a cheap predicate on the body and the
/// extractor to run when it holds.
struct Extractor {
    name: &'static str,
    applies: fn(&str) -> bool,
    extract: ExtractFn,
}

/// Tried in order; the first extractor that applies and finds an amount wins.
/// `generic_bank` always applies and must stay last.
const EXTRACTORS: &[Extractor] = &[
    Extractor { name: "mpesa", applies: mentions_mpesa, extract: extract_mpesa },
    Extractor { name: "airtel_money", applies: mentions_airtel, extract: extract_airtel },
    Extractor { name: "tkash", applies: mentions_tkash, extract: extract_tkash },
    Extractor { name: "equity", applies: mentions_equity, extract: extract_equity },
    Extractor { name: "kcb", applies: mentions_kcb, extract: extract_kcb },
    Extractor { name: "mpesa_confirmation", applies: is_confirmation, extract: extract_mpesa },
    Extractor { name: "generic_bank", applies: always, extract: extract_generic_bank },
];

/// Whether the body looks like a money message at all.
pub fn is_relevant(body: &str) -> bool {
    !body.trim().is_empty() && relevance_gate().is_match(body)
}

/// Classifies with default options.
pub fn classify(message: &RawMessage) -> Option<ClassifiedFields> {
    classify_with(message, &ClassifyOptions::default())
}

/// Returns `None` for non-financial messages, for messages no extractor can
/// pull an amount from, and for messages an extractor fails on. Failures are
/// logged and never escape to the caller.
pub fn classify_with(message: &RawMessage, options: &ClassifyOptions) -> Option<ClassifiedFields> {
    let body = message.body();
    if !is_relevant(body) {
        tracing::trace!(external_id = message.external_id(), "not a financial message");
        return None;
    }

    match dispatch(body, options) {
        Ok(Some((name, fields))) => {
            tracing::debug!(
                external_id = message.external_id(),
                extractor = name,
                provider = %fields.provider,
                direction = %fields.direction,
                "classified message"
            );
            Some(fields)
        }
        Ok(None) => {
            tracing::debug!(external_id = message.external_id(), "no extractor found an amount");
            None
        }
        Err(e) => {
            tracing::warn!(external_id = message.external_id(), error = %e, "dropping message");
            None
        }
    }
}

fn dispatch(
    body: &str,
    options: &ClassifyOptions,
) -> Result<Option<(&'static str, ClassifiedFields)>, ExtractError> {
    for extractor in EXTRACTORS.iter().filter(|e| (e.applies)(body)) {
        if let Some(fields) = (extractor.extract)(body, options)? {
            return Ok(Some((extractor.name, fields)));
        }
    }
    Ok(None)
}

// ── Predicates ───────────────────────────────────────────────────────────────

fn mentions_mpesa(body: &str) -> bool {
    re_mpesa().is_match(body)
}

fn mentions_airtel(body: &str) -> bool {
    re_airtel().is_match(body)
}

fn mentions_tkash(body: &str) -> bool {
    re_tkash().is_match(body)
}

fn mentions_equity(body: &str) -> bool {
    re_equity().is_match(body)
}

fn mentions_kcb(body: &str) -> bool {
    re_kcb().is_match(body)
}

fn is_confirmation(body: &str) -> bool {
    re_confirmed().is_match(body)
}

fn always(_body: &str) -> bool {
    true
}

// ── Extractors ───────────────────────────────────────────────────────────────

fn extract_mpesa(body: &str, _: &ClassifyOptions) -> Result<Option<ClassifiedFields>, ExtractError> {
    mobile_money(body, MPESA)
}

fn extract_airtel(body: &str, _: &ClassifyOptions) -> Result<Option<ClassifiedFields>, ExtractError> {
    mobile_money(body, AIRTEL_MONEY)
}

fn extract_tkash(body: &str, _: &ClassifyOptions) -> Result<Option<ClassifiedFields>, ExtractError> {
    mobile_money(body, TKASH)
}

fn extract_equity(body: &str, opts: &ClassifyOptions) -> Result<Option<ClassifiedFields>, ExtractError> {
    bank(body, EQUITY_BANK, opts)
}

fn extract_kcb(body: &str, opts: &ClassifyOptions) -> Result<Option<ClassifiedFields>, ExtractError> {
    bank(body, KCB, opts)
}

fn extract_generic_bank(
    body: &str,
    opts: &ClassifyOptions,
) -> Result<Option<ClassifiedFields>, ExtractError> {
    bank(body, detect_bank_label(body), opts)
}

fn extract_amount(body: &str) -> Result<Option<Decimal>, ExtractError> {
    let Some(raw) = find_amount(body) else {
        return Ok(None);
    };
    let amount = parse_amount_str(raw).ok_or_else(|| ExtractError::InvalidAmount(raw.to_string()))?;
    // A zero figure carries no direction, so it is treated as no amount.
    Ok((!amount.is_zero()).then_some(amount))
}

/// Shared by every mobile-money operator: the phrasing is the same family.
fn mobile_money(body: &str, provider: &str) -> Result<Option<ClassifiedFields>, ExtractError> {
    let Some(amount) = extract_amount(body)? else {
        return Ok(None);
    };

    let (direction, name, phone) = if let Some(c) = re_airtime().captures(body) {
        (
            Direction::Sent,
            Some(AIRTIME_PURCHASE.to_string()),
            c.get(1).map(|m| m.as_str().to_string()),
        )
    } else if let Some(c) = re_from_party().captures(body) {
        (Direction::Received, clean_name(&c[1]), Some(c[2].to_string()))
    } else if let Some(c) = re_to_party().captures(body) {
        (Direction::Sent, clean_name(&c[1]), Some(c[2].to_string()))
    } else if let Some(c) = re_paid_to_till().captures(body) {
        (Direction::Sent, clean_name(&c[1]), None)
    } else if re_cue_received().is_match(body) {
        (Direction::Received, None, None)
    } else if re_cue_sent().is_match(body) {
        (Direction::Sent, None, None)
    } else {
        (Direction::Received, None, None)
    };

    Ok(Some(ClassifiedFields {
        provider: provider.to_string(),
        provider_type: ProviderType::MobileMoney,
        amount,
        direction,
        counterparty_name: name.unwrap_or_else(|| customer_placeholder(provider)),
        counterparty_phone: phone,
    }))
}

fn bank(
    body: &str,
    provider: &str,
    opts: &ClassifyOptions,
) -> Result<Option<ClassifiedFields>, ExtractError> {
    let Some(amount) = extract_amount(body)? else {
        return Ok(None);
    };

    let direction = if re_bank_sent().is_match(body) {
        Direction::Sent
    } else if re_bank_received().is_match(body) {
        Direction::Received
    } else {
        opts.bank_default_direction
    };

    let (name, phone) = bank_party(body).unwrap_or_else(|| (UNKNOWN_PARTY.to_string(), None));

    Ok(Some(ClassifiedFields {
        provider: provider.to_string(),
        provider_type: ProviderType::Bank,
        amount,
        direction,
        counterparty_name: name,
        counterparty_phone: phone,
    }))
}

/// First `from|to <NAME>` clause that names someone other than the account
/// holder. A rejected clause is searched again from inside its name, so
/// "from your account to PETER K" still yields "PETER K".
fn bank_party(body: &str) -> Option<(String, Option<String>)> {
    let mut start = 0;
    loop {
        let caps = re_bank_party().captures_at(body, start)?;
        let name_match = caps.get(1)?;
        if let Some(name) = clean_name(name_match.as_str()).filter(|n| !is_account_holder(n)) {
            return Some((name, caps.get(2).map(|m| m.as_str().to_string())));
        }
        start = name_match.start();
    }
}

fn is_account_holder(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower == "you" || lower.starts_with("your ") || lower.starts_with("account")
}

fn clean_name(raw: &str) -> Option<String> {
    let name = raw
        .trim()
        .trim_end_matches(|c: char| matches!(c, '.' | ',' | ';' | ':' | '-'))
        .trim();
    (!name.is_empty()).then(|| name.to_string())
}
