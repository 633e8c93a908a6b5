use std::str::FromStr;
use std::sync::OnceLock;

use regex::{Regex, RegexSet};
use rust_decimal::Decimal;

// ── Compiled regex cache ─────────────────────────────────────────────────────

macro_rules! re {
    ($name:ident, $pat:expr) => {
        pub(crate) fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

/// Signatures a message must hit at least one of before any extractor runs.
/// Order is mobile money, named banks, then generic money phrasing.
const RELEVANCE_SIGNATURES: &[&str] = &[
    r"(?i)\bm-?pesa\b",
    r"(?i)\bairtel\s*money\b",
    r"(?i)\bt-?kash\b",
    r"(?i)\bconfirmed\b",
    r"(?i)\b(?:equity|kcb|co-?op(?:erative)?|ncba|absa|stanbic|stanchart|standard\s+chartered|family\s+bank|dtb|diamond\s+trust|i&m)\b",
    r"(?i)\b(?:credited|debited)\b",
    r"(?i)\b(?:kshs?|kes)\.?\s*\d",
];

pub(crate) fn relevance_gate() -> &'static RegexSet {
    static R: OnceLock<RegexSet> = OnceLock::new();
    R.get_or_init(|| RegexSet::new(RELEVANCE_SIGNATURES).expect("invalid regex"))
}

// Amount: currency prefix, then the whole figure up to the first character
// that cannot continue it. The figure's shape is checked separately so a
// malformed one is rejected instead of cut short.
re!(re_amount, r"(?i)\b(?:kshs?|kes)\.?\s*(\d(?:[\d,]*\d)?(?:\.\d+)?)");
re!(re_amount_shape, r"^(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d{1,2})?$");

// ── Provider detection ───────────────────────────────────────────────────────

re!(re_mpesa, r"(?i)\bm-?pesa\b");
re!(re_confirmed, r"(?i)\bconfirmed\b");
re!(re_airtel, r"(?i)\bairtel\s*money\b");
re!(re_tkash, r"(?i)\bt-?kash\b");
re!(re_equity, r"(?i)\bequity\b");
re!(re_kcb, r"(?i)\bkcb\b");

// ── Counterparty clauses ─────────────────────────────────────────────────────

re!(re_airtime, r"(?i)\bairtime\s+for\b(?:\s+(\+?\d{9,13}))?");
re!(re_from_party,
    r"(?i)\bfrom\s+([^\d\n]+?)\s+(\+?\d{9,13})\b");
re!(re_to_party,
    r"(?i)\bto\s+([^\d\n]+?)\s+(\+?\d{9,13})\b");
re!(re_paid_to_till,
    r"(?i)\bpaid\s+to\s+([^.]+?)\s*(?:\.|\bon\b|$)");
re!(re_bank_party,
    r"(?i)\b(?:from|to)\s+([A-Za-z][A-Za-z .'&-]*?)(?:\s+(\+?\d{9,13})\b|\s+on\b|\.|,|$)");

// ── Direction cues ───────────────────────────────────────────────────────────

re!(re_cue_received, r"(?i)\breceived\b");
re!(re_cue_sent, r"(?i)\b(?:sent|paid|withdraw|withdrawn|bought)\b");
re!(re_bank_sent,
    r"(?i)\b(?:debited|withdrawn|withdrawal|paid|sent|purchase|transferred\s+to)\b");
re!(re_bank_received, r"(?i)\b(?:credited|received|deposit|deposited)\b");

/// First currency-prefixed amount in `text`, as the matched digits.
pub(crate) fn find_amount(text: &str) -> Option<&str> {
    re_amount()
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Parses `1,500.00`-style digits. `None` for misplaced separators, more
/// than two decimals, or a value that does not fit a `Decimal`.
pub(crate) fn parse_amount_str(s: &str) -> Option<Decimal> {
    if !re_amount_shape().is_match(s) {
        return None;
    }
    let clean = s.replace(',', "");
    Decimal::from_str(&clean).ok()
}
