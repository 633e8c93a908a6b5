//! Deterministic transaction ids derived from message content.
//!
//! Ids already persisted by earlier releases were produced by a 32-bit
//! shift-and-subtract rolling hash over UTF-16 code units. The exact
//! arithmetic is reproduced here so re-scanning an inbox yields the same ids.

use rust_decimal::Decimal;

use crate::message::RawMessage;

/// Prefix shared by every id produced from an SMS scan.
pub const SMS_ID_PREFIX: &str = "tx_";

/// `hash = (hash << 5) - hash + c` with 32-bit signed wrap-around at every step.
pub fn rolling_hash(input: &str) -> i32 {
    input.encode_utf16().fold(0i32, |hash, unit| {
        (hash << 5).wrapping_sub(hash).wrapping_add(i32::from(unit))
    })
}

/// Renders an amount the way a JavaScript number prints: no trailing
/// fractional zeros and no dangling decimal point.
pub fn amount_key(amount: Decimal) -> String {
    amount.normalize().to_string()
}

/// The string the hash is computed over.
pub fn composition_key(message: &RawMessage, provider: &str, amount: Decimal) -> String {
    format!(
        "{}_{}_{}_{}_{}",
        message.external_id().unwrap_or_default(),
        message.body(),
        message.received_at_millis(),
        provider,
        amount_key(amount),
    )
}

/// `tx_<abs(hash)>_<provider with whitespace runs replaced by "_">`.
///
/// `amount` is the unsigned magnitude the classifier extracted.
pub fn transaction_id(message: &RawMessage, provider: &str, amount: Decimal) -> String {
    let hash = rolling_hash(&composition_key(message, provider, amount));
    format!(
        "{SMS_ID_PREFIX}{}_{}",
        hash.unsigned_abs(),
        underscore_whitespace(provider)
    )
}

fn underscore_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_run = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !in_run {
                out.push('_');
            }
            in_run = true;
        } else {
            out.push(ch);
            in_run = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn msg(external_id: Option<&str>, body: &str, millis: i64) -> RawMessage {
        RawMessage::new(external_id.map(str::to_string), body, millis).unwrap()
    }

    // ── rolling_hash ──────────────────────────────────────────────────────────

    #[test]
    fn rolling_hash_known_vectors() {
        assert_eq!(rolling_hash(""), 0);
        assert_eq!(rolling_hash("a"), 97);
        assert_eq!(rolling_hash("ab"), 3105);
        assert_eq!(rolling_hash("hello"), 99_162_322);
    }

    #[test]
    fn rolling_hash_wraps_at_32_bits() {
        assert_eq!(
            rolling_hash("Hello, world! This is a long string to overflow"),
            -1_510_793_954
        );
    }

    #[test]
    fn rolling_hash_uses_utf16_code_units() {
        // Em dash, accented letter and an astral-plane emoji (surrogate pair).
        assert_eq!(rolling_hash("Ksh 1,500 — M-Pésa 😀"), 1_863_049_354);
    }

    // ── amount_key ────────────────────────────────────────────────────────────

    #[test]
    fn amount_key_strips_trailing_zeros() {
        assert_eq!(amount_key(dec("1500.00")), "1500");
        assert_eq!(amount_key(dec("12.50")), "12.5");
        assert_eq!(amount_key(dec("450")), "450");
        assert_eq!(amount_key(dec("0.05")), "0.05");
    }

    // ── transaction_id ────────────────────────────────────────────────────────

    #[test]
    fn transaction_id_matches_persisted_format() {
        let m = msg(
            None,
            "MPESA Confirmed. Ksh 1,500.00 received from JOHN DOE 254712345678 on 1/1/24",
            1_704_067_200_000,
        );
        assert_eq!(transaction_id(&m, "M-Pesa", dec("1500.00")), "tx_353887722_M-Pesa");
    }

    #[test]
    fn transaction_id_includes_external_id() {
        let body = "MPESA Confirmed. Ksh 1,500.00 received from JOHN DOE 254712345678 on 1/1/24";
        let m = msg(Some("42"), body, 1_704_067_200_000);
        assert_eq!(transaction_id(&m, "M-Pesa", dec("1500")), "tx_1474417176_M-Pesa");
    }

    #[test]
    fn transaction_id_replaces_provider_whitespace() {
        let m = msg(
            None,
            "Your account has been credited with Ksh 3,200 from JANE N. Co-op Bank",
            1_704_067_200_000,
        );
        assert_eq!(
            transaction_id(&m, "Co-operative Bank", dec("3200")),
            "tx_1391343495_Co-operative_Bank"
        );
    }

    #[test]
    fn missing_and_empty_external_id_hash_alike() {
        let a = msg(None, "Ksh 10 received", 1);
        let b = msg(Some(""), "Ksh 10 received", 1);
        assert_eq!(
            transaction_id(&a, "M-Pesa", dec("10")),
            transaction_id(&b, "M-Pesa", dec("10"))
        );
    }

    #[test]
    fn amount_scale_does_not_change_id() {
        let m = msg(None, "Ksh 10 received", 1);
        assert_eq!(
            transaction_id(&m, "M-Pesa", dec("10.00")),
            transaction_id(&m, "M-Pesa", dec("10"))
        );
    }

    #[test]
    fn underscore_whitespace_collapses_runs() {
        assert_eq!(underscore_whitespace("Standard  Chartered"), "Standard_Chartered");
        assert_eq!(underscore_whitespace("I&M Bank"), "I&M_Bank");
        assert_eq!(underscore_whitespace("KCB"), "KCB");
    }
}
