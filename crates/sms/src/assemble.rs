use duka_core::{transaction_id, Direction, Money, RawMessage, SourceTag, Transaction};

use crate::classifier::ClassifiedFields;

/// Builds the stored record for a classified message.
///
/// The id depends only on message content, provider and unsigned amount, so
/// assembling the same message twice always yields the same id.
pub fn assemble(message: &RawMessage, fields: &ClassifiedFields) -> Transaction {
    let magnitude = Money::from_decimal(fields.amount.abs());
    let amount = match fields.direction {
        Direction::Received => magnitude,
        Direction::Sent => -magnitude,
    };

    Transaction {
        id: transaction_id(message, &fields.provider, fields.amount),
        amount,
        sender: fields.counterparty_name.clone(),
        phone: fields.counterparty_phone.clone(),
        timestamp: message.received_at(),
        provider_type: fields.provider_type,
        transaction_direction: fields.direction,
        raw_message: message.body().to_string(),
        bank: fields.provider.clone(),
        source_tag: SourceTag::SmsScan,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use duka_core::ProviderType;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn fields(amount: &str, direction: Direction) -> ClassifiedFields {
        ClassifiedFields {
            provider: "M-Pesa".to_string(),
            provider_type: ProviderType::MobileMoney,
            amount: dec(amount),
            direction,
            counterparty_name: "JOHN DOE".to_string(),
            counterparty_phone: Some("254712345678".to_string()),
        }
    }

    fn message() -> RawMessage {
        RawMessage::new(
            None,
            "MPESA Confirmed. Ksh 1,500.00 received from JOHN DOE 254712345678 on 1/1/24",
            1_704_067_200_000,
        )
        .unwrap()
    }

    #[test]
    fn received_amount_is_positive() {
        let tx = assemble(&message(), &fields("1500.00", Direction::Received));
        assert_eq!(tx.amount.as_decimal(), dec("1500"));
        assert!(tx.direction_matches_sign());
    }

    #[test]
    fn sent_amount_is_negative() {
        let tx = assemble(&message(), &fields("450", Direction::Sent));
        assert_eq!(tx.amount.as_decimal(), dec("-450"));
        assert_eq!(tx.transaction_direction, Direction::Sent);
        assert!(tx.direction_matches_sign());
    }

    #[test]
    fn maps_metadata_fields() {
        let tx = assemble(&message(), &fields("1500.00", Direction::Received));
        assert_eq!(tx.id, "tx_353887722_M-Pesa");
        assert_eq!(tx.sender, "JOHN DOE");
        assert_eq!(tx.phone.as_deref(), Some("254712345678"));
        assert_eq!(tx.timestamp, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(tx.provider_type, ProviderType::MobileMoney);
        assert_eq!(tx.bank, "M-Pesa");
        assert_eq!(tx.source_tag, SourceTag::SmsScan);
        assert_eq!(tx.raw_message, message().body());
        assert!(tx.is_sms_scan());
    }

    #[test]
    fn assemble_is_idempotent() {
        let f = fields("1500.00", Direction::Received);
        assert_eq!(assemble(&message(), &f).id, assemble(&message(), &f).id);
        assert_eq!(assemble(&message(), &f), assemble(&message(), &f));
    }

    #[test]
    fn id_uses_unsigned_amount_for_sent() {
        let sent = assemble(&message(), &fields("1500", Direction::Sent));
        let received = assemble(&message(), &fields("1500", Direction::Received));
        assert_eq!(sent.id, received.id);
    }
}
