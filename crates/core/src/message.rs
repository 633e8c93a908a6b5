use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    #[error("Invalid receipt timestamp: '{0}'")]
    InvalidTimestamp(String),
    #[error("Receipt timestamp out of range: {0}")]
    TimestampOutOfRange(i64),
}

/// An SMS as delivered by the inbox reader. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireMessage", into = "WireMessage")]
pub struct RawMessage {
    external_id: Option<String>,
    body: String,
    received_at_millis: i64,
    received_at: DateTime<Utc>,
}

impl RawMessage {
    pub fn new(
        external_id: Option<String>,
        body: impl Into<String>,
        received_at_millis: i64,
    ) -> Result<Self, MessageError> {
        let received_at = DateTime::from_timestamp_millis(received_at_millis)
            .ok_or(MessageError::TimestampOutOfRange(received_at_millis))?;
        Ok(Self {
            external_id,
            body: body.into(),
            received_at_millis,
            received_at,
        })
    }

    pub fn external_id(&self) -> Option<&str> {
        self.external_id.as_deref()
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn received_at_millis(&self) -> i64 {
        self.received_at_millis
    }

    pub fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }
}

/// Inbox readers hand over the receipt time either as a number or as a
/// numeric string; both are accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum EpochMillis {
    Number(i64),
    Text(String),
}

impl EpochMillis {
    fn to_millis(&self) -> Result<i64, MessageError> {
        match self {
            EpochMillis::Number(n) => Ok(*n),
            EpochMillis::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| MessageError::InvalidTimestamp(s.clone())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireMessage {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    external_id: Option<String>,
    body: String,
    received_at_epoch_millis: EpochMillis,
}

impl TryFrom<WireMessage> for RawMessage {
    type Error = MessageError;

    fn try_from(wire: WireMessage) -> Result<Self, Self::Error> {
        let millis = wire.received_at_epoch_millis.to_millis()?;
        RawMessage::new(wire.external_id, wire.body, millis)
    }
}

impl From<RawMessage> for WireMessage {
    fn from(msg: RawMessage) -> Self {
        WireMessage {
            external_id: msg.external_id,
            body: msg.body,
            received_at_epoch_millis: EpochMillis::Number(msg.received_at_millis),
        }
    }
}
