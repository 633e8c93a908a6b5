use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::fingerprint::SMS_ID_PREFIX;
use super::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Received,
    Sent,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Received => write!(f, "received"),
            Direction::Sent => write!(f, "sent"),
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "received" => Ok(Direction::Received),
            "sent" => Ok(Direction::Sent),
            other => Err(format!("Unknown direction: '{other}'")),
        }
    }
}

/// Coarse format family, used by the UI to pick an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderType {
    MobileMoney,
    Bank,
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderType::MobileMoney => write!(f, "mobile_money"),
            ProviderType::Bank => write!(f, "bank"),
        }
    }
}

/// Where a record came from. Manually entered sales share the transaction
/// list but are built elsewhere with their own id scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceTag {
    SmsScan,
    Manual,
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceTag::SmsScan => write!(f, "sms_scan"),
            SourceTag::Manual => write!(f, "manual"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    /// Positive when money came in, negative when it went out.
    pub amount: Money,
    pub sender: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub provider_type: ProviderType,
    pub transaction_direction: Direction,
    pub raw_message: String,
    pub bank: String,
    pub source_tag: SourceTag,
}

impl Transaction {
    pub fn is_sms_scan(&self) -> bool {
        self.source_tag == SourceTag::SmsScan && self.id.starts_with(SMS_ID_PREFIX)
    }

    pub fn direction_matches_sign(&self) -> bool {
        match self.transaction_direction {
            Direction::Received => self.amount.is_positive(),
            Direction::Sent => self.amount.is_negative(),
        }
    }
}
