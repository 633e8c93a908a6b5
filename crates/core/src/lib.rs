pub mod fingerprint;
pub mod message;
pub mod money;
pub mod transaction;

pub use fingerprint::{rolling_hash, transaction_id, SMS_ID_PREFIX};
pub use message::{MessageError, RawMessage};
pub use money::Money;
pub use transaction::{Direction, ProviderType, SourceTag, Transaction};
