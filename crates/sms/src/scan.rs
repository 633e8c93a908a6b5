use std::collections::HashSet;

use duka_core::{RawMessage, Transaction};

use crate::assemble::assemble;
use crate::classifier::classify_with;
use crate::options::ClassifyOptions;

/// Outcome of one scan. Returned to the caller rather than kept anywhere, so
/// "last scan" bookkeeping stays with whoever ran the scan.
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// In input order.
    pub transactions: Vec<Transaction>,
    pub examined: usize,
    /// Messages dropped as non-financial or unparseable.
    pub skipped: usize,
}

/// Classifies and assembles every message, dropping the ones that are not
/// transactions. Output follows input order.
pub fn scan(messages: &[RawMessage]) -> Vec<Transaction> {
    scan_with(messages, &ClassifyOptions::default()).transactions
}

pub fn scan_with(messages: &[RawMessage], options: &ClassifyOptions) -> ScanReport {
    let transactions: Vec<Transaction> = messages
        .iter()
        .filter_map(|msg| classify_with(msg, options).map(|fields| assemble(msg, &fields)))
        .collect();

    let report = ScanReport {
        examined: messages.len(),
        skipped: messages.len() - transactions.len(),
        transactions,
    };
    tracing::info!(
        examined = report.examined,
        classified = report.transactions.len(),
        skipped = report.skipped,
        "sms scan finished"
    );
    report
}

/// Appends the records whose id is not already present and returns how many
/// were added. Duplicates inside `incoming` are collapsed too, first one wins.
pub fn merge_by_id(
    existing: &mut Vec<Transaction>,
    incoming: impl IntoIterator<Item = Transaction>,
) -> usize {
    let mut seen: HashSet<String> = existing.iter().map(|tx| tx.id.clone()).collect();
    let before = existing.len();
    for tx in incoming {
        if seen.insert(tx.id.clone()) {
            existing.push(tx);
        }
    }
    existing.len() - before
}

/// The `limit` most recently received messages, newest first.
pub fn most_recent(messages: &[RawMessage], limit: usize) -> Vec<RawMessage> {
    let mut sorted = messages.to_vec();
    sorted.sort_by(|a, b| b.received_at_millis().cmp(&a.received_at_millis()));
    sorted.truncate(limit);
    sorted
}
