use std::sync::OnceLock;

use regex::Regex;

pub const MPESA: &str = "M-Pesa";
pub const AIRTEL_MONEY: &str = "Airtel Money";
pub const TKASH: &str = "T-Kash";
pub const EQUITY_BANK: &str = "Equity Bank";
pub const KCB: &str = "KCB";
pub const UNKNOWN_BANK: &str = "Unknown Bank";

/// Fallback sender for mobile-money airtime top-ups.
pub const AIRTIME_PURCHASE: &str = "Airtime Purchase";
/// Fallback sender for bank messages without a readable counterparty.
pub const UNKNOWN_PARTY: &str = "Unknown";

/// `"{provider} Customer"`, the mobile-money fallback sender.
pub fn customer_placeholder(provider: &str) -> String {
    format!("{provider} Customer")
}

/// Keyword → display label, first hit wins.
const BANK_LABELS: &[(&str, &str)] = &[
    (r"(?i)\bco-?op(?:erative)?\b", "Co-operative Bank"),
    (r"(?i)\bequity\b", EQUITY_BANK),
    (r"(?i)\bkcb\b", KCB),
    (r"(?i)\bncba\b", "NCBA Bank"),
    (r"(?i)\babsa\b", "Absa Bank"),
    (r"(?i)\bstanbic\b", "Stanbic Bank"),
    (r"(?i)\b(?:standard\s+chartered|stanchart)\b", "Standard Chartered"),
    (r"(?i)\bfamily\s+bank\b", "Family Bank"),
    (r"(?i)\b(?:dtb|diamond\s+trust)\b", "DTB"),
    (r"(?i)\bi&m\b", "I&M Bank"),
];

fn bank_label_table() -> &'static [(Regex, &'static str)] {
    static T: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    T.get_or_init(|| {
        BANK_LABELS
            .iter()
            .map(|(pat, label)| (Regex::new(pat).expect("invalid regex"), *label))
            .collect()
    })
}

/// Picks the bank a generic alert came from by keyword.
pub fn detect_bank_label(body: &str) -> &'static str {
    bank_label_table()
        .iter()
        .find(|(re, _)| re.is_match(body))
        .map(|(_, label)| *label)
        .unwrap_or(UNKNOWN_BANK)
}
