//! SMS transaction classification.
//!
//! Raw inbox messages go through a relevance gate, then an ordered table of
//! provider extractors; the first one that finds an amount wins and the
//! result is assembled into a [`duka_core::Transaction`] with a
//! content-derived id. Everything here is synchronous and free of I/O.

pub mod assemble;
pub mod classifier;
pub mod options;
pub(crate) mod patterns;
pub mod provider;
pub mod scan;

pub use assemble::assemble;
pub use classifier::{classify, classify_with, is_relevant, ClassifiedFields, ExtractError};
pub use options::{ClassifyOptions, OptionsError};
pub use scan::{merge_by_id, most_recent, scan, scan_with, ScanReport};
