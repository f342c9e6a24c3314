//! Accounting module (double-entry posting against loan buckets).
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns.

pub mod bucket;
pub mod ledger;
pub mod posting;

pub use bucket::AccountingBucket;
pub use ledger::{Entries, EntryFilter, Ledger, LedgerEntry};
pub use posting::{parse_effective_date, EntrySide, IdentifierLimits, PairEntry, PostingEngine};
