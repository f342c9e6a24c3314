//! Infrastructure layer: backing stores and the serialised ledger book.

pub mod book;
pub mod store;

pub use book::{LedgerBook, SharedLedgerBook};
pub use store::{BucketStore, InMemoryBucketStore, InMemoryLedgerStore, LedgerStore};
