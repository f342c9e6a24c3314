//! Backing stores for buckets and the ledger.
//!
//! Stores are plain containers. Serialisation of access is the job of
//! [`crate::book::SharedLedgerBook`], which keeps both stores behind one lock.

pub mod in_memory;

pub use in_memory::{InMemoryBucketStore, InMemoryLedgerStore};

use loanledger_accounting::{AccountingBucket, Ledger};

/// Live set of accounting buckets, in creation order.
pub trait BucketStore: Send + Sync {
    fn all(&self) -> &[AccountingBucket];
    /// Mutable view for balance updates; the set itself cannot change through it.
    fn all_mut(&mut self) -> &mut [AccountingBucket];
    fn add(&mut self, bucket: AccountingBucket);
}

/// Holder of the live ledger.
pub trait LedgerStore: Send + Sync {
    fn get(&self) -> &Ledger;
    fn get_mut(&mut self) -> &mut Ledger;
}
