use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use loanledger_accounting::{AccountingBucket, Ledger, LedgerEntry, PairEntry, PostingEngine};
use loanledger_core::{DomainResult, LoanId};

use crate::store::{BucketStore, InMemoryBucketStore, InMemoryLedgerStore, LedgerStore};

/// One bucket store plus one ledger store: the full mutable state of a ledger
/// deployment.
#[derive(Debug, Default)]
pub struct LedgerBook<B = InMemoryBucketStore, L = InMemoryLedgerStore> {
    buckets: B,
    ledger: L,
}

impl LedgerBook {
    pub fn in_memory() -> Self {
        Self::new(InMemoryBucketStore::new(), InMemoryLedgerStore::new())
    }
}

impl<B, L> LedgerBook<B, L>
where
    B: BucketStore,
    L: LedgerStore,
{
    pub fn new(buckets: B, ledger: L) -> Self {
        Self { buckets, ledger }
    }

    pub fn buckets(&self) -> &[AccountingBucket] {
        self.buckets.all()
    }

    pub fn bucket(&self, identifier: &str) -> Option<&AccountingBucket> {
        PostingEngine::find_bucket(identifier, self.buckets.all())
    }

    pub fn ledger(&self) -> &Ledger {
        self.ledger.get()
    }

    /// Validates and stores a new bucket.
    pub fn create_bucket(&mut self, engine: &PostingEngine, identifier: &str) -> DomainResult<()> {
        let bucket = engine.create_bucket(identifier, self.buckets.all())?;
        self.buckets.add(bucket);
        tracing::debug!(identifier, "bucket stored");
        Ok(())
    }

    /// Posts a batch of pairs and appends the resulting entries. Returns the
    /// number of entries appended.
    pub fn post_double_entries(
        &mut self,
        engine: &PostingEngine,
        loan_id: LoanId,
        pairs: &[PairEntry],
    ) -> DomainResult<usize> {
        let entries = engine.create_double_entries(loan_id, pairs, self.buckets.all_mut())?;
        let count = entries.len();
        self.ledger.get_mut().add_new_entries(entries);
        tracing::debug!(%loan_id, count, total = self.ledger.get().len(), "entries appended");
        Ok(count)
    }

    pub fn ledger_entries(&self, loan_id: LoanId) -> Vec<LedgerEntry> {
        PostingEngine::get_ledger_entries(loan_id, self.ledger.get())
    }

    pub fn buckets_sum<S: AsRef<str>>(
        &self,
        loan_id: LoanId,
        identifiers: &[S],
    ) -> DomainResult<BTreeMap<String, f64>> {
        PostingEngine::get_buckets_sum(loan_id, identifiers, self.buckets.all(), self.ledger.get())
    }
}

/// A [`LedgerBook`] behind a single reader/writer lock.
///
/// Writers hold the lock across validate, balance update and ledger append,
/// so readers never observe balances without their entries.
#[derive(Debug, Default)]
pub struct SharedLedgerBook<B = InMemoryBucketStore, L = InMemoryLedgerStore> {
    inner: RwLock<LedgerBook<B, L>>,
}

impl<B, L> SharedLedgerBook<B, L>
where
    B: BucketStore,
    L: LedgerStore,
{
    pub fn new(book: LedgerBook<B, L>) -> Self {
        Self {
            inner: RwLock::new(book),
        }
    }

    // Writes validate before mutating, so a poisoned lock still guards a
    // consistent book.
    pub fn read(&self) -> RwLockReadGuard<'_, LedgerBook<B, L>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, LedgerBook<B, L>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
