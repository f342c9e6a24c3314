use loanledger_accounting::{AccountingBucket, Ledger};

use super::{BucketStore, LedgerStore};

/// In-memory bucket store (process lifetime only).
#[derive(Debug, Clone, Default)]
pub struct InMemoryBucketStore {
    buckets: Vec<AccountingBucket>,
}

impl InMemoryBucketStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BucketStore for InMemoryBucketStore {
    fn all(&self) -> &[AccountingBucket] {
        &self.buckets
    }

    fn all_mut(&mut self) -> &mut [AccountingBucket] {
        &mut self.buckets
    }

    fn add(&mut self, bucket: AccountingBucket) {
        self.buckets.push(bucket);
    }
}

/// In-memory ledger store (process lifetime only).
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedgerStore {
    ledger: Ledger,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerStore for InMemoryLedgerStore {
    fn get(&self) -> &Ledger {
        &self.ledger
    }

    fn get_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_store_keeps_creation_order() {
        let mut store = InMemoryBucketStore::new();
        store.add(AccountingBucket::create("b"));
        store.add(AccountingBucket::create("a"));
        let ids: Vec<&str> = store.all().iter().map(|b| b.identifier()).collect();
        assert_eq!(ids, vec!["b", "a"]);

        store.all_mut()[1].add_value(5.0);
        assert_eq!(store.all()[1].debit(), 5.0);
    }

    #[test]
    fn ledger_store_starts_empty() {
        let store = InMemoryLedgerStore::new();
        assert!(store.get().is_empty());
    }
}
