use std::collections::BTreeMap;

use loanledger_accounting::{AccountingBucket, LedgerEntry, PairEntry, PostingEngine};
use loanledger_core::{DomainResult, LoanId};
use loanledger_infra::{LedgerBook, SharedLedgerBook};

use crate::config::AppConfig;

/// Process-wide ledger state plus the rules applied to it.
///
/// Every write holds the book's write lock from validation to append.
#[derive(Debug)]
pub struct AppServices {
    engine: PostingEngine,
    book: SharedLedgerBook,
}

pub fn build_services(config: &AppConfig) -> AppServices {
    let engine = PostingEngine::new(config.identifier_limits);
    let limits = engine.limits();
    tracing::info!(
        min_identifier_length = limits.min,
        max_identifier_length = limits.max,
        "posting engine ready"
    );
    AppServices::new(engine)
}

impl AppServices {
    pub fn new(engine: PostingEngine) -> Self {
        Self {
            engine,
            book: SharedLedgerBook::new(LedgerBook::in_memory()),
        }
    }

    pub fn create_bucket(&self, identifier: &str) -> DomainResult<()> {
        let result = self.book.write().create_bucket(&self.engine, identifier);
        match &result {
            Ok(()) => tracing::info!(identifier, "bucket created"),
            Err(e) => tracing::warn!(identifier, error = %e, "bucket rejected"),
        }
        result
    }

    pub fn post_double_entries(&self, loan_id: LoanId, pairs: &[PairEntry]) -> DomainResult<usize> {
        let result = self
            .book
            .write()
            .post_double_entries(&self.engine, loan_id, pairs);
        match &result {
            Ok(count) => tracing::info!(%loan_id, pairs = pairs.len(), entries = count, "entries posted"),
            Err(e) => tracing::warn!(%loan_id, pairs = pairs.len(), error = %e, "posting rejected"),
        }
        result
    }

    pub fn ledger_entries(&self, loan_id: LoanId) -> Vec<LedgerEntry> {
        let entries = self.book.read().ledger_entries(loan_id);
        tracing::debug!(%loan_id, count = entries.len(), "ledger entries queried");
        entries
    }

    pub fn buckets_sum(&self, loan_id: LoanId, identifiers: &[String]) -> DomainResult<BTreeMap<String, f64>> {
        let result = self.book.read().buckets_sum(loan_id, identifiers);
        if let Err(e) = &result {
            tracing::warn!(%loan_id, error = %e, "bucket sum rejected");
        }
        result
    }

    pub fn buckets_list(&self) -> Vec<AccountingBucket> {
        self.book.read().buckets().to_vec()
    }

    pub fn bucket_get(&self, identifier: &str) -> Option<AccountingBucket> {
        self.book.read().bucket(identifier).cloned()
    }
}

#[cfg(test)]
mod tests {
    use loanledger_accounting::IdentifierLimits;

    use super::*;

    #[test]
    fn configured_limits_reach_bucket_creation() {
        let config = AppConfig {
            identifier_limits: IdentifierLimits::new(3, 5),
            ..AppConfig::default()
        };
        let services = build_services(&config);
        assert!(services.create_bucket("ab").is_err());
        assert!(services.create_bucket("abcdef").is_err());
        services.create_bucket("cash").unwrap();
        assert_eq!(services.buckets_list().len(), 1);
    }
}
