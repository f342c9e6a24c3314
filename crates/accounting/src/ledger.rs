use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use loanledger_core::LoanId;

/// One value posted against one bucket for one loan (immutable).
///
/// Positive values are debit-side, non-positive values credit-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    loan_id: LoanId,
    created_at: NaiveDate,
    effective_date: NaiveDate,
    bucket_identifier: String,
    value: f64,
}

impl LedgerEntry {
    pub fn new(
        loan_id: LoanId,
        created_at: NaiveDate,
        effective_date: NaiveDate,
        bucket_identifier: impl Into<String>,
        value: f64,
    ) -> Self {
        Self {
            loan_id,
            created_at,
            effective_date,
            bucket_identifier: bucket_identifier.into(),
            value,
        }
    }

    pub fn loan_id(&self) -> LoanId {
        self.loan_id
    }

    /// Date the entry was committed.
    pub fn created_at(&self) -> NaiveDate {
        self.created_at
    }

    /// Date the movement is economically recognised.
    pub fn effective_date(&self) -> NaiveDate {
        self.effective_date
    }

    pub fn bucket_identifier(&self) -> &str {
        &self.bucket_identifier
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

/// Conjunctive entry filter. An absent loan id or an empty identifier set
/// matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFilter {
    pub loan_id: Option<LoanId>,
    pub identifiers: BTreeSet<String>,
}

impl EntryFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn loan(loan_id: LoanId) -> Self {
        Self {
            loan_id: Some(loan_id),
            identifiers: BTreeSet::new(),
        }
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifiers.insert(identifier.into());
        self
    }

    pub fn with_identifiers<I, S>(mut self, identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.identifiers.extend(identifiers.into_iter().map(Into::into));
        self
    }

    pub fn matches(&self, entry: &LedgerEntry) -> bool {
        let loan_ok = self.loan_id.is_none_or(|id| entry.loan_id == id);
        let identifier_ok =
            self.identifiers.is_empty() || self.identifiers.contains(&entry.bucket_identifier);
        loan_ok && identifier_ok
    }
}

/// Lazily filtered view over a ledger, in append order.
///
/// Cheap to clone: a clone restarts the same query from its current position.
#[derive(Debug, Clone)]
pub struct Entries<'a> {
    inner: std::slice::Iter<'a, LedgerEntry>,
    filter: &'a EntryFilter,
}

impl<'a> Iterator for Entries<'a> {
    type Item = &'a LedgerEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let filter = self.filter;
        self.inner.find(|e| filter.matches(e))
    }
}

/// Append-only, commit-ordered collection of ledger entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends entries, preserving their order.
    pub fn add_new_entries(&mut self, entries: impl IntoIterator<Item = LedgerEntry>) {
        self.entries.extend(entries);
    }

    pub fn get_all_entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn get_entries<'a>(&'a self, filter: &'a EntryFilter) -> Entries<'a> {
        Entries {
            inner: self.entries.iter(),
            filter,
        }
    }

    pub fn entries_for_loan(&self, loan_id: LoanId) -> impl Iterator<Item = &LedgerEntry> + Clone {
        self.entries.iter().filter(move |e| e.loan_id == loan_id)
    }

    pub fn entries_for_bucket<'a>(
        &'a self,
        identifier: &'a str,
    ) -> impl Iterator<Item = &'a LedgerEntry> + Clone {
        self.entries
            .iter()
            .filter(move |e| e.bucket_identifier == identifier)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
