//! Posting engine: identifier and pair validation, bucket creation, balanced
//! double-entry posting and aggregate queries.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use loanledger_core::{Clock, DomainError, DomainResult, LoanId, SystemClock};

use crate::bucket::AccountingBucket;
use crate::ledger::{EntryFilter, Ledger, LedgerEntry};

const UNKNOWN_BUCKET: &str = "Please provide a bucket identifier which is already created";
const DUPLICATE_BUCKET: &str = "Duplicate bucket identifier found, please provide a unique value";
const UNBALANCED_PAIR: &str = "Debit value must be positive, credit value must be negative \
     and the absolute value must be equal to each other";
const BAD_DATE: &str = "Effective date value must be a string with YYYY-MM-DD format";

/// Inclusive bounds on bucket identifier length, in characters.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct IdentifierLimits {
    pub min: usize,
    pub max: usize,
}

impl IdentifierLimits {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn allows(&self, identifier: &str) -> bool {
        let len = identifier.chars().count();
        self.min <= len && len <= self.max
    }
}

impl Default for IdentifierLimits {
    fn default() -> Self {
        Self { min: 1, max: 128 }
    }
}

/// One side of a pair instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntrySide {
    pub identifier: String,
    pub value: f64,
}

/// A debit/credit instruction, as submitted by a caller.
///
/// `effective_date` is raw `YYYY-MM-DD` text; absent or empty means "today".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairEntry {
    pub debit: EntrySide,
    pub credit: EntrySide,
    #[serde(default)]
    pub effective_date: Option<String>,
}

impl PairEntry {
    pub fn new(debit: EntrySide, credit: EntrySide) -> Self {
        Self {
            debit,
            credit,
            effective_date: None,
        }
    }

    pub fn effective_on(mut self, date: impl Into<String>) -> Self {
        self.effective_date = Some(date.into());
        self
    }
}

/// A pair that passed every check, with its buckets resolved to positions.
struct ResolvedPair {
    effective_date: NaiveDate,
    debit: (usize, f64),
    credit: (usize, f64),
}

pub struct PostingEngine {
    limits: IdentifierLimits,
    clock: Arc<dyn Clock>,
}

impl core::fmt::Debug for PostingEngine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PostingEngine")
            .field("limits", &self.limits)
            .finish_non_exhaustive()
    }
}

impl Default for PostingEngine {
    fn default() -> Self {
        Self::new(IdentifierLimits::default())
    }
}

impl PostingEngine {
    /// Engine reading "today" from the system clock.
    pub fn new(limits: IdentifierLimits) -> Self {
        Self::with_clock(limits, Arc::new(SystemClock))
    }

    pub fn with_clock(limits: IdentifierLimits, clock: Arc<dyn Clock>) -> Self {
        Self { limits, clock }
    }

    pub fn limits(&self) -> IdentifierLimits {
        self.limits
    }

    pub fn is_valid_new_identifier(&self, identifier: &str, buckets: &[AccountingBucket]) -> bool {
        self.limits.allows(identifier) && !Self::is_bucket_present(identifier, buckets)
    }

    pub fn is_bucket_present(identifier: &str, buckets: &[AccountingBucket]) -> bool {
        Self::find_bucket(identifier, buckets).is_some()
    }

    pub fn find_bucket<'a>(
        identifier: &str,
        buckets: &'a [AccountingBucket],
    ) -> Option<&'a AccountingBucket> {
        buckets.iter().find(|b| b.identifier() == identifier)
    }

    /// Balance rule: debit non-negative, credit non-positive, equal magnitudes.
    pub fn is_valid_pair_value(debit_value: f64, credit_value: f64) -> bool {
        if !debit_value.is_finite() || !credit_value.is_finite() {
            return false;
        }
        if debit_value < 0.0 || credit_value > 0.0 {
            return false;
        }
        debit_value.abs() == credit_value.abs()
    }

    /// Validates `identifier` and returns a fresh zero-balance bucket. The
    /// caller persists it.
    pub fn create_bucket(
        &self,
        identifier: &str,
        buckets: &[AccountingBucket],
    ) -> DomainResult<AccountingBucket> {
        if !self.limits.allows(identifier) {
            return Err(DomainError::invalid_identifier(format!(
                "Bucket identifier must be between {} and {} characters long",
                self.limits.min, self.limits.max
            )));
        }
        if Self::is_bucket_present(identifier, buckets) {
            return Err(DomainError::invalid_identifier(DUPLICATE_BUCKET));
        }
        Ok(AccountingBucket::create(identifier))
    }

    /// Posts `value` to the named bucket and returns the resulting entry.
    ///
    /// `effective_date` defaults to today; `created_at` is always today.
    pub fn create_ledger_entry(
        &self,
        loan_id: LoanId,
        identifier: &str,
        value: f64,
        effective_date: Option<NaiveDate>,
        buckets: &mut [AccountingBucket],
    ) -> DomainResult<LedgerEntry> {
        let idx = Self::position(identifier, buckets)?;
        let today = self.clock.today();
        Ok(post(
            &mut buckets[idx],
            loan_id,
            value,
            effective_date.unwrap_or(today),
            today,
        ))
    }

    /// Converts pair instructions into interleaved `[debit, credit, ...]`
    /// entries, updating bucket balances.
    ///
    /// All-or-nothing: every pair is checked first (date, balance, debit
    /// bucket, credit bucket, in that order) and the first failure is returned
    /// with no bucket touched. Appending the entries to a ledger is the
    /// caller's job.
    pub fn create_double_entries(
        &self,
        loan_id: LoanId,
        pair_entries: &[PairEntry],
        buckets: &mut [AccountingBucket],
    ) -> DomainResult<Vec<LedgerEntry>> {
        let today = self.clock.today();

        let resolved = pair_entries
            .iter()
            .map(|pair| Self::resolve_pair(pair, &*buckets, today))
            .collect::<DomainResult<Vec<_>>>()?;

        let mut entries = Vec::with_capacity(resolved.len() * 2);
        for pair in resolved {
            for (idx, value) in [pair.debit, pair.credit] {
                entries.push(post(
                    &mut buckets[idx],
                    loan_id,
                    value,
                    pair.effective_date,
                    today,
                ));
            }
        }
        Ok(entries)
    }

    /// All entries of a loan, in ledger order.
    pub fn get_ledger_entries(loan_id: LoanId, ledger: &Ledger) -> Vec<LedgerEntry> {
        ledger.entries_for_loan(loan_id).cloned().collect()
    }

    /// Per-identifier sum of entry values for one loan.
    ///
    /// Fails on the first unknown identifier; no partial result.
    pub fn get_buckets_sum<S: AsRef<str>>(
        loan_id: LoanId,
        identifiers: &[S],
        buckets: &[AccountingBucket],
        ledger: &Ledger,
    ) -> DomainResult<BTreeMap<String, f64>> {
        let mut sums = BTreeMap::new();
        for identifier in identifiers {
            let identifier = identifier.as_ref();
            if !Self::is_bucket_present(identifier, buckets) {
                return Err(DomainError::invalid_identifier(
                    "Please provide a valid bucket identifier",
                ));
            }
            let filter = EntryFilter::loan(loan_id).with_identifier(identifier);
            // Float `sum` of nothing is -0.0.
            let sum = ledger.get_entries(&filter).fold(0.0, |acc, e| acc + e.value());
            sums.insert(identifier.to_string(), sum);
        }
        Ok(sums)
    }

    fn position(identifier: &str, buckets: &[AccountingBucket]) -> DomainResult<usize> {
        buckets
            .iter()
            .position(|b| b.identifier() == identifier)
            .ok_or_else(|| DomainError::invalid_identifier(UNKNOWN_BUCKET))
    }

    fn resolve_pair(
        pair: &PairEntry,
        buckets: &[AccountingBucket],
        today: NaiveDate,
    ) -> DomainResult<ResolvedPair> {
        let effective_date = parse_effective_date(pair.effective_date.as_deref(), today)?;

        if !Self::is_valid_pair_value(pair.debit.value, pair.credit.value) {
            return Err(DomainError::invalid_pair_value(UNBALANCED_PAIR));
        }

        let debit = Self::position(&pair.debit.identifier, buckets)?;
        let credit = Self::position(&pair.credit.identifier, buckets)?;

        Ok(ResolvedPair {
            effective_date,
            debit: (debit, pair.debit.value),
            credit: (credit, pair.credit.value),
        })
    }
}

/// Absent or empty means `today`; anything else must be `YYYY-MM-DD`.
pub fn parse_effective_date(raw: Option<&str>, today: NaiveDate) -> DomainResult<NaiveDate> {
    match raw {
        None | Some("") => Ok(today),
        Some(s) if is_iso_date_shape(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| DomainError::invalid_date(BAD_DATE)),
        Some(_) => Err(DomainError::invalid_date(BAD_DATE)),
    }
}

// chrono alone tolerates signs, padding and single-digit fields.
fn is_iso_date_shape(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b.iter().enumerate().all(|(i, c)| match i {
            4 | 7 => *c == b'-',
            _ => c.is_ascii_digit(),
        })
}

fn post(
    bucket: &mut AccountingBucket,
    loan_id: LoanId,
    value: f64,
    effective_date: NaiveDate,
    created_at: NaiveDate,
) -> LedgerEntry {
    bucket.add_value(value);
    LedgerEntry::new(loan_id, created_at, effective_date, bucket.identifier(), value)
}
