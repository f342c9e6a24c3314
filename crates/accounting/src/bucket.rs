use serde::{Deserialize, Serialize};

/// Named running-balance accumulator.
///
/// `debit` only grows (non-negative postings), `credit` only shrinks
/// (negative postings). The net balance is `debit + credit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountingBucket {
    identifier: String,
    debit: f64,
    credit: f64,
}

impl AccountingBucket {
    /// New bucket with zero balances. Identifier validation belongs to the
    /// posting engine.
    pub fn create(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            debit: 0.0,
            credit: 0.0,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn debit(&self) -> f64 {
        self.debit
    }

    pub fn credit(&self) -> f64 {
        self.credit
    }

    /// Net balance.
    pub fn sum(&self) -> f64 {
        self.debit + self.credit
    }

    /// Posts one value: positive goes to debit, negative to credit, zero is a no-op.
    pub fn add_value(&mut self, value: f64) {
        if value > 0.0 {
            self.debit += value;
        } else if value < 0.0 {
            self.credit += value;
        }
    }
}
