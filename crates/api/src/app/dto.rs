use serde::Deserialize;

use loanledger_accounting::{AccountingBucket, EntrySide, PairEntry};
use loanledger_core::LoanId;

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Default, Deserialize)]
pub struct LoanIdQuery {
    pub loan_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateBucketQuery {
    pub identifier: Option<String>,
}

/// One element of the `POST /ledger/entries` body. Fields stay optional so
/// missing parts get a precise message instead of a generic decode failure.
#[derive(Debug, Deserialize)]
pub struct PairEntryRequest {
    pub debit: Option<EntrySideRequest>,
    pub credit: Option<EntrySideRequest>,
    pub effective_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EntrySideRequest {
    pub identifier: Option<String>,
    pub value: Option<serde_json::Value>,
}

// -------------------------
// Input validation
// -------------------------

/// Loan ids are positive integers.
pub fn parse_loan_id(raw: Option<&str>) -> Result<LoanId, axum::response::Response> {
    raw.and_then(|s| s.parse::<LoanId>().ok())
        .filter(|id| id.get() > 0)
        .ok_or_else(|| errors::validation_error("Please enter a valid integer loan id"))
}

pub fn parse_bucket_identifier(raw: Option<String>) -> Result<String, axum::response::Response> {
    raw.filter(|s| !s.is_empty())
        .ok_or_else(|| errors::validation_error("Please enter a valid string bucket identifier"))
}

/// Splits `loan_id` and repeated `bucket_id` out of a raw query.
pub fn parse_sum_query(
    params: Vec<(String, String)>,
) -> Result<(LoanId, Vec<String>), axum::response::Response> {
    let mut loan_id = None;
    let mut bucket_ids = Vec::new();
    for (key, value) in params {
        match key.as_str() {
            "loan_id" => loan_id = Some(value),
            "bucket_id" if !value.is_empty() => bucket_ids.push(value),
            _ => {}
        }
    }

    let loan_id = parse_loan_id(loan_id.as_deref())?;
    if bucket_ids.is_empty() {
        return Err(errors::validation_error(
            "Please enter at least one valid string bucket identifier",
        ));
    }
    Ok((loan_id, bucket_ids))
}

pub fn parse_pair_entries(body: &[u8]) -> Result<Vec<PairEntry>, axum::response::Response> {
    let requests: Vec<PairEntryRequest> = serde_json::from_slice(body).map_err(|_| {
        errors::validation_error(
            "Request body must be a JSON array of {debit, credit, effective_date} objects",
        )
    })?;
    requests.into_iter().map(to_pair_entry).collect()
}

fn to_pair_entry(req: PairEntryRequest) -> Result<PairEntry, axum::response::Response> {
    let (Some(debit), Some(credit)) = (req.debit, req.credit) else {
        return Err(errors::validation_error(
            "Each entry must contain both debit and credit values",
        ));
    };

    Ok(PairEntry {
        debit: to_entry_side(debit)?,
        credit: to_entry_side(credit)?,
        effective_date: req.effective_date,
    })
}

fn to_entry_side(req: EntrySideRequest) -> Result<EntrySide, axum::response::Response> {
    let identifier = req
        .identifier
        .filter(|s| !s.is_empty())
        .ok_or_else(|| errors::validation_error("Each debit and credit needs a string bucket identifier"))?;

    let value = match req.value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        _ => None,
    }
    .ok_or_else(|| errors::validation_error("Each debit and credit value must be a floating point value"))?;

    Ok(EntrySide { identifier, value })
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn bucket_to_json(b: AccountingBucket) -> serde_json::Value {
    serde_json::json!({
        "identifier": b.identifier(),
        "debit": b.debit(),
        "credit": b.credit(),
        "sum": b.sum(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loan_id_must_be_a_positive_integer() {
        assert_eq!(parse_loan_id(Some("123")).unwrap(), LoanId::new(123));
        assert!(parse_loan_id(None).is_err());
        assert!(parse_loan_id(Some("")).is_err());
        assert!(parse_loan_id(Some("test-loan-id")).is_err());
        assert!(parse_loan_id(Some("0")).is_err());
        assert!(parse_loan_id(Some("-4")).is_err());
    }

    #[test]
    fn pair_body_is_mapped() {
        let body = br#"[
            {"effective_date": "2021-01-21",
             "debit": {"identifier": "d", "value": 123.0},
             "credit": {"identifier": "c", "value": -123}}
        ]"#;
        let pairs = parse_pair_entries(body).unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].debit.value, 123.0);
        assert_eq!(pairs[0].credit.value, -123.0);
        assert_eq!(pairs[0].effective_date.as_deref(), Some("2021-01-21"));
    }

    #[test]
    fn malformed_pair_bodies_are_rejected() {
        let bodies: [&[u8]; 5] = [
            b"",
            b"{}",
            br#"[{"debit": {"identifier": "d", "value": 1.0}}]"#,
            br#"[{"debit": {"identifier": "d", "value": "1.0"}, "credit": {"identifier": "c", "value": "-1.0"}}]"#,
            br#"[{"debit": {"value": 1.0}, "credit": {"identifier": "c", "value": -1.0}}]"#,
        ];
        for body in bodies {
            assert!(parse_pair_entries(body).is_err());
        }
    }

    #[test]
    fn sum_query_needs_loan_and_buckets() {
        let params = |v: &[(&str, &str)]| {
            v.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<Vec<_>>()
        };
        let (loan, ids) = parse_sum_query(params(&[
            ("loan_id", "9"),
            ("bucket_id", "cash"),
            ("bucket_id", "income-interest"),
        ]))
        .unwrap();
        assert_eq!(loan, LoanId::new(9));
        assert_eq!(ids, vec!["cash", "income-interest"]);

        assert!(parse_sum_query(params(&[("loan_id", "9")])).is_err());
        assert!(parse_sum_query(params(&[("bucket_id", "cash")])).is_err());
    }
}
