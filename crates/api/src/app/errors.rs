use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use loanledger_core::DomainError;

/// Every domain error is a caller mistake: always `400`.
pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    let code = match &err {
        DomainError::InvalidIdentifier(_) => "invalid_identifier",
        DomainError::InvalidPairValue(_) => "invalid_pair_value",
        DomainError::InvalidDate(_) => "invalid_date",
    };
    json_error(StatusCode::BAD_REQUEST, code, err.message())
}

/// Malformed or missing request input.
pub fn validation_error(message: impl Into<String>) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "validation_error", message)
}

/// Query strings axum could not decode (duplicate or mistyped keys).
pub fn query_rejection(rejection: QueryRejection) -> axum::response::Response {
    validation_error(rejection.body_text())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
