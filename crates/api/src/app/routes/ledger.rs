use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Extension, Path, Query, rejection::QueryRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/buckets", get(list_buckets).post(create_bucket))
        .route("/buckets/sum", get(get_buckets_sum))
        .route("/buckets/:identifier", get(get_bucket))
        .route("/entries", get(get_ledger_entries).post(create_double_entries))
}

pub async fn create_bucket(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<dto::CreateBucketQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return errors::query_rejection(rejection),
    };
    let identifier = match dto::parse_bucket_identifier(query.identifier) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    if let Err(e) = services.create_bucket(&identifier) {
        return errors::domain_error_to_response(e);
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "message": format!("Bucket named \"{identifier}\" created successfully"),
        })),
    )
        .into_response()
}

pub async fn list_buckets(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    let items = services
        .buckets_list()
        .into_iter()
        .map(dto::bucket_to_json)
        .collect::<Vec<_>>();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn get_bucket(
    Extension(services): Extension<Arc<AppServices>>,
    Path(identifier): Path<String>,
) -> axum::response::Response {
    match services.bucket_get(&identifier) {
        Some(b) => (StatusCode::OK, Json(dto::bucket_to_json(b))).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "bucket not found"),
    }
}

pub async fn create_double_entries(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<dto::LoanIdQuery>, QueryRejection>,
    body: Bytes,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return errors::query_rejection(rejection),
    };
    let loan_id = match dto::parse_loan_id(query.loan_id.as_deref()) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let pairs = match dto::parse_pair_entries(&body) {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    let count = match services.post_double_entries(loan_id, &pairs) {
        Ok(c) => c,
        Err(e) => return errors::domain_error_to_response(e),
    };

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "message": format!("\"{count}\" ledger entries created successfully"),
        })),
    )
        .into_response()
}

pub async fn get_ledger_entries(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<dto::LoanIdQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return errors::query_rejection(rejection),
    };
    let loan_id = match dto::parse_loan_id(query.loan_id.as_deref()) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let entries = services.ledger_entries(loan_id);
    (StatusCode::OK, Json(serde_json::json!({ "entries": entries }))).into_response()
}

pub async fn get_buckets_sum(
    Extension(services): Extension<Arc<AppServices>>,
    params: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> axum::response::Response {
    let Query(params) = match params {
        Ok(q) => q,
        Err(rejection) => return errors::query_rejection(rejection),
    };
    let (loan_id, identifiers) = match dto::parse_sum_query(params) {
        Ok(q) => q,
        Err(resp) => return resp,
    };

    match services.buckets_sum(loan_id, &identifiers) {
        Ok(sums) => (StatusCode::OK, Json(serde_json::json!({ "entries": sums }))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
