//! Demands API endpoints - JSON API
//!
//! Endpoints:
//! - api_demands: Demands for one student (JSON)
//! - api_demand_upload: Bulk upload of raw demand/transaction rows with
//!   partial-failure reporting (JSON)

use crate::error::ApiError;
use crate::AppState;
use axum::extract::Query;
use feeweb_core::DemandsResponse;
use feeweb_ingest::RawBatch;
use std::collections::HashMap;

/// Get demands for one student (JSON API)
pub async fn api_demands(
    state: axum::extract::State<AppState>,
    params: Query<HashMap<String, String>>,
) -> String {
    let store = state.store.read().await;

    let student = match params.get("student") {
        Some(s) if !s.is_empty() => s,
        _ => {
            return ApiError::BadRequest {
                message: "missing query parameter 'student'".to_string(),
            }
            .to_body()
        }
    };

    let demands = store.demands_for(student);
    let response = DemandsResponse {
        total_count: demands.len(),
        demands,
    };
    serde_json::to_string(&response).unwrap_or_default()
}

/// Bulk upload of raw rows.
///
/// Rows are normalized individually; valid records are installed and
/// malformed rows come back in the `rejected` report so the caller can
/// decide whether to re-submit them.
pub async fn api_demand_upload(
    state: axum::extract::State<AppState>,
    body: axum::Json<RawBatch>,
) -> String {
    let normalized = feeweb_core::normalize(&body.0);

    let mut store = state.store.write().await;
    let accepted_demands = normalized.demands.len();
    let accepted_transactions = normalized.transactions.len();
    store.add_demands(normalized.demands);
    store.add_transactions(normalized.transactions);
    store.merge_directory(normalized.students, normalized.fee_heads);

    if !normalized.rejected.is_empty() {
        log::warn!(
            target: "feeweb::api",
            "upload: {} row(s) rejected",
            normalized.rejected.len()
        );
    }

    serde_json::to_string(&serde_json::json!({
        "accepted_demands": accepted_demands,
        "accepted_transactions": accepted_transactions,
        "rejected": normalized.rejected,
    }))
    .unwrap_or_default()
}
