//! Ledger API endpoints - JSON API
//!
//! Endpoints:
//! - api_student_ledger: Reconciled demand-vs-paid position for one
//!   student, optionally narrowed by fee head/year/semester and passed
//!   through the receipt mask

use crate::{error_body, AppState};
use axum::extract::Query;
use feeweb_core::LedgerScope;
use std::collections::HashMap;

/// Get the reconciled ledger for one student (JSON API).
///
/// Query parameters: `fee_head`, `year`, `semester` narrow the scope;
/// `masked=true` applies the receipt mask before responding.
pub async fn api_student_ledger(
    state: axum::extract::State<AppState>,
    path: axum::extract::Path<String>,
    params: Query<HashMap<String, String>>,
) -> String {
    let store = state.store.read().await;

    let scope = LedgerScope {
        student_id: path.0,
        fee_head_id: params.get("fee_head").cloned(),
        student_year: params.get("year").and_then(|s| s.parse().ok()),
        semester: params.get("semester").and_then(|s| s.parse().ok()),
    };

    let masked = params
        .get("masked")
        .map(|s| s == "true" || s == "1")
        .unwrap_or(false);

    let result = if masked {
        store.masked_ledger_for(&scope)
    } else {
        store.ledger_for(&scope)
    };

    match result {
        Ok(response) => serde_json::to_string(&response).unwrap_or_default(),
        Err(e) => error_body(&e, "student_ledger"),
    }
}
