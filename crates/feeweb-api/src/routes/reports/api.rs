//! Reports API endpoints - JSON API
//!
//! Endpoints:
//! - api_collection_report: Multi-dimensional collection report over a
//!   date range (group_by: day | cashier | feehead | mode)
//! - api_dashboard: Fixed-range totals, recent transactions, and top
//!   collections by college/course

use crate::error::ApiError;
use crate::{error_body, AppState};
use axum::extract::Query;
use chrono::NaiveDate;
use feeweb_core::{GroupBy, ReportRange};
use std::collections::HashMap;

/// Get a collection report (JSON API).
///
/// `start`/`end` (YYYY-MM-DD, inclusive) select a custom range; omitting
/// both selects all time. `group_by` defaults to `day`.
pub async fn api_collection_report(
    state: axum::extract::State<AppState>,
    params: Query<HashMap<String, String>>,
) -> String {
    let store = state.store.read().await;

    let group_by = match params
        .get("group_by")
        .map(|s| s.as_str())
        .unwrap_or("day")
        .parse::<GroupBy>()
    {
        Ok(group_by) => group_by,
        Err(message) => return ApiError::BadRequest { message }.to_body(),
    };

    let start = params.get("start").map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"));
    let end = params.get("end").map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"));

    let range = match (start, end) {
        (None, None) => ReportRange::default(),
        (Some(Ok(start)), Some(Ok(end))) => ReportRange::custom(start, end),
        _ => {
            return ApiError::BadRequest {
                message: "start and end must both be valid YYYY-MM-DD dates".to_string(),
            }
            .to_body()
        }
    };

    match store.collection_report(&range, group_by) {
        Ok(report) => serde_json::to_string(&report).unwrap_or_default(),
        Err(e) => error_body(&e, "collection_report"),
    }
}

/// Get the dashboard summary (JSON API)
pub async fn api_dashboard(state: axum::extract::State<AppState>) -> String {
    let store = state.store.read().await;
    let summary = store.dashboard_summary();
    serde_json::to_string(&summary).unwrap_or_default()
}
