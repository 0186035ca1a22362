//! Settings API endpoints - JSON API
//!
//! The receipt setting is a singleton document: reads return stored
//! values or defaults, writes are upserts with last-writer-wins.

use crate::AppState;
use feeweb_core::ReceiptSetting;

/// Get the receipt setting, or defaults if none was stored (JSON API)
pub async fn api_receipt_setting(state: axum::extract::State<AppState>) -> String {
    let store = state.store.read().await;
    serde_json::to_string(&store.receipt_setting()).unwrap_or_default()
}

/// Upsert the receipt setting (JSON API).
///
/// Missing body fields fall back to their defaults, so a partial update
/// is equivalent to resetting the omitted fields.
pub async fn api_receipt_setting_update(
    state: axum::extract::State<AppState>,
    body: axum::Json<ReceiptSetting>,
) -> String {
    let mut store = state.store.write().await;
    let stored = store.update_receipt_setting(body.0);
    log::info!(
        target: "feeweb::api",
        "receipt setting updated: {} masked fee head(s), mask name '{}'",
        stored.masked_fee_head_ids.len(),
        stored.mask_name
    );
    serde_json::to_string(&stored).unwrap_or_default()
}
