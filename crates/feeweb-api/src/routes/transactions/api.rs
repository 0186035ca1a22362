//! Transactions API endpoints - JSON API
//!
//! Endpoints:
//! - api_transactions: Filtered transactions list (JSON)
//! - api_transaction_detail: Get single transaction (JSON)
//! - api_transaction_store: Record a collection/concession (JSON)

use crate::error::ApiError;
use crate::{error_body, AppState};
use axum::extract::Query;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use feeweb_core::{PayMode, Transaction, TransactionFilter, TransactionsResponse, TxnType};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

/// Get transactions with filters and pagination (JSON API)
pub async fn api_transactions(
    state: axum::extract::State<AppState>,
    params: Query<HashMap<String, String>>,
) -> String {
    let store = state.store.read().await;
    let per_page_default = state.config.pagination.records_per_page;
    let limit = params.get("limit").and_then(|s| s.parse().ok()).unwrap_or(per_page_default);
    let offset = params.get("offset").and_then(|s| s.parse().ok()).unwrap_or(0);

    let filter = TransactionFilter {
        student_id: params.get("student").cloned(),
        cashier_id: params.get("cashier").cloned(),
        fee_head_id: params.get("fee_head").cloned(),
        college: params.get("college").cloned(),
        start: params.get("start").and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()),
        end: params.get("end").and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()),
    };

    let all = store.filter_transactions(&filter);
    let total_count = all.len();
    let transactions: Vec<Transaction> = all.into_iter().skip(offset).take(limit).collect();

    let response = TransactionsResponse {
        transactions,
        total_count,
        page: offset / limit.max(1) + 1,
        per_page: limit,
    };
    serde_json::to_string(&response).unwrap_or_default()
}

/// Get single transaction detail (JSON API)
pub async fn api_transaction_detail(
    state: axum::extract::State<AppState>,
    path: axum::extract::Path<String>,
) -> String {
    let store = state.store.read().await;
    let transaction_id = path.0;

    match store.transaction(&transaction_id) {
        Some(txn) => serde_json::to_string(&txn).unwrap_or_default(),
        None => ApiError::NotFound {
            resource: format!("transaction {}", transaction_id),
        }
        .to_body(),
    }
}

/// Request body for recording a transaction
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub student_id: String,
    pub fee_head_id: String,
    #[serde(default = "default_student_year")]
    pub student_year: u8,
    #[serde(default)]
    pub semester: Option<u8>,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub txn_type: TxnType,
    pub mode: PayMode,
    pub cashier_id: String,
    pub college: String,
    /// Collection timestamp; defaults to the current time
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
    /// Receipt number; assigned by the store when absent
    #[serde(default)]
    pub receipt_no: Option<String>,
}

fn default_student_year() -> u8 {
    1
}

/// Record a collection or concession (append-only insert)
pub async fn api_transaction_store(
    state: axum::extract::State<AppState>,
    body: axum::Json<TransactionRequest>,
) -> String {
    let request = body.0;
    let txn = Transaction {
        id: String::new(),
        student_id: request.student_id,
        fee_head_id: request.fee_head_id,
        student_year: request.student_year,
        semester: request.semester,
        amount: request.amount,
        txn_type: request.txn_type,
        mode: request.mode,
        cashier_id: request.cashier_id,
        college: request.college,
        timestamp: request.timestamp.unwrap_or_else(|| Utc::now().naive_utc()),
        receipt_no: request.receipt_no.unwrap_or_default(),
    };

    let mut store = state.store.write().await;
    match store.record_transaction(txn) {
        Ok(stored) => {
            log::info!(
                target: "feeweb::api",
                "recorded {} {} for student {} (receipt {})",
                stored.txn_type,
                stored.amount,
                stored.student_id,
                stored.receipt_no
            );
            serde_json::to_string(&stored).unwrap_or_default()
        }
        Err(e) => error_body(&e, "transaction_store"),
    }
}
