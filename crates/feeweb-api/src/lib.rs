//! HTTP JSON API server for the fee ledger
//!
//! Routes are organized into modules:
//! - routes::transactions: collection writes and filtered queries
//! - routes::demands: bulk upload and per-student demand list
//! - routes::ledger: reconciled/masked student ledger views
//! - routes::reports: collection reports and dashboard summary
//! - routes::settings: receipt display configuration

pub mod error;
pub mod routes;

use axum::{
    routing::{get, post, put},
    Router,
};
use feeweb_config::Config;
use feeweb_core::error::{DefaultErrorLogger, ErrorContext, ErrorLogger};
use feeweb_core::{CoreError, FeeLedger};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<FeeLedger>>,
    pub config: Config,
}

/// JSON error envelope for a core error, logged on the way out
pub(crate) fn error_body(error: &CoreError, operation: &str) -> String {
    DefaultErrorLogger.log_error(error, &ErrorContext::new(operation.to_string()));
    serde_json::to_string(&serde_json::json!({ "error": error.to_details() }))
        .unwrap_or_default()
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::demands::{api_demand_upload, api_demands};
    use routes::ledger::api_student_ledger;
    use routes::reports::{api_collection_report, api_dashboard};
    use routes::settings::{api_receipt_setting, api_receipt_setting_update};
    use routes::transactions::{api_transaction_detail, api_transaction_store, api_transactions};

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/summary", get(api_summary))
        .route("/api/transactions", get(api_transactions))
        .route("/api/transactions", post(api_transaction_store))
        .route("/api/transactions/:id", get(api_transaction_detail))
        .route("/api/demands", get(api_demands))
        .route("/api/demands/upload", post(api_demand_upload))
        .route("/api/students/:id/ledger", get(api_student_ledger))
        .route("/api/reports/collection", get(api_collection_report))
        .route("/api/reports/dashboard", get(api_dashboard))
        .route("/api/settings/receipt", get(api_receipt_setting))
        .route("/api/settings/receipt", put(api_receipt_setting_update))
        .route("/api/reload", post(api_reload))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Get store summary counts (JSON API)
async fn api_summary(state: axum::extract::State<AppState>) -> String {
    let store = state.store.read().await;
    let summary = store.summary();
    serde_json::to_string(&summary).unwrap_or_default()
}

/// Reload the store from its seed file (JSON API)
async fn api_reload(state: axum::extract::State<AppState>) -> String {
    let mut store = state.store.write().await;
    match store.reload().await {
        Ok(_) => r#"{"success": true, "message": "store reloaded"}"#.to_string(),
        Err(e) => error_body(&e, "reload"),
    }
}

/// Start the HTTP server
///
/// This is the main entry point for the feeweb server. It creates the
/// router, binds to the address, and starts listening for requests.
///
/// # Arguments
///
/// * `config` - The application configuration
/// * `store` - The shared fee ledger state
pub async fn start_server(config: Config, store: Arc<RwLock<FeeLedger>>) {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState { store, config };

    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await.unwrap();
    eprintln!("[INFO] Starting feeweb server on http://{}", addr);
    eprintln!("[INFO] Available routes:");
    eprintln!("[INFO]   - /api/transactions (Collections and queries)");
    eprintln!("[INFO]   - /api/demands (Demand uploads)");
    eprintln!("[INFO]   - /api/students/:id/ledger (Reconciled ledger)");
    eprintln!("[INFO]   - /api/reports/* (Collection reports, dashboard)");
    eprintln!("[INFO]   - /api/settings/receipt (Receipt configuration)");

    match axum::serve(listener, router).await {
        Ok(_) => eprintln!("[INFO] Server stopped gracefully"),
        Err(e) => eprintln!("[ERROR] Server error: {}", e),
    }
}
