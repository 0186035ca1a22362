//! Transaction routes - collection/concession writes and filtered queries
//!
//! Features:
//! - Record a collection (Debit) or concession (Credit), append-only
//! - List transactions filtered by student/cashier/fee head/college/date
//! - Single transaction lookup by id

pub mod api;

pub use api::{api_transaction_detail, api_transaction_store, api_transactions};
