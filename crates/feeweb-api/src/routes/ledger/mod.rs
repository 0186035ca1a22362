//! Ledger routes - reconciled (and masked) student ledger views

pub mod api;

pub use api::api_student_ledger;
