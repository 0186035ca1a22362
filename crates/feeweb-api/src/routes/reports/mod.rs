//! Report routes - collection reports and the dashboard summary

pub mod api;

pub use api::{api_collection_report, api_dashboard};
