//! Demand routes - bulk upload and per-student demand list

pub mod api;

pub use api::{api_demand_upload, api_demands};
