//! Route modules for the API server
//!
//! All routes are organized into modules for better maintainability:
//! - transactions: collection/concession writes, filtered queries
//! - demands: bulk upload, per-student demand list
//! - ledger: reconciled (and masked) student ledger views
//! - reports: collection reports and the dashboard summary
//! - settings: receipt display configuration
//!
//! Each module follows a consistent structure:
//! - mod.rs: Module declaration and exports
//! - api.rs: JSON API endpoints

pub mod transactions;
pub mod demands;
pub mod ledger;
pub mod reports;
pub mod settings;
