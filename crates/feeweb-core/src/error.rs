//! Error types for feeweb-core
//!
//! This module provides error handling for the ledger core, including
//! error codes, detailed messages, and suggestions.
//!
//! Unpaid demands and payments without a standing demand are valid ledger
//! states, not errors; nothing here represents them.

use thiserror::Error;
use serde::{Deserialize, Serialize};
use std::io;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Store not seeded yet
    NotLoaded,
    /// Reconciliation scope is structurally invalid
    InvalidScope,
    /// Report range exceeds the configured ceiling
    RangeTooLarge,
    /// Record rejected by store validation
    InvalidRecord,
    /// Seed data could not be loaded
    LoadError,
    /// IO error
    IoError,
    /// Internal error
    InternalError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::NotLoaded => write!(f, "NOT_LOADED"),
            ErrorCode::InvalidScope => write!(f, "INVALID_SCOPE"),
            ErrorCode::RangeTooLarge => write!(f, "RANGE_TOO_LARGE"),
            ErrorCode::InvalidRecord => write!(f, "INVALID_RECORD"),
            ErrorCode::LoadError => write!(f, "LOAD_ERROR"),
            ErrorCode::IoError => write!(f, "IO_ERROR"),
            ErrorCode::InternalError => write!(f, "INTERNAL_ERROR"),
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    /// Add detail information
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Debug information
    Debug,
    /// Informational
    Info,
    /// Warning - operation may be affected
    Warning,
    /// Error - operation failed
    Error,
    /// Critical - application may be unstable
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Debug => write!(f, "debug"),
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
            ErrorSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Main error type for feeweb-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Store not seeded")]
    NotLoaded,

    #[error("Invalid scope: {message}")]
    InvalidScope { message: String },

    #[error("Report range too large: {reason}")]
    RangeTooLarge { reason: String },

    #[error("Invalid record: {message}")]
    InvalidRecord { message: String },

    #[error("Load error: {message}")]
    LoadError { message: String },

    #[error("IO error occurred")]
    IoError,

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::NotLoaded => ErrorCode::NotLoaded,
            CoreError::InvalidScope { .. } => ErrorCode::InvalidScope,
            CoreError::RangeTooLarge { .. } => ErrorCode::RangeTooLarge,
            CoreError::InvalidRecord { .. } => ErrorCode::InvalidRecord,
            CoreError::LoadError { .. } => ErrorCode::LoadError,
            CoreError::IoError => ErrorCode::IoError,
            CoreError::InternalError { .. } => ErrorCode::InternalError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::NotLoaded => ErrorSeverity::Warning,
            CoreError::InvalidScope { .. } => ErrorSeverity::Warning,
            CoreError::RangeTooLarge { .. } => ErrorSeverity::Warning,
            CoreError::InvalidRecord { .. } => ErrorSeverity::Warning,
            CoreError::LoadError { .. } => ErrorSeverity::Error,
            CoreError::IoError => ErrorSeverity::Error,
            CoreError::InternalError { .. } => ErrorSeverity::Critical,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(
            self.code(),
            self.to_string(),
        );

        match self {
            CoreError::InvalidScope { message } => {
                details = details.with_detail(serde_json::json!({ "scope_message": message }));
                details = details.with_suggestion(
                    "Provide a non-empty studentId in the ledger scope.".to_string()
                );
            }
            CoreError::RangeTooLarge { reason } => {
                details = details.with_detail(serde_json::json!({ "limit": reason }));
                details = details.with_suggestion(
                    "Narrow the report date range and retry.".to_string()
                );
            }
            CoreError::InvalidRecord { message } => {
                details = details.with_detail(serde_json::json!({ "record_message": message }));
                details = details.with_suggestion(
                    "Check the record's ids, amount, and semester values.".to_string()
                );
            }
            CoreError::LoadError { message } => {
                details = details.with_detail(serde_json::json!({ "load_message": message }));
                details = details.with_suggestion(
                    "Check the seed file format against the upload schema.".to_string()
                );
            }
            _ => {}
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl From<io::Error> for CoreError {
    fn from(_error: io::Error) -> Self {
        CoreError::IoError
    }
}

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Request ID for tracing
    pub request_id: Option<String>,
    /// Operation being performed
    pub operation: String,
    /// Additional context data
    pub data: serde_json::Value,
}

impl ErrorContext {
    /// Create a new error context
    pub fn new(operation: String) -> Self {
        Self {
            request_id: None,
            operation,
            data: serde_json::json!({}),
        }
    }

    /// Add request ID
    pub fn with_request_id(mut self, request_id: String) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add context data
    pub fn with_data(mut self, key: &str, value: serde_json::Value) -> Self {
        self.data[key] = value;
        self
    }
}

/// Error logger trait
pub trait ErrorLogger {
    /// Log an error
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
    /// Log a warning
    fn log_warning(&self, message: &str, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        log::error!(
            target: "feeweb::error",
            "ERROR [{}] {} - Operation: {} - Request: {:?}",
            error.code(),
            error.to_details(),
            context.operation,
            context.request_id
        );
    }

    fn log_warning(&self, message: &str, context: &ErrorContext) {
        log::warn!(
            target: "feeweb::error",
            "WARNING: {} - Operation: {} - Request: {:?}",
            message,
            context.operation,
            context.request_id
        );
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::InvalidScope.to_string(), "INVALID_SCOPE");
        assert_eq!(ErrorCode::RangeTooLarge.to_string(), "RANGE_TOO_LARGE");
        assert_eq!(ErrorCode::NotLoaded.to_string(), "NOT_LOADED");
    }

    #[test]
    fn test_error_severity_display() {
        assert_eq!(ErrorSeverity::Warning.to_string(), "warning");
        assert_eq!(ErrorSeverity::Error.to_string(), "error");
        assert_eq!(ErrorSeverity::Critical.to_string(), "critical");
    }

    #[test]
    fn test_core_error_code() {
        let error = CoreError::InvalidScope { message: "missing studentId".to_string() };
        assert_eq!(error.code(), ErrorCode::InvalidScope);

        let error = CoreError::NotLoaded;
        assert_eq!(error.code(), ErrorCode::NotLoaded);
    }

    #[test]
    fn test_core_error_severity() {
        let error = CoreError::RangeTooLarge { reason: "400 days requested".to_string() };
        assert_eq!(error.severity(), ErrorSeverity::Warning);

        let error = CoreError::InternalError { message: "test".to_string() };
        assert_eq!(error.severity(), ErrorSeverity::Critical);

        let error = CoreError::IoError;
        assert_eq!(error.severity(), ErrorSeverity::Error);
    }

    #[test]
    fn test_error_details_invalid_scope() {
        let error = CoreError::InvalidScope {
            message: "missing studentId".to_string()
        };
        let details = error.to_details();

        assert_eq!(details.code, ErrorCode::InvalidScope);
        assert!(!details.suggestions.is_empty());
        assert!(details.message.contains("missing studentId"));
    }

    #[test]
    fn test_error_details_range_too_large() {
        let error = CoreError::RangeTooLarge {
            reason: "range covers 500 days, ceiling is 366".to_string()
        };
        let details = error.to_details();

        assert_eq!(details.code, ErrorCode::RangeTooLarge);
        assert!(details.details.is_some());
    }

    #[test]
    fn test_error_context() {
        let context = ErrorContext::new("collection_report".to_string())
            .with_request_id("req-123".to_string())
            .with_data("group_by", serde_json::json!("cashier"));

        assert_eq!(context.operation, "collection_report");
        assert_eq!(context.request_id, Some("req-123".to_string()));
    }

    #[test]
    fn test_error_details_builder() {
        let details = ErrorDetails::new(
            ErrorCode::InvalidRecord,
            "Validation failed".to_string()
        )
        .with_detail(serde_json::json!({"field": "amount"}))
        .with_suggestion("Check the value".to_string());

        assert_eq!(details.code, ErrorCode::InvalidRecord);
        assert!(details.details.is_some());
        assert_eq!(details.suggestions.len(), 1);
    }
}
