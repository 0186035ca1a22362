//! Error types for feeweb-api

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Internal server error")]
    InternalError,
}

impl ApiError {
    /// JSON error envelope for handler responses
    pub fn to_body(&self) -> String {
        serde_json::to_string(&serde_json::json!({ "error": self.to_string() }))
            .unwrap_or_default()
    }
}
