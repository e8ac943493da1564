use leptos::prelude::ServerFnError;
use thiserror::Error;

/// Application-wide error types.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Convert into the error type returned by Leptos server functions.
    pub fn into_server_error(self) -> ServerFnError {
        match self {
            // Server functions surface the bare message to the page.
            AppError::NotFound(msg) | AppError::BadRequest(msg) | AppError::Auth(msg) => {
                ServerFnError::new(msg)
            }
            other => ServerFnError::new(other.to_string()),
        }
    }
}

/// Helper conversion from anyhow::Error
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
