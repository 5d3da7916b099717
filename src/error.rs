use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Failure to turn a public handle into a numeric id
#[derive(Debug, Clone, PartialEq)]
pub enum ResolveError {
    /// Telegram does not know the handle or the bot cannot see it
    NotFound(String),
    /// The request itself failed
    Transport { handle: String, message: String },
}

impl std::fmt::Display for ResolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolveError::NotFound(handle) => write!(f, "{handle} not found"),
            ResolveError::Transport { handle, message } => {
                write!(f, "request for {handle} failed: {message}")
            }
        }
    }
}

impl std::error::Error for ResolveError {}

/// Errors surfaced by the report HTTP surface
#[derive(Debug)]
pub enum AppError {
    Internal(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Internal(msg) => write!(f, "Internal Error: {msg}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Internal(msg) => {
                tracing::error!("Report failed: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(format!("{err:#}"))
    }
}
