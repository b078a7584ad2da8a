use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use category_storage::StorageError;
use std::fmt;
use validator::ValidationErrors;

use crate::codec::WebResponse;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    Validation(ValidationErrors),
    /// The request body could not be read or decoded as JSON.
    Decode(String),
    /// The `{id}` path segment is not an integer.
    MalformedId(String),
    Internal(String),
}

/// The three classes a failure can fall into, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Validation,
    Internal,
}

impl ErrorKind {
    pub fn status_code(self) -> StatusCode {
        match self {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl WebError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Storage(e) if e.is_not_found() => ErrorKind::NotFound,
            Self::Validation(_) => ErrorKind::Validation,
            _ => ErrorKind::Internal,
        }
    }
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(StorageError::NotFound(msg)) => write!(f, "{}", msg),
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Validation(e) => write!(f, "{}", validation_message(e)),
            Self::Decode(msg) => write!(f, "Malformed request body: {}", msg),
            Self::MalformedId(msg) => write!(f, "Malformed path parameter: {}", msg),
            Self::Internal(msg) => write!(f, "Internal server error: {}", msg),
        }
    }
}

impl std::error::Error for WebError {}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let kind = self.kind();

        match kind {
            ErrorKind::NotFound => tracing::debug!("{}", self),
            ErrorKind::Validation => tracing::debug!("Validation failed: {}", self),
            ErrorKind::Internal => tracing::error!("{}", self),
        }

        WebResponse::with_status(kind.status_code(), Some(self.to_string())).into_response()
    }
}

/// Flattens field errors into `"field: message"` pairs joined by `"; "`,
/// sorted by field name.
pub fn validation_message(errors: &ValidationErrors) -> String {
    let mut field_errors: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |e| {
                format!(
                    "{}: {}",
                    field,
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                )
            })
        })
        .collect();

    field_errors.sort();
    field_errors.join("; ")
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

pub type WebResult<T> = Result<T, WebError>;
