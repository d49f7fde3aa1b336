//! Error types for razorweb-core
//!
//! Every failure carries a machine-readable code and a severity, and can be
//! expanded into `ErrorDetails` with suggestions for the error banner.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Request could not be sent or no response arrived
    RequestFailed,
    /// Endpoint answered with a non-success status
    UpstreamStatus,
    /// Response body was not `{"items": [...]}`
    DecodeError,
    /// Delimited export failed
    ExportError,
    /// Unknown table column
    InvalidColumn,
    /// Configuration error
    ConfigError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::RequestFailed => write!(f, "REQUEST_FAILED"),
            ErrorCode::UpstreamStatus => write!(f, "UPSTREAM_STATUS"),
            ErrorCode::DecodeError => write!(f, "DECODE_ERROR"),
            ErrorCode::ExportError => write!(f, "EXPORT_ERROR"),
            ErrorCode::InvalidColumn => write!(f, "INVALID_COLUMN"),
            ErrorCode::ConfigError => write!(f, "CONFIG_ERROR"),
        }
    }
}

/// A failure expanded for the error banner, the JSON API and the log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: ErrorCode,
    pub message: String,
    /// Structured context, e.g. the upstream status and body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            context: None,
            suggestions: vec![],
        }
    }

    pub fn with_context(mut self, context: serde_json::Value) -> Self {
        self.context = Some(context);
        self
    }

    pub fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.suggestions.push(suggestion.to_string());
        self
    }
}

/// Single line: `[CODE] message {context}`
impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        match &self.context {
            Some(context) => write!(f, " {}", context),
            None => Ok(()),
        }
    }
}

/// How loudly a failure is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Bad input; nothing was attempted
    Warning,
    /// The operation failed
    Error,
    /// The server cannot run
    Critical,
}

/// Main error type for razorweb-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Request failed: {message}")]
    Request { message: String },

    #[error("Endpoint returned status {status}")]
    Status { status: u16, body: String },

    #[error("Unexpected response: {message}")]
    Decode { message: String },

    #[error("Export failed: {message}")]
    Export { message: String },

    #[error("Unknown column: {name}")]
    InvalidColumn { name: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::Request { .. } => ErrorCode::RequestFailed,
            CoreError::Status { .. } => ErrorCode::UpstreamStatus,
            CoreError::Decode { .. } => ErrorCode::DecodeError,
            CoreError::Export { .. } => ErrorCode::ExportError,
            CoreError::InvalidColumn { .. } => ErrorCode::InvalidColumn,
            CoreError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::InvalidColumn { .. } => ErrorSeverity::Warning,
            CoreError::Config { .. } => ErrorSeverity::Critical,
            _ => ErrorSeverity::Error,
        }
    }

    /// Expand into code, message, context and suggestions
    pub fn to_details(&self) -> ErrorDetails {
        let details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::Request { .. } => details
                .with_suggestion("Check that the transaction endpoint is reachable.")
                .with_suggestion("The previously loaded transactions are still shown."),
            CoreError::Status { status, body } => details
                .with_context(serde_json::json!({ "status": status, "body": body }))
                .with_suggestion("Check the From and To dates and try again."),
            CoreError::Decode { .. } => details
                .with_suggestion("The endpoint must answer with a JSON object holding an items list."),
            CoreError::InvalidColumn { .. } => details
                .with_suggestion("Sort by one of the table's column ids."),
            CoreError::Export { .. } | CoreError::Config { .. } => details,
        }
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;
