//! Error types for razorweb-api

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use razorweb_core::CoreError;
use razorweb_utils::escape_html;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Transaction service error: {message}")]
    Upstream { message: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Request { .. } | CoreError::Status { .. } | CoreError::Decode { .. } => {
                ApiError::Upstream { message: error.to_string() }
            }
            CoreError::InvalidColumn { .. } => ApiError::BadRequest { message: error.to_string() },
            CoreError::Export { .. } | CoreError::Config { .. } => {
                ApiError::Internal { message: error.to_string() }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{}", self);
        }
        let body = format!(
            "<div class='p-4 rounded-lg border border-red-200 bg-red-50 text-red-700'>{}</div>",
            escape_html(&self.to_string())
        );
        (status, Html(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_map_to_status() {
        let upstream: ApiError = CoreError::Status { status: 500, body: "boom".to_string() }.into();
        assert_eq!(upstream.status(), StatusCode::BAD_GATEWAY);

        let column: ApiError = CoreError::InvalidColumn { name: "notes".to_string() }.into();
        assert_eq!(column.status(), StatusCode::BAD_REQUEST);

        let export: ApiError = CoreError::Export { message: "io".to_string() }.into();
        assert_eq!(export.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_into_response_uses_status() {
        let response = ApiError::BadRequest { message: "<script>".to_string() }.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
