use axum::{
    Json,
    extract::{
        multipart::MultipartError,
        rejection::{PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use nutrilens_core::domain::common::entities::app_errors::CoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("{0}")]
    ServiceUnavailable(String),

    #[error("{0}")]
    InternalServerError(String),
}

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::NotFound => ApiError::NotFound("Analysis not found".to_string()),
            CoreError::InvalidInput(message) => ApiError::BadRequest(message),
            CoreError::InvalidToken | CoreError::TokenExpired => {
                ApiError::Unauthorized(error.to_string())
            }
            CoreError::MalformedModelReply(_) => ApiError::BadRequest(error.to_string()),
            CoreError::PersistenceDisabled => ApiError::ServiceUnavailable(error.to_string()),
            CoreError::OcrError(_)
            | CoreError::ExternalServiceError(_)
            | CoreError::InvalidModelJson(_)
            | CoreError::SchemaMismatch(_)
            | CoreError::PersistenceError(_)
            | CoreError::InternalServerError => {
                error!("Request failed: {}", error);
                ApiError::InternalServerError(error.to_string())
            }
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(error: MultipartError) -> Self {
        match error.status() {
            StatusCode::PAYLOAD_TOO_LARGE => ApiError::PayloadTooLarge(error.body_text()),
            _ => ApiError::BadRequest(error.body_text()),
        }
    }
}

#[cfg(test)]
mod tests {
    use nutrilens_core::domain::analysis::extraction::ExtractionError;

    use super::*;

    #[test]
    fn test_core_errors_map_to_statuses() {
        let cases = [
            (
                CoreError::MalformedModelReply(ExtractionError::MissingObject),
                StatusCode::BAD_REQUEST,
            ),
            (
                CoreError::MalformedModelReply(ExtractionError::TrailingContent),
                StatusCode::BAD_REQUEST,
            ),
            (
                CoreError::InvalidModelJson("expected value".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                CoreError::SchemaMismatch("missing field".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                CoreError::OcrError("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (CoreError::TokenExpired, StatusCode::UNAUTHORIZED),
            (CoreError::NotFound, StatusCode::NOT_FOUND),
            (
                CoreError::PersistenceDisabled,
                StatusCode::SERVICE_UNAVAILABLE,
            ),
        ];

        for (core, expected) in cases {
            assert_eq!(ApiError::from(core).status(), expected);
        }
    }

    #[test]
    fn test_payload_too_large_keeps_error_body() {
        let error = ApiError::PayloadTooLarge("Request payload is too large".to_string());
        assert_eq!(error.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
