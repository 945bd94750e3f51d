use thiserror::Error;

use crate::domain::analysis::extraction::ExtractionError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CoreError {
    #[error("Not found")]
    NotFound,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("OCR failed: {0}")]
    OcrError(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// The model reply has no usable JSON object (client-facing).
    #[error("{0}")]
    MalformedModelReply(ExtractionError),

    /// The model reply contained an object that is not valid JSON.
    #[error("Model reply is not valid JSON: {0}")]
    InvalidModelJson(String),

    #[error("Model reply does not match the analysis schema: {0}")]
    SchemaMismatch(String),

    #[error("Persistence error: {0}")]
    PersistenceError(String),

    #[error("Persistence is not configured")]
    PersistenceDisabled,

    #[error("Internal server error")]
    InternalServerError,
}

impl From<ExtractionError> for CoreError {
    fn from(error: ExtractionError) -> Self {
        match error {
            ExtractionError::InvalidJson(message) => CoreError::InvalidModelJson(message),
            other => CoreError::MalformedModelReply(other),
        }
    }
}
