use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Caller identity established by a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Identity {
    pub subject: String,
    pub phone_number: Option<String>,
}

impl Identity {
    pub fn new(subject: impl Into<String>, phone_number: Option<String>) -> Self {
        Self {
            subject: subject.into(),
            phone_number,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuthorizeRequestInput {
    pub token: String,
}
