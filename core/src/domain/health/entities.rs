use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseStatus {
    Up,
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DatabaseHealthStatus {
    pub status: DatabaseStatus,
    pub latency_ms: Option<u64>,
}

impl DatabaseHealthStatus {
    pub fn up(latency_ms: u64) -> Self {
        Self {
            status: DatabaseStatus::Up,
            latency_ms: Some(latency_ms),
        }
    }

    pub fn disabled() -> Self {
        Self {
            status: DatabaseStatus::Disabled,
            latency_ms: None,
        }
    }
}
