use axum::extract::State;
use nutrilens_core::domain::health::{entities::DatabaseHealthStatus, ports::HealthCheckService};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{
        api_error::{ApiError, ErrorResponse},
        response::Response,
    },
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ReadinessResponse {
    pub status: String,
    pub database: DatabaseHealthStatus,
}

#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    summary = "Readiness check",
    description = "Pings the database when persistence is configured",
    responses(
        (status = 200, body = ReadinessResponse),
        (status = 503, body = ErrorResponse),
    )
)]
pub async fn ready(State(state): State<AppState>) -> Result<Response<ReadinessResponse>, ApiError> {
    let database = state.service.readiness().await.map_err(|e| {
        error!("Readiness check failed: {}", e);
        ApiError::ServiceUnavailable("Database unavailable".to_string())
    })?;

    Ok(Response::OK(ReadinessResponse {
        status: "ok".to_string(),
        database,
    }))
}
