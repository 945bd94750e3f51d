use axum::extract::{Path, State};
use axum_extra::extract::WithRejection;
use nutrilens_core::domain::analysis::{entities::PersistedAnalysis, ports::AnalysisService};
use uuid::Uuid;

use crate::application::{
    auth::RequiredIdentity,
    http::server::{
        api_entities::{
            api_error::{ApiError, ErrorResponse},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    get,
    path = "/analyses/{analysis_id}",
    tag = "analysis",
    summary = "Get one of the caller's analyses",
    params(
        ("analysis_id" = Uuid, Path, description = "Analysis ID"),
    ),
    responses(
        (status = 200, body = PersistedAnalysis),
        (status = 401, body = ErrorResponse),
        (status = 404, body = ErrorResponse),
        (status = 503, body = ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn get_analysis(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    WithRejection(Path(analysis_id), _): WithRejection<Path<Uuid>, ApiError>,
) -> Result<Response<PersistedAnalysis>, ApiError> {
    let analysis = state
        .service
        .get_analysis(identity, analysis_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(analysis))
}
