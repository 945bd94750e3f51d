use axum::extract::{Query, State};
use axum_extra::extract::WithRejection;
use nutrilens_core::domain::analysis::{
    entities::PersistedAnalysis, ports::AnalysisService, value_objects::GetAnalysesFilter,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{
    auth::RequiredIdentity,
    http::{
        analysis::validators::GetAnalysesParams,
        server::{
            api_entities::{
                api_error::{ApiError, ErrorResponse},
                response::Response,
            },
            app_state::AppState,
        },
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetAnalysesResponse {
    pub items: Vec<PersistedAnalysis>,
    pub offset: u32,
    pub limit: u32,
    pub count: usize,
}

#[utoipa::path(
    get,
    path = "/analyses",
    tag = "analysis",
    summary = "List the caller's analyses",
    description = "Stored analyses of the authenticated caller, newest first",
    params(GetAnalysesParams),
    responses(
        (status = 200, body = GetAnalysesResponse),
        (status = 401, body = ErrorResponse),
        (status = 503, body = ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn get_analyses(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    WithRejection(Query(params), _): WithRejection<Query<GetAnalysesParams>, ApiError>,
) -> Result<Response<GetAnalysesResponse>, ApiError> {
    let filter = GetAnalysesFilter {
        offset: params.offset,
        limit: params.limit,
    };
    let offset = filter.offset.unwrap_or(0);
    let limit = filter.page_size();

    let items = state
        .service
        .get_analyses(identity, filter)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetAnalysesResponse {
        count: items.len(),
        items,
        offset,
        limit,
    }))
}
