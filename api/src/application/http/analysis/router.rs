use axum::{
    Router, middleware,
    routing::{get, post},
};
use utoipa::OpenApi;

use super::handlers::{
    analyze_label::{__path_analyze_label, analyze_label},
    get_analyses::{__path_get_analyses, get_analyses},
    get_analysis::{__path_get_analysis, get_analysis},
};
use crate::application::{auth::auth, http::server::app_state::AppState};

#[derive(OpenApi)]
#[openapi(paths(analyze_label, get_analyses, get_analysis))]
pub struct AnalysisApiDoc;

pub fn analysis_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/analyze", state.args.server.root_path),
            post(analyze_label),
        )
        .route(
            &format!("{}/analyses", state.args.server.root_path),
            get(get_analyses),
        )
        .route(
            &format!("{}/analyses/{{analysis_id}}", state.args.server.root_path),
            get(get_analysis),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth))
}
