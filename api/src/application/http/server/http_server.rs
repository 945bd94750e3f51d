use std::sync::Arc;

use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    http::{
        HeaderValue, Method,
        header::{ACCEPT, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE},
    },
    routing::get,
};
use axum_prometheus::PrometheusMetricLayer;
use nutrilens_core::{application::create_service, domain::common::NutrilensConfig};
use tower_http::cors::CorsLayer;
use tracing::{debug, info_span};
use utoipa_redoc::{Redoc, Servable};
use utoipa_scalar::{Scalar, Servable as ScalarServable};

use crate::application::http::{
    analysis::router::analysis_routes,
    authentication::router::authentication_routes,
    health::router::health_routes,
    server::{app_state::AppState, openapi::openapi},
};
use crate::args::Args;

pub async fn state(args: Arc<Args>) -> Result<AppState, anyhow::Error> {
    let nutrilens_config = NutrilensConfig::from(args.as_ref().clone());
    let service = create_service(nutrilens_config).await?;

    Ok(AppState::new(args, service))
}

///  Returns the [`Router`] of this application.
pub fn router(state: AppState) -> Result<Router, anyhow::Error> {
    let trace_layer = tower_http::trace::TraceLayer::new_for_http().make_span_with(
        |request: &axum::extract::Request| {
            let uri: String = request.uri().to_string();
            info_span!("http_request", method = ?request.method(), uri)
        },
    );

    let allowed_origins = state
        .args
        .server
        .allowed_origins
        .iter()
        .map(|origin| HeaderValue::from_str(origin))
        .collect::<Result<Vec<HeaderValue>, _>>()?;

    debug!("Allowed origins: {:?}", allowed_origins);

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_origin(allowed_origins)
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, CONTENT_LENGTH, ACCEPT])
        .allow_credentials(true);

    let mut openapi = openapi();
    let mut paths = openapi.paths.clone();
    paths.paths = openapi
        .paths
        .paths
        .into_iter()
        .map(|(path, item)| (format!("{}{path}", state.args.server.root_path), item))
        .collect();
    openapi.paths = paths;

    let root_path = state.args.server.root_path.clone();
    let api_docs = openapi.clone();

    let mut router = axum::Router::new()
        .merge(Scalar::with_url(
            format!("{}/scalar", root_path),
            openapi.clone(),
        ))
        .merge(Redoc::with_url(format!("{}/redoc", root_path), openapi))
        .route(
            &format!("{}/api-docs/openapi.json", root_path),
            get(|| async move { Json(api_docs) }),
        )
        .merge(analysis_routes(state.clone()))
        .merge(authentication_routes(state.clone()))
        .merge(health_routes(&root_path));

    if state.args.server.metrics_enabled {
        let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();
        router = router
            .route(
                &format!("{}/metrics", root_path),
                get(|| async move { metric_handle.render() }),
            )
            .layer(prometheus_layer);
    }

    let router = router
        .layer(DefaultBodyLimit::max(state.args.server.max_upload_bytes))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state);

    Ok(router)
}
