use axum::{Router, middleware, routing::get};
use utoipa::OpenApi;

use super::handlers::get_me::{__path_get_me, get_me};
use crate::application::{auth::auth, http::server::app_state::AppState};

#[derive(OpenApi)]
#[openapi(paths(get_me))]
pub struct AuthenticationApiDoc;

pub fn authentication_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/api/auth/me", state.args.server.root_path),
            get(get_me),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth))
}
