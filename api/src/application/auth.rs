use std::convert::Infallible;

use axum::{
    RequestPartsExt,
    extract::{FromRef, FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use nutrilens_core::domain::authentication::{
    ports::AuthService,
    value_objects::{AuthorizeRequestInput, Identity},
};
use tracing::debug;

use super::http::server::{api_entities::api_error::ApiError, app_state::AppState};

pub async fn extract_token_from_bearer(parts: &mut Parts) -> Result<String, ApiError> {
    let TypedHeader(Authorization(bearer)) = parts
        .extract::<TypedHeader<Authorization<Bearer>>>()
        .await
        .map_err(|_| ApiError::Unauthorized("Missing bearer token".to_string()))?;

    Ok(bearer.token().to_string())
}

/// Bearer authentication gate.
/// - Auth disabled: the request continues without an `Identity`
/// - Auth enabled: the token must verify, the resulting `Identity` is attached
///   to the request extensions, otherwise the request ends with 401
pub async fn auth(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !state.service.is_auth_enabled() {
        return Ok(next.run(req).await);
    }

    let (mut parts, body) = req.into_parts();
    let token = extract_token_from_bearer(&mut parts).await?;

    let identity = state
        .service
        .authorize_request(AuthorizeRequestInput { token })
        .await
        .map_err(ApiError::from)?;

    debug!(subject = %identity.subject, "Request authenticated");

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

/// Identity of a verified caller. Rejects with 401 when the request is
/// anonymous.
pub struct RequiredIdentity(pub Identity);

impl<S> FromRequestParts<S> for RequiredIdentity
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(RequiredIdentity)
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))
    }
}

/// Identity of the caller if one was established.
pub struct CallerIdentity(pub Option<Identity>);

impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        Ok(CallerIdentity(parts.extensions.get::<Identity>().cloned()))
    }
}
