use nutrilens_core::domain::authentication::value_objects::Identity;

use crate::application::{
    auth::RequiredIdentity,
    http::server::api_entities::{
        api_error::{ApiError, ErrorResponse},
        response::Response,
    },
};

#[utoipa::path(
    get,
    path = "/me",
    tag = "auth",
    summary = "Get the authenticated caller",
    description = "Returns the identity established from the bearer token",
    responses(
        (status = 200, body = Identity),
        (status = 401, body = ErrorResponse),
    ),
    security(("bearer" = []))
)]
pub async fn get_me(
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<Identity>, ApiError> {
    Ok(Response::OK(identity))
}
