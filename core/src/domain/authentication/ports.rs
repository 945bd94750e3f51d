use std::future::Future;

use crate::domain::{
    authentication::value_objects::{AuthorizeRequestInput, Identity},
    common::entities::app_errors::CoreError,
};

/// Verifies bearer tokens issued by the external identity provider.
#[cfg_attr(test, mockall::automock)]
pub trait TokenVerifier: Send + Sync {
    fn verify_token(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<Identity, CoreError>> + Send;
}

pub trait AuthService: Send + Sync {
    /// Whether requests must carry a verified bearer token.
    fn is_auth_enabled(&self) -> bool;

    fn authorize_request(
        &self,
        input: AuthorizeRequestInput,
    ) -> impl Future<Output = Result<Identity, CoreError>> + Send;
}
