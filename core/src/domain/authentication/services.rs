use crate::domain::{
    analysis::ports::{AnalysisRepository, LLMClient, OcrEngine},
    authentication::{
        ports::{AuthService, TokenVerifier},
        value_objects::{AuthorizeRequestInput, Identity},
    },
    common::{entities::app_errors::CoreError, services::Service},
    health::ports::HealthCheckRepository,
};

impl<O, L, A, HC, TV> AuthService for Service<O, L, A, HC, TV>
where
    O: OcrEngine,
    L: LLMClient,
    A: AnalysisRepository,
    HC: HealthCheckRepository,
    TV: TokenVerifier,
{
    fn is_auth_enabled(&self) -> bool {
        self.token_verifier.is_some()
    }

    async fn authorize_request(&self, input: AuthorizeRequestInput) -> Result<Identity, CoreError> {
        let verifier = self
            .token_verifier
            .as_ref()
            .ok_or(CoreError::InvalidToken)?;

        verifier.verify_token(&input.token).await
    }
}
