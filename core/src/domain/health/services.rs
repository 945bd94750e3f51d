use crate::domain::{
    analysis::ports::{AnalysisRepository, LLMClient, OcrEngine},
    authentication::ports::TokenVerifier,
    common::{entities::app_errors::CoreError, services::Service},
    health::{
        entities::DatabaseHealthStatus,
        ports::{HealthCheckRepository, HealthCheckService},
    },
};

impl<O, L, A, HC, TV> HealthCheckService for Service<O, L, A, HC, TV>
where
    O: OcrEngine,
    L: LLMClient,
    A: AnalysisRepository,
    HC: HealthCheckRepository,
    TV: TokenVerifier,
{
    async fn readiness(&self) -> Result<DatabaseHealthStatus, CoreError> {
        match &self.health_check_repository {
            Some(repository) => repository.health().await.map(DatabaseHealthStatus::up),
            None => Ok(DatabaseHealthStatus::disabled()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        analysis::ports::{MockAnalysisRepository, MockLLMClient, MockOcrEngine},
        authentication::ports::MockTokenVerifier,
        common::PersistenceFailurePolicy,
        health::{entities::DatabaseStatus, ports::MockHealthCheckRepository},
    };

    fn service(
        repository: Option<MockHealthCheckRepository>,
    ) -> Service<
        MockOcrEngine,
        MockLLMClient,
        MockAnalysisRepository,
        MockHealthCheckRepository,
        MockTokenVerifier,
    > {
        Service::new(
            MockOcrEngine::new(),
            MockLLMClient::new(),
            None,
            repository,
            None,
            PersistenceFailurePolicy::Fail,
        )
    }

    #[tokio::test]
    async fn test_readiness_reports_database_latency() {
        let mut repository = MockHealthCheckRepository::new();
        repository
            .expect_health()
            .times(1)
            .returning(|| Box::pin(async { Ok(4) }));

        let status = service(Some(repository)).readiness().await.unwrap();
        assert_eq!(status, DatabaseHealthStatus::up(4));
    }

    #[tokio::test]
    async fn test_readiness_propagates_database_failure() {
        let mut repository = MockHealthCheckRepository::new();
        repository.expect_health().times(1).returning(|| {
            Box::pin(async { Err(CoreError::PersistenceError("connection refused".to_string())) })
        });

        let err = service(Some(repository)).readiness().await.unwrap_err();
        assert!(matches!(err, CoreError::PersistenceError(_)));
    }

    #[tokio::test]
    async fn test_readiness_without_database_is_disabled() {
        let status = service(None).readiness().await.unwrap();
        assert_eq!(status.status, DatabaseStatus::Disabled);
        assert_eq!(status.latency_ms, None);
    }
}
