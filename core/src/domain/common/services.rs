use crate::domain::common::PersistenceFailurePolicy;

/// Process-scoped collaborators shared by every request.
///
/// Persistence, readiness probing and token verification are optional: a
/// `None` turns the corresponding feature off.
#[derive(Clone)]
pub struct Service<O, L, A, HC, TV> {
    pub(crate) ocr_engine: O,
    pub(crate) llm_client: L,
    pub(crate) analysis_repository: Option<A>,
    pub(crate) health_check_repository: Option<HC>,
    pub(crate) token_verifier: Option<TV>,
    pub(crate) persistence_failure_policy: PersistenceFailurePolicy,
}

impl<O, L, A, HC, TV> Service<O, L, A, HC, TV> {
    pub fn new(
        ocr_engine: O,
        llm_client: L,
        analysis_repository: Option<A>,
        health_check_repository: Option<HC>,
        token_verifier: Option<TV>,
        persistence_failure_policy: PersistenceFailurePolicy,
    ) -> Self {
        Self {
            ocr_engine,
            llm_client,
            analysis_repository,
            health_check_repository,
            token_verifier,
            persistence_failure_policy,
        }
    }
}
