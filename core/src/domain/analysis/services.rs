use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::domain::{
    analysis::{
        entities::{AnalysisResult, PersistedAnalysis},
        extraction::extract_json_object,
        helpers::image_reference,
        ports::{AnalysisRepository, AnalysisService, LLMClient, OcrEngine},
        prompt::{ANALYSIS_SYSTEM_PROMPT, build_analysis_prompt},
        value_objects::{AnalyzeLabelInput, GetAnalysesFilter},
    },
    authentication::{ports::TokenVerifier, value_objects::Identity},
    common::{PersistenceFailurePolicy, entities::app_errors::CoreError, services::Service},
    health::ports::HealthCheckRepository,
};

impl<O, L, A, HC, TV> AnalysisService for Service<O, L, A, HC, TV>
where
    O: OcrEngine,
    L: LLMClient,
    A: AnalysisRepository,
    HC: HealthCheckRepository,
    TV: TokenVerifier,
{
    #[instrument(
        skip(self, input),
        fields(image_bytes = input.image.len(), authenticated = input.identity.is_some())
    )]
    async fn analyze_label(&self, input: AnalyzeLabelInput) -> Result<AnalysisResult, CoreError> {
        // 1. Extract label text
        let text = self.ocr_engine.extract_text(input.image.clone()).await?;
        if text.is_blank() {
            warn!("OCR returned no text, analysing an empty label");
        }
        debug!(chars = text.as_str().len(), "Label text extracted");

        // 2. Build prompt
        let prompt = build_analysis_prompt(&text);

        // 3. Call LLM
        let raw_response = self
            .llm_client
            .generate_with_text(ANALYSIS_SYSTEM_PROMPT.to_string(), prompt)
            .await?;

        // 4. Extract and validate the JSON object
        let object = extract_json_object(&raw_response).map_err(|e| {
            warn!(error = %e, "Unusable model reply");
            CoreError::from(e)
        })?;
        let result = AnalysisResult::from_model_object(object)?;

        // 5. Persist when a store is configured
        if let Some(repository) = &self.analysis_repository {
            let record = PersistedAnalysis::new(
                input.identity.as_ref(),
                input.location,
                image_reference(&input.image),
                input.image_name.clone(),
                result.clone(),
                raw_response,
            );

            match repository.create_analysis(record).await {
                Ok(stored) => info!(analysis_id = %stored.id, "Analysis persisted"),
                Err(e) => match self.persistence_failure_policy {
                    PersistenceFailurePolicy::Fail => {
                        error!(error = %e, "Failed to persist analysis");
                        return Err(e);
                    }
                    PersistenceFailurePolicy::Log => {
                        error!(error = %e, "Failed to persist analysis, returning result anyway");
                    }
                },
            }
        }

        Ok(result)
    }

    async fn get_analyses(
        &self,
        identity: Identity,
        filter: GetAnalysesFilter,
    ) -> Result<Vec<PersistedAnalysis>, CoreError> {
        let repository = self
            .analysis_repository
            .as_ref()
            .ok_or(CoreError::PersistenceDisabled)?;

        let filter = GetAnalysesFilter {
            offset: filter.offset,
            limit: Some(filter.page_size()),
        };

        repository.get_by_subject(identity.subject, filter).await
    }

    async fn get_analysis(
        &self,
        identity: Identity,
        analysis_id: Uuid,
    ) -> Result<PersistedAnalysis, CoreError> {
        let repository = self
            .analysis_repository
            .as_ref()
            .ok_or(CoreError::PersistenceDisabled)?;

        repository
            .get_by_id(analysis_id, identity.subject)
            .await?
            .ok_or(CoreError::NotFound)
    }
}
