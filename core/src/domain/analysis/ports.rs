use std::future::Future;

use bytes::Bytes;
use uuid::Uuid;

use crate::domain::{
    analysis::{
        entities::{AnalysisResult, PersistedAnalysis},
        value_objects::{AnalyzeLabelInput, ExtractedText, GetAnalysesFilter},
    },
    authentication::value_objects::Identity,
    common::entities::app_errors::CoreError,
};

/// Text recognition over an in-memory image.
#[cfg_attr(test, mockall::automock)]
pub trait OcrEngine: Send + Sync {
    fn extract_text(
        &self,
        image: Bytes,
    ) -> impl Future<Output = Result<ExtractedText, CoreError>> + Send;
}

/// LLM Client trait for calling chat-completion models
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    fn generate_with_text(
        &self,
        system_prompt: String,
        prompt: String,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;

    fn generate_with_image(
        &self,
        system_prompt: String,
        prompt: String,
        image_data: Bytes,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// Repository trait for persisted analyses
#[cfg_attr(test, mockall::automock)]
pub trait AnalysisRepository: Send + Sync {
    fn create_analysis(
        &self,
        analysis: PersistedAnalysis,
    ) -> impl Future<Output = Result<PersistedAnalysis, CoreError>> + Send;

    fn get_by_id(
        &self,
        analysis_id: Uuid,
        subject: String,
    ) -> impl Future<Output = Result<Option<PersistedAnalysis>, CoreError>> + Send;

    fn get_by_subject(
        &self,
        subject: String,
        filter: GetAnalysesFilter,
    ) -> impl Future<Output = Result<Vec<PersistedAnalysis>, CoreError>> + Send;
}

/// Service trait for the label analysis pipeline
pub trait AnalysisService: Send + Sync {
    fn analyze_label(
        &self,
        input: AnalyzeLabelInput,
    ) -> impl Future<Output = Result<AnalysisResult, CoreError>> + Send;

    fn get_analyses(
        &self,
        identity: Identity,
        filter: GetAnalysesFilter,
    ) -> impl Future<Output = Result<Vec<PersistedAnalysis>, CoreError>> + Send;

    fn get_analysis(
        &self,
        identity: Identity,
        analysis_id: Uuid,
    ) -> impl Future<Output = Result<PersistedAnalysis, CoreError>> + Send;
}
