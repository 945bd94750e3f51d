use bytes::Bytes;
use tracing::error;

use crate::domain::{
    analysis::{
        extraction::strip_transcription_fences,
        ports::{LLMClient, OcrEngine},
        prompt::{OCR_SYSTEM_PROMPT, OCR_USER_PROMPT},
        value_objects::ExtractedText,
    },
    common::entities::app_errors::CoreError,
};

/// OCR through a vision-capable chat model.
#[derive(Debug, Clone)]
pub struct VisionOcrEngine<L> {
    client: L,
}

impl<L: LLMClient> VisionOcrEngine<L> {
    pub fn new(client: L) -> Self {
        Self { client }
    }
}

impl<L: LLMClient> OcrEngine for VisionOcrEngine<L> {
    async fn extract_text(&self, image: Bytes) -> Result<ExtractedText, CoreError> {
        let reply = self
            .client
            .generate_with_image(
                OCR_SYSTEM_PROMPT.to_string(),
                OCR_USER_PROMPT.to_string(),
                image,
            )
            .await
            .map_err(|e| {
                error!("Vision OCR failed: {}", e);
                CoreError::OcrError(e.to_string())
            })?;

        Ok(ExtractedText::new(strip_transcription_fences(&reply)))
    }
}
