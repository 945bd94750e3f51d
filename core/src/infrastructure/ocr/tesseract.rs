use bytes::Bytes;
use leptess::LepTess;
use tracing::error;

use crate::domain::{
    analysis::{ports::OcrEngine, value_objects::ExtractedText},
    common::entities::app_errors::CoreError,
};

/// Local Tesseract OCR. Each call gets its own engine on the blocking pool.
#[derive(Debug, Clone)]
pub struct TesseractOcrEngine {
    language: String,
}

impl TesseractOcrEngine {
    pub fn new(language: String) -> Self {
        Self { language }
    }
}

impl OcrEngine for TesseractOcrEngine {
    async fn extract_text(&self, image: Bytes) -> Result<ExtractedText, CoreError> {
        let language = self.language.clone();

        let text = tokio::task::spawn_blocking(move || -> Result<String, CoreError> {
            let mut tess = LepTess::new(None, &language).map_err(|e| {
                CoreError::OcrError(format!("Failed to initialise Tesseract: {:?}", e))
            })?;
            tess.set_image_from_mem(&image)
                .map_err(|e| CoreError::OcrError(format!("Failed to load image: {:?}", e)))?;
            tess.get_utf8_text()
                .map_err(|e| CoreError::OcrError(format!("Failed to read text: {:?}", e)))
        })
        .await
        .map_err(|e| {
            error!("Tesseract task panicked or was cancelled: {}", e);
            CoreError::OcrError("OCR task failed".to_string())
        })??;

        Ok(ExtractedText::new(text))
    }
}
