#[cfg(feature = "tesseract")]
pub mod tesseract;
pub mod vision;

use bytes::Bytes;

use crate::{
    domain::{
        analysis::{ports::OcrEngine, value_objects::ExtractedText},
        common::entities::app_errors::CoreError,
    },
    infrastructure::llm::ChatCompletionClient,
};

#[cfg(feature = "tesseract")]
pub use tesseract::TesseractOcrEngine;
pub use vision::VisionOcrEngine;

/// OCR backend selected at start-up.
#[derive(Debug, Clone)]
pub enum OcrBackend {
    Vision(VisionOcrEngine<ChatCompletionClient>),
    #[cfg(feature = "tesseract")]
    Tesseract(TesseractOcrEngine),
}

impl OcrEngine for OcrBackend {
    async fn extract_text(&self, image: Bytes) -> Result<ExtractedText, CoreError> {
        match self {
            OcrBackend::Vision(engine) => engine.extract_text(image).await,
            #[cfg(feature = "tesseract")]
            OcrBackend::Tesseract(engine) => engine.extract_text(image).await,
        }
    }
}
