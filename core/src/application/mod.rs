use tracing::{info, warn};

use crate::{
    domain::common::{
        NutrilensConfig, OcrBackendKind, entities::app_errors::CoreError, services::Service,
    },
    infrastructure::{
        analysis::repositories::PostgresAnalysisRepository,
        authentication::FirebaseTokenVerifier,
        db::postgres::{Postgres, PostgresConfig},
        health::PostgresHealthCheckRepository,
        llm::ChatCompletionClient,
        ocr::{OcrBackend, VisionOcrEngine},
    },
};

pub type NutrilensService = Service<
    OcrBackend,
    ChatCompletionClient,
    PostgresAnalysisRepository,
    PostgresHealthCheckRepository,
    FirebaseTokenVerifier,
>;

pub async fn create_service(config: NutrilensConfig) -> Result<NutrilensService, CoreError> {
    let llm_client = ChatCompletionClient::new(
        config.llm.api_key.clone(),
        config.llm.base_url.clone(),
        config.llm.model.clone(),
    );

    let ocr_engine = build_ocr_backend(&config, &llm_client)?;

    let (analysis_repository, health_check_repository) = match &config.database {
        Some(database) => {
            let postgres = Postgres::new(PostgresConfig {
                database_url: database.url.clone(),
            })
            .await?;

            (
                Some(PostgresAnalysisRepository::new(postgres.get_db())),
                Some(PostgresHealthCheckRepository::new(postgres.get_db())),
            )
        }
        None => {
            warn!("DATABASE_URL is not set, analyses will not be stored");
            (None, None)
        }
    };

    let token_verifier = match &config.firebase {
        Some(firebase) => {
            info!("Bearer authentication enabled for project {}", firebase.project_id);
            Some(FirebaseTokenVerifier::new(
                firebase.project_id.clone(),
                firebase.jwks_url.clone(),
            ))
        }
        None => {
            warn!("FIREBASE_PROJECT_ID is not set, requests are served anonymously");
            None
        }
    };

    Ok(Service::new(
        ocr_engine,
        llm_client,
        analysis_repository,
        health_check_repository,
        token_verifier,
        config.persistence_failure_policy,
    ))
}

fn build_ocr_backend(
    config: &NutrilensConfig,
    llm_client: &ChatCompletionClient,
) -> Result<OcrBackend, CoreError> {
    match config.ocr.backend {
        OcrBackendKind::Vision => {
            info!("Using vision OCR with model {}", config.ocr.model);
            Ok(OcrBackend::Vision(VisionOcrEngine::new(
                llm_client.with_model(config.ocr.model.clone()),
            )))
        }
        #[cfg(feature = "tesseract")]
        OcrBackendKind::Tesseract => {
            info!("Using Tesseract OCR with language {}", config.ocr.language);
            Ok(OcrBackend::Tesseract(
                crate::infrastructure::ocr::TesseractOcrEngine::new(config.ocr.language.clone()),
            ))
        }
        #[cfg(not(feature = "tesseract"))]
        OcrBackendKind::Tesseract => Err(CoreError::InvalidInput(
            "OCR_BACKEND=tesseract requires building with the `tesseract` feature".to_string(),
        )),
    }
}
