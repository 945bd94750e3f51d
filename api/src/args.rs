use clap::Parser;
use nutrilens_core::{
    domain::common::{
        DatabaseConfig, FirebaseConfig, LLMConfig, NutrilensConfig, OcrBackendKind, OcrConfig,
        PersistenceFailurePolicy,
    },
    infrastructure::authentication::firebase::DEFAULT_JWKS_URL,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "nutrilens-api", version, about = "Food label analysis API")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(flatten)]
    pub ocr: OcrArgs,

    #[command(flatten)]
    pub database: DatabaseArgs,

    #[command(flatten)]
    pub auth: AuthArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ServerArgs {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Prefix for every route, e.g. `/v1`.
    #[arg(long, env = "ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long,
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,

    #[arg(long, env = "MAX_UPLOAD_BYTES", default_value_t = 10 * 1024 * 1024)]
    pub max_upload_bytes: usize,

    #[arg(long, env = "METRICS_ENABLED", default_value_t = false)]
    pub metrics_enabled: bool,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LlmArgs {
    #[arg(long = "llm-api-key", env = "LLM_API_KEY", hide_env_values = true)]
    pub api_key: String,

    #[arg(
        long = "llm-base-url",
        env = "LLM_BASE_URL",
        default_value = "https://api.openai.com/v1"
    )]
    pub base_url: String,

    #[arg(id = "llm-model", long = "llm-model", env = "LLM_MODEL", default_value = "gpt-4o-mini")]
    pub model: String,
}

#[derive(Debug, Clone, clap::Args)]
pub struct OcrArgs {
    /// `vision` or `tesseract`.
    #[arg(long = "ocr-backend", env = "OCR_BACKEND", default_value = "vision")]
    pub backend: OcrBackendKind,

    /// Vision model used when the backend is `vision`.
    #[arg(id = "ocr-model", long = "ocr-model", env = "OCR_MODEL", default_value = "gpt-4o-mini")]
    pub model: String,

    /// Tesseract language when the backend is `tesseract`.
    #[arg(long = "ocr-language", env = "OCR_LANGUAGE", default_value = "eng")]
    pub language: String,
}

#[derive(Debug, Clone, clap::Args)]
pub struct DatabaseArgs {
    /// Analyses are stored only when this is set.
    #[arg(long = "database-url", env = "DATABASE_URL", hide_env_values = true)]
    pub url: Option<String>,

    /// `fail` or `log`.
    #[arg(
        long = "persistence-failure-policy",
        env = "PERSISTENCE_FAILURE_POLICY",
        default_value = "fail"
    )]
    pub persistence_failure_policy: PersistenceFailurePolicy,
}

#[derive(Debug, Clone, clap::Args)]
pub struct AuthArgs {
    /// Bearer authentication is enforced only when this is set.
    #[arg(long = "firebase-project-id", env = "FIREBASE_PROJECT_ID")]
    pub firebase_project_id: Option<String>,

    #[arg(
        long = "firebase-jwks-url",
        env = "FIREBASE_JWKS_URL",
        default_value = DEFAULT_JWKS_URL
    )]
    pub firebase_jwks_url: String,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

impl From<Args> for NutrilensConfig {
    fn from(args: Args) -> Self {
        NutrilensConfig {
            llm: LLMConfig {
                api_key: args.llm.api_key,
                base_url: args.llm.base_url,
                model: args.llm.model,
            },
            ocr: OcrConfig {
                backend: args.ocr.backend,
                model: args.ocr.model,
                language: args.ocr.language,
            },
            database: args
                .database
                .url
                .filter(|url| !url.trim().is_empty())
                .map(|url| DatabaseConfig { url }),
            persistence_failure_policy: args.database.persistence_failure_policy,
            firebase: args
                .auth
                .firebase_project_id
                .filter(|project_id| !project_id.trim().is_empty())
                .map(|project_id| FirebaseConfig {
                    project_id,
                    jwks_url: args.auth.firebase_jwks_url,
                }),
        }
    }
}
