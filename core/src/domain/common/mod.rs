use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::{NoContext, Timestamp};

pub mod entities;
pub mod services;

#[derive(Clone, Debug)]
pub struct NutrilensConfig {
    pub llm: LLMConfig,
    pub ocr: OcrConfig,
    pub database: Option<DatabaseConfig>,
    pub persistence_failure_policy: PersistenceFailurePolicy,
    pub firebase: Option<FirebaseConfig>,
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

#[derive(Clone, Debug)]
pub struct OcrConfig {
    pub backend: OcrBackendKind,
    pub model: String,
    pub language: String,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Clone, Debug)]
pub struct FirebaseConfig {
    pub project_id: String,
    pub jwks_url: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OcrBackendKind {
    Vision,
    Tesseract,
}

impl FromStr for OcrBackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "vision" => Ok(OcrBackendKind::Vision),
            "tesseract" => Ok(OcrBackendKind::Tesseract),
            other => Err(format!("unknown OCR backend '{other}'")),
        }
    }
}

/// What to do when the analysis store rejects a write.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PersistenceFailurePolicy {
    /// Fail the request with a server error.
    #[default]
    Fail,
    /// Log the failure and still return the analysis.
    Log,
}

impl FromStr for PersistenceFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fail" => Ok(PersistenceFailurePolicy::Fail),
            "log" => Ok(PersistenceFailurePolicy::Log),
            other => Err(format!("unknown persistence failure policy '{other}'")),
        }
    }
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, now.timestamp_subsec_nanos());

    (now, timestamp)
}
