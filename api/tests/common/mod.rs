#![allow(dead_code)]

use std::sync::Arc;

use axum_test::{
    TestServer,
    multipart::{MultipartForm, Part},
};
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use nutrilens_api::{
    application::http::server::http_server::{router, state},
    args::{AuthArgs, DatabaseArgs, LlmArgs, LogArgs, OcrArgs, ServerArgs, Args},
};
use nutrilens_core::domain::common::{OcrBackendKind, PersistenceFailurePolicy};
use serde_json::{Value, json};
use test_context::AsyncTestContext;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string_contains, method, path},
};

pub const PROJECT_ID: &str = "nutrilens-test";
pub const PRIVATE_KEY: &[u8] = include_bytes!("../fixtures/firebase_test_key.pem");
pub const JWKS: &str = include_str!("../fixtures/firebase_jwks.json");

/// Smallest JPEG header the MIME sniffer recognises.
pub const LABEL_JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00];

pub fn test_args(llm_base_url: String, jwks_url: Option<String>) -> Args {
    Args {
        server: ServerArgs {
            host: "127.0.0.1".to_string(),
            port: 0,
            root_path: String::new(),
            allowed_origins: vec!["http://localhost:3000".to_string()],
            max_upload_bytes: 10 * 1024 * 1024,
            metrics_enabled: false,
        },
        llm: LlmArgs {
            api_key: "sk-test".to_string(),
            base_url: llm_base_url,
            model: "analysis-model".to_string(),
        },
        ocr: OcrArgs {
            backend: OcrBackendKind::Vision,
            model: "vision-model".to_string(),
            language: "eng".to_string(),
        },
        database: DatabaseArgs {
            url: None,
            persistence_failure_policy: PersistenceFailurePolicy::Fail,
        },
        auth: AuthArgs {
            firebase_project_id: jwks_url.as_ref().map(|_| PROJECT_ID.to_string()),
            firebase_jwks_url: jwks_url.unwrap_or_default(),
        },
        log: LogArgs {
            filter: "debug".to_string(),
            json: false,
        },
    }
}

pub async fn test_server(args: Args) -> TestServer {
    let state = state(Arc::new(args)).await.expect("failed to build state");
    TestServer::new(router(state).expect("failed to build router")).expect("failed to start")
}

/// Pipeline without bearer authentication.
pub struct AnonymousApp {
    pub server: TestServer,
    pub llm: MockServer,
}

impl AsyncTestContext for AnonymousApp {
    async fn setup() -> Self {
        let llm = MockServer::start().await;
        let server = test_server(test_args(llm.uri(), None)).await;

        Self { server, llm }
    }
}

/// Pipeline behind Firebase bearer authentication.
pub struct SecuredApp {
    pub server: TestServer,
    pub llm: MockServer,
    pub identity_provider: MockServer,
}

impl AsyncTestContext for SecuredApp {
    async fn setup() -> Self {
        let llm = MockServer::start().await;
        let identity_provider = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/jwks"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(JWKS, "application/json"))
            .mount(&identity_provider)
            .await;

        let jwks_url = format!("{}/jwks", identity_provider.uri());
        let server = test_server(test_args(llm.uri(), Some(jwks_url))).await;

        Self {
            server,
            llm,
            identity_provider,
        }
    }
}

pub fn completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

/// Answers the OCR transcription call.
pub async fn mock_ocr(server: &MockServer, text: &str, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("meticulous OCR engine"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(text)))
        .expect(expected_calls)
        .mount(server)
        .await;
}

/// Answers the label analysis call.
pub async fn mock_analysis(server: &MockServer, reply: &str, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("food safety analyst"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(reply)))
        .expect(expected_calls)
        .mount(server)
        .await;
}

pub fn label_form() -> MultipartForm {
    MultipartForm::new().add_part(
        "image",
        Part::bytes(LABEL_JPEG.to_vec())
            .file_name("label.jpg")
            .mime_type("image/jpeg"),
    )
}

pub fn claims(subject: &str) -> Value {
    let now = Utc::now().timestamp();
    json!({
        "sub": subject,
        "aud": PROJECT_ID,
        "iss": format!("https://securetoken.google.com/{PROJECT_ID}"),
        "iat": now,
        "exp": now + 3600,
        "phone_number": "+15550100"
    })
}

pub fn sign_token(claims: &Value) -> String {
    let header = Header {
        kid: Some("test-key".to_string()),
        ..Header::new(Algorithm::RS256)
    };
    let key = EncodingKey::from_rsa_pem(PRIVATE_KEY).expect("invalid test key");
    encode(&header, claims, &key).expect("failed to sign token")
}
