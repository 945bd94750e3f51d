use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::application::http::{
    analysis::router::AnalysisApiDoc, authentication::router::AuthenticationApiDoc,
    health::router::HealthApiDoc,
};

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Firebase ID token"))
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "NutriLens API",
        description = "Food label analysis: OCR, LLM review and health verdict"
    ),
    modifiers(&BearerSecurity),
    nest(
        (path = "/api/auth", api = AuthenticationApiDoc),
        (path = "/health", api = HealthApiDoc),
    )
)]
pub struct ApiDoc;

/// Full document, analysis routes included.
pub fn openapi() -> utoipa::openapi::OpenApi {
    let mut openapi = ApiDoc::openapi();
    openapi.merge(AnalysisApiDoc::openapi());
    openapi
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = openapi();
        for path in [
            "/analyze",
            "/analyses",
            "/analyses/{analysis_id}",
            "/api/auth/me",
            "/health/live",
            "/health/ready",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
        assert!(
            doc.components
                .as_ref()
                .is_some_and(|c| c.security_schemes.contains_key("bearer"))
        );
    }
}
