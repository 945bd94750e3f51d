use axum::extract::{Multipart, State};
use bytes::Bytes;
use nutrilens_core::domain::analysis::{
    entities::AnalysisResult, ports::AnalysisService, value_objects::AnalyzeLabelInput,
};
use tracing::info;
use utoipa::ToSchema;

use crate::application::{
    auth::CallerIdentity,
    http::{
        analysis::validators::{LocationForm, parse_coordinate},
        server::{
            api_entities::{
                api_error::{ApiError, ErrorResponse},
                response::Response,
            },
            app_state::AppState,
        },
    },
};

/// Multipart body accepted by `POST /analyze`.
#[derive(Debug, ToSchema)]
pub struct AnalyzeLabelForm {
    /// Photo of the product's ingredient label.
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[utoipa::path(
    post,
    path = "/analyze",
    tag = "analysis",
    summary = "Analyze a food label",
    description = "Reads the ingredient list from the uploaded label and returns a health verdict",
    request_body(content = AnalyzeLabelForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, body = AnalysisResult),
        (status = 400, body = ErrorResponse),
        (status = 401, body = ErrorResponse),
        (status = 413, body = ErrorResponse),
        (status = 500, body = ErrorResponse),
    ),
    security(
        (),
        ("bearer" = [])
    )
)]
pub async fn analyze_label(
    State(state): State<AppState>,
    CallerIdentity(identity): CallerIdentity,
    mut multipart: Multipart,
) -> Result<Response<AnalysisResult>, ApiError> {
    let mut image: Option<(Bytes, Option<String>)> = None;
    let mut location = LocationForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "image" => {
                let file_name = field.file_name().map(str::to_string);
                let data = field.bytes().await?;

                if !data.is_empty() {
                    image = Some((data, file_name));
                }
            }
            "latitude" | "longitude" => {
                let value = field.text().await?;
                let coordinate = parse_coordinate(&name, &value)?;

                if name == "latitude" {
                    location.latitude = Some(coordinate);
                } else {
                    location.longitude = Some(coordinate);
                }
            }
            _ => {}
        }
    }

    let (image, image_name) =
        image.ok_or_else(|| ApiError::BadRequest("No image file provided".to_string()))?;
    let location = location.into_location()?;

    info!(
        image_bytes = image.len(),
        image_name = image_name.as_deref().unwrap_or("-"),
        "Label received"
    );

    let result = state
        .service
        .analyze_label(AnalyzeLabelInput {
            image,
            image_name,
            identity,
            location,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(result))
}
