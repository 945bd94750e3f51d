use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    analysis::{
        entities::{AnalysisResult, SCHEMA_VERSION},
        value_objects::GeoLocation,
    },
    authentication::value_objects::Identity,
    common::generate_timestamp,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PersistedAnalysis {
    pub id: Uuid,
    pub subject: Option<String>,
    pub phone_number: Option<String>,
    /// `sha256:<hex>` digest of the uploaded image.
    pub image_reference: String,
    pub image_name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub schema_version: i32,
    pub result: AnalysisResult,
    #[serde(skip_serializing, default)]
    pub raw_response: String,
    pub created_at: DateTime<Utc>,
}

impl PersistedAnalysis {
    pub fn new(
        identity: Option<&Identity>,
        location: Option<GeoLocation>,
        image_reference: String,
        image_name: Option<String>,
        result: AnalysisResult,
        raw_response: String,
    ) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            subject: identity.map(|i| i.subject.clone()),
            phone_number: identity.and_then(|i| i.phone_number.clone()),
            image_reference,
            image_name,
            latitude: location.map(|l| l.latitude),
            longitude: location.map(|l| l.longitude),
            schema_version: SCHEMA_VERSION,
            result,
            raw_response,
            created_at: now,
        }
    }
}
