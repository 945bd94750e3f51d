use bytes::Bytes;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    authentication::value_objects::Identity, common::entities::app_errors::CoreError,
};

/// One label image submitted for analysis.
#[derive(Debug, Clone)]
pub struct AnalyzeLabelInput {
    pub image: Bytes,
    pub image_name: Option<String>,
    pub identity: Option<Identity>,
    pub location: Option<GeoLocation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoLocation {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoreError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(CoreError::InvalidInput(format!(
                "latitude must be between -90 and 90, got {latitude}"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(CoreError::InvalidInput(format!(
                "longitude must be between -180 and 180, got {longitude}"
            )));
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Raw OCR output. No structure is guaranteed and it may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedText(String);

impl ExtractedText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Default)]
pub struct GetAnalysesFilter {
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

impl GetAnalysesFilter {
    /// Requested page size, defaulted and clamped to `1..=MAX_PAGE_SIZE`.
    pub fn page_size(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }
}
