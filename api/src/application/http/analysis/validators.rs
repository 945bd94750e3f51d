use nutrilens_core::domain::analysis::value_objects::GeoLocation;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::application::http::server::api_entities::api_error::ApiError;

/// Optional coordinates sent alongside the label image.
#[derive(Debug, Default, Validate)]
#[validate(schema(function = "validate_coordinate_pair"))]
pub struct LocationForm {
    #[validate(range(min = -90.0, max = 90.0, message = "latitude must be between -90 and 90"))]
    pub latitude: Option<f64>,
    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "longitude must be between -180 and 180"
    ))]
    pub longitude: Option<f64>,
}

fn validate_coordinate_pair(form: &LocationForm) -> Result<(), ValidationError> {
    if form.latitude.is_some() != form.longitude.is_some() {
        return Err(ValidationError::new("coordinate_pair")
            .with_message("latitude and longitude must be provided together".into()));
    }
    Ok(())
}

impl LocationForm {
    pub fn into_location(self) -> Result<Option<GeoLocation>, ApiError> {
        self.validate()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;

        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Ok(Some(GeoLocation::new(latitude, longitude)?)),
            _ => Ok(None),
        }
    }
}

pub fn parse_coordinate(name: &str, value: &str) -> Result<f64, ApiError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| ApiError::BadRequest(format!("{name} must be a number, got '{value}'")))
}

#[derive(Debug, Serialize, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct GetAnalysesParams {
    #[schema(example = 0)]
    pub offset: Option<u32>,
    #[schema(example = 20)]
    pub limit: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_location_is_none() {
        assert_eq!(LocationForm::default().into_location().unwrap(), None);
    }

    #[test]
    fn test_complete_location_is_accepted() {
        let form = LocationForm {
            latitude: Some(12.97),
            longitude: Some(77.59),
        };
        let location = form.into_location().unwrap().unwrap();
        assert_eq!(location.latitude, 12.97);
        assert_eq!(location.longitude, 77.59);
    }

    #[test]
    fn test_half_a_location_is_rejected() {
        let form = LocationForm {
            latitude: Some(12.97),
            longitude: None,
        };
        assert!(matches!(
            form.into_location(),
            Err(ApiError::BadRequest(message)) if message.contains("together")
        ));
    }

    #[test]
    fn test_out_of_range_location_is_rejected() {
        let form = LocationForm {
            latitude: Some(91.0),
            longitude: Some(0.0),
        };
        assert!(matches!(form.into_location(), Err(ApiError::BadRequest(_))));

        let form = LocationForm {
            latitude: Some(f64::NAN),
            longitude: Some(0.0),
        };
        assert!(matches!(form.into_location(), Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(parse_coordinate("latitude", " 12.5 ").unwrap(), 12.5);
        assert!(parse_coordinate("latitude", "north").is_err());
    }
}
