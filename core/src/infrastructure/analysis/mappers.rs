use crate::{
    domain::{
        analysis::entities::{AnalysisResult, PersistedAnalysis},
        common::entities::app_errors::CoreError,
    },
    entity::label_analyses,
};

impl TryFrom<label_analyses::Model> for PersistedAnalysis {
    type Error = CoreError;

    fn try_from(model: label_analyses::Model) -> Result<Self, Self::Error> {
        let result: AnalysisResult = serde_json::from_value(model.result).map_err(|e| {
            tracing::error!("Stored analysis {} has an unreadable result: {}", model.id, e);
            CoreError::PersistenceError(format!("Stored analysis {} is corrupt", model.id))
        })?;

        Ok(Self {
            id: model.id,
            subject: model.subject,
            phone_number: model.phone_number,
            image_reference: model.image_reference,
            image_name: model.image_name,
            latitude: model.latitude,
            longitude: model.longitude,
            schema_version: model.schema_version,
            result,
            raw_response: model.raw_response,
            created_at: model.created_at.to_utc(),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    use super::*;

    fn model(result: serde_json::Value) -> label_analyses::Model {
        label_analyses::Model {
            id: Uuid::new_v4(),
            subject: Some("uid".to_string()),
            phone_number: None,
            image_reference: "sha256:00".to_string(),
            image_name: None,
            latitude: Some(1.5),
            longitude: Some(2.5),
            schema_version: 1,
            verdict: "Healthy".to_string(),
            result,
            raw_response: "{}".to_string(),
            created_at: Utc::now().fixed_offset(),
        }
    }

    #[test]
    fn test_model_maps_to_domain() {
        let analysis = PersistedAnalysis::try_from(model(json!({
            "is_healthy": "Healthy",
            "unhealthy_ingredients": {},
            "health_impacts": {}
        })))
        .unwrap();
        assert_eq!(analysis.subject.as_deref(), Some("uid"));
        assert_eq!(analysis.latitude, Some(1.5));
        assert!(analysis.result.alternatives.is_empty());
    }

    #[test]
    fn test_corrupt_result_is_persistence_error() {
        let err = PersistedAnalysis::try_from(model(json!({ "dishes": [] }))).unwrap_err();
        assert!(matches!(err, CoreError::PersistenceError(_)));
    }
}
