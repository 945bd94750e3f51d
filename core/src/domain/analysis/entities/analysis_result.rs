use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::domain::common::entities::app_errors::CoreError;

/// Version of the result shape the prompt asks for. Stored with every record.
pub const SCHEMA_VERSION: i32 = 1;

/// Label analysis as returned to callers.
///
/// The typed fields are a validated view of the model's object. The object
/// itself is what gets serialized, so nulls, empty lists and keys the schema
/// does not know about reach the caller unchanged.
#[derive(Debug, Clone, PartialEq, ToSchema)]
pub struct AnalysisResult {
    pub is_healthy: HealthVerdict,
    /// Ingredient name to FSSAI reference (empty when none applies).
    pub unhealthy_ingredients: BTreeMap<String, String>,
    /// Ingredient name to health impact and timeframe.
    pub health_impacts: BTreeMap<String, String>,
    pub alternatives: Vec<AlternativeProduct>,
    #[schema(ignore)]
    document: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum HealthVerdict {
    Healthy,
    Moderate,
    Unhealthy,
}

impl HealthVerdict {
    pub fn as_str(&self) -> &str {
        match self {
            HealthVerdict::Healthy => "Healthy",
            HealthVerdict::Moderate => "Moderate",
            HealthVerdict::Unhealthy => "Unhealthy",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
pub struct AlternativeProduct {
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub purchase_link: Option<String>,
}

#[derive(Deserialize)]
struct AnalysisFields {
    is_healthy: HealthVerdict,
    unhealthy_ingredients: BTreeMap<String, String>,
    health_impacts: BTreeMap<String, String>,
    #[serde(default)]
    alternatives: Option<Vec<AlternativeProduct>>,
}

impl TryFrom<Map<String, Value>> for AnalysisResult {
    type Error = serde_json::Error;

    fn try_from(document: Map<String, Value>) -> Result<Self, Self::Error> {
        let fields: AnalysisFields = serde_json::from_value(Value::Object(document.clone()))?;

        Ok(Self {
            is_healthy: fields.is_healthy,
            unhealthy_ingredients: fields.unhealthy_ingredients,
            health_impacts: fields.health_impacts,
            alternatives: fields.alternatives.unwrap_or_default(),
            document,
        })
    }
}

impl Serialize for AnalysisResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.document.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AnalysisResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let document = Map::<String, Value>::deserialize(deserializer)?;
        Self::try_from(document).map_err(serde::de::Error::custom)
    }
}

impl AnalysisResult {
    /// Validates an object extracted from a model reply against the schema.
    pub fn from_model_object(object: Map<String, Value>) -> Result<Self, CoreError> {
        Self::try_from(object).map_err(|e| {
            tracing::error!("Model reply does not match the analysis schema: {}", e);
            CoreError::SchemaMismatch(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_minimal_result_round_trips_exactly() {
        let value = json!({
            "is_healthy": "Unhealthy",
            "unhealthy_ingredients": { "Sugar": "" },
            "health_impacts": { "Sugar": "Raises blood sugar (3 months)" }
        });

        let result = AnalysisResult::from_model_object(object(value.clone())).unwrap();
        assert_eq!(result.is_healthy, HealthVerdict::Unhealthy);
        assert!(result.alternatives.is_empty());
        assert_eq!(serde_json::to_value(&result).unwrap(), value);
    }

    #[test]
    fn test_alternatives_and_extra_keys_are_kept() {
        let value = json!({
            "is_healthy": "Moderate",
            "unhealthy_ingredients": {},
            "health_impacts": {},
            "alternatives": [
                {
                    "name": "Rolled Oats",
                    "brand": "Acme",
                    "category": "Breakfast",
                    "purchase_link": "https://example.com/oats"
                },
                { "name": "Plain Yogurt" }
            ],
            "notes": "Label partially unreadable"
        });

        let result = AnalysisResult::from_model_object(object(value.clone())).unwrap();
        assert_eq!(result.alternatives.len(), 2);
        assert_eq!(result.alternatives[1].brand, None);
        assert_eq!(serde_json::to_value(&result).unwrap(), value);
    }

    #[test]
    fn test_empty_lists_nulls_and_nested_extras_are_kept() {
        let value = json!({
            "is_healthy": "Healthy",
            "unhealthy_ingredients": {},
            "health_impacts": {},
            "alternatives": []
        });
        let result = AnalysisResult::from_model_object(object(value.clone())).unwrap();
        assert!(result.alternatives.is_empty());
        assert_eq!(serde_json::to_value(&result).unwrap(), value);

        let value = json!({
            "is_healthy": "Moderate",
            "unhealthy_ingredients": {},
            "health_impacts": {},
            "alternatives": [
                { "name": "Oats", "brand": null, "category": "Cereal", "price": "99" }
            ]
        });
        let result = AnalysisResult::from_model_object(object(value.clone())).unwrap();
        assert_eq!(result.alternatives[0].brand, None);
        assert_eq!(result.alternatives[0].category.as_deref(), Some("Cereal"));
        assert_eq!(serde_json::to_value(&result).unwrap(), value);
    }

    #[test]
    fn test_stored_document_deserializes_with_validation() {
        let stored = json!({
            "is_healthy": "Unhealthy",
            "unhealthy_ingredients": { "Sugar": "" },
            "health_impacts": {},
            "alternatives": null
        });
        let result: AnalysisResult = serde_json::from_value(stored.clone()).unwrap();
        assert!(result.alternatives.is_empty());
        assert_eq!(serde_json::to_value(&result).unwrap(), stored);

        let corrupt = json!({ "is_healthy": "Unknown" });
        assert!(serde_json::from_value::<AnalysisResult>(corrupt).is_err());
    }

    #[test]
    fn test_missing_verdict_is_schema_mismatch() {
        let err = AnalysisResult::from_model_object(object(json!({
            "unhealthy_ingredients": {},
            "health_impacts": {}
        })))
        .unwrap_err();
        assert!(matches!(err, CoreError::SchemaMismatch(_)));
    }

    #[test]
    fn test_unknown_verdict_is_schema_mismatch() {
        let err = AnalysisResult::from_model_object(object(json!({
            "is_healthy": "Probably fine",
            "unhealthy_ingredients": {},
            "health_impacts": {}
        })))
        .unwrap_err();
        assert!(matches!(err, CoreError::SchemaMismatch(_)));
    }

    #[test]
    fn test_flat_map_with_non_string_values_is_rejected() {
        let err = AnalysisResult::from_model_object(object(json!({
            "is_healthy": "Healthy",
            "unhealthy_ingredients": { "Salt": 3 },
            "health_impacts": {}
        })))
        .unwrap_err();
        assert!(matches!(err, CoreError::SchemaMismatch(_)));
    }
}
