use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use tracing::error;
use uuid::Uuid;

use crate::{
    domain::{
        analysis::{
            entities::PersistedAnalysis, ports::AnalysisRepository,
            value_objects::GetAnalysesFilter,
        },
        common::entities::app_errors::CoreError,
    },
    entity::label_analyses::{
        ActiveModel as AnalysisActiveModel, Column as AnalysisColumn, Entity as AnalysisEntity,
    },
};

#[derive(Debug, Clone)]
pub struct PostgresAnalysisRepository {
    pub db: DatabaseConnection,
}

impl PostgresAnalysisRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl AnalysisRepository for PostgresAnalysisRepository {
    async fn create_analysis(
        &self,
        analysis: PersistedAnalysis,
    ) -> Result<PersistedAnalysis, CoreError> {
        let result_json = serde_json::to_value(&analysis.result).map_err(|e| {
            error!("Failed to serialize analysis result: {}", e);
            CoreError::PersistenceError(format!("Failed to serialize analysis result: {}", e))
        })?;

        let created = AnalysisEntity::insert(AnalysisActiveModel {
            id: Set(analysis.id),
            subject: Set(analysis.subject),
            phone_number: Set(analysis.phone_number),
            image_reference: Set(analysis.image_reference),
            image_name: Set(analysis.image_name),
            latitude: Set(analysis.latitude),
            longitude: Set(analysis.longitude),
            schema_version: Set(analysis.schema_version),
            verdict: Set(analysis.result.is_healthy.as_str().to_string()),
            result: Set(result_json),
            raw_response: Set(analysis.raw_response),
            created_at: Set(analysis.created_at.fixed_offset()),
        })
        .exec_with_returning(&self.db)
        .await
        .map_err(|e| {
            error!("Failed to create label analysis: {}", e);
            CoreError::PersistenceError(format!("Failed to store analysis: {}", e))
        })?;

        PersistedAnalysis::try_from(created)
    }

    async fn get_by_id(
        &self,
        analysis_id: Uuid,
        subject: String,
    ) -> Result<Option<PersistedAnalysis>, CoreError> {
        AnalysisEntity::find()
            .filter(AnalysisColumn::Id.eq(analysis_id))
            .filter(AnalysisColumn::Subject.eq(subject))
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get label analysis: {}", e);
                CoreError::PersistenceError(format!("Failed to load analysis: {}", e))
            })?
            .map(PersistedAnalysis::try_from)
            .transpose()
    }

    async fn get_by_subject(
        &self,
        subject: String,
        filter: GetAnalysesFilter,
    ) -> Result<Vec<PersistedAnalysis>, CoreError> {
        let mut query = AnalysisEntity::find()
            .filter(AnalysisColumn::Subject.eq(subject))
            .order_by_desc(AnalysisColumn::CreatedAt);

        if let Some(offset) = filter.offset {
            query = query.offset(offset as u64);
        }

        if let Some(limit) = filter.limit {
            query = query.limit(limit as u64);
        }

        query
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to list label analyses: {}", e);
                CoreError::PersistenceError(format!("Failed to list analyses: {}", e))
            })?
            .into_iter()
            .map(PersistedAnalysis::try_from)
            .collect()
    }
}
