use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{error, info};

use crate::domain::common::entities::app_errors::CoreError;

pub struct PostgresConfig {
    pub database_url: String,
}

#[derive(Clone)]
pub struct Postgres {
    db: DatabaseConnection,
}

impl Postgres {
    /// Connects and applies the embedded migrations.
    pub async fn new(config: PostgresConfig) -> Result<Self, CoreError> {
        let mut options = ConnectOptions::new(config.database_url);
        options.sqlx_logging(false);

        let db = Database::connect(options).await.map_err(|e| {
            error!("Failed to connect to database: {}", e);
            CoreError::PersistenceError(format!("Failed to connect to database: {}", e))
        })?;

        sqlx::migrate!("./migrations")
            .run(db.get_postgres_connection_pool())
            .await
            .map_err(|e| {
                error!("Failed to run database migrations: {}", e);
                CoreError::PersistenceError(format!("Failed to run migrations: {}", e))
            })?;

        info!("Database connected and migrated");

        Ok(Self { db })
    }

    pub fn get_db(&self) -> DatabaseConnection {
        self.db.clone()
    }
}
