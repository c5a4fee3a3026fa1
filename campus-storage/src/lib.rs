mod migration;
mod sql;

use async_trait::async_trait;
use campus_error::{init::InitContextError, storage::StorageError, CPResult};
use campus_models::{settings::Settings, DbManager};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::{info, instrument};

pub use migration::Migrator;
pub use sea_orm_migration::MigratorTrait;
pub use sql::sqlite::init_memory_db;

/// Process wide database manager
pub struct CPDbManager {
    db_conn: Option<DatabaseConnection>,
}

#[async_trait]
impl DbManager for CPDbManager {
    #[inline]
    #[instrument(name = "init-db-manager", skip_all)]
    async fn init(settings: &Settings) -> CPResult<Arc<Self>, InitContextError> {
        let db_conn = {
            let db = sql::sqlite::init_db(&settings.db.sqlite)
                .await
                .map_err(|e| {
                    InitContextError::Primitive(format!("Failed to init SQLite database: {e}"))
                })?;

            Migrator::up(&db, None).await.map_err(|e| {
                InitContextError::Primitive(format!("Failed to migrate SQLite database: {e}"))
            })?;

            db
        };

        info!("Database manager initialized successfully");
        Ok(Arc::new(CPDbManager {
            db_conn: Some(db_conn),
        }))
    }

    #[inline]
    fn get_connection(&self) -> CPResult<DatabaseConnection, StorageError> {
        self.db_conn
            .as_ref()
            .ok_or(StorageError::StorageUnavailable)
            .cloned()
    }

    #[inline]
    #[instrument(name = "db_close", skip_all)]
    async fn close(&self) -> CPResult<()> {
        info!("Closing database connections...");
        if let Some(db) = &self.db_conn {
            db.clone().close().await?;
        }
        info!("Database connections closed successfully");
        Ok(())
    }
}
