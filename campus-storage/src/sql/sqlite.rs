use crate::migration::Migrator;
use campus_error::CPResult;
use campus_models::{constants::DATA_DIR, settings::Sqlite};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::time::Duration;
use tracing::{info, instrument, log::LevelFilter};

/// Initialize SQLite database connection with auto-creation support.
///
/// Uses the SQLite URL parameter `mode=rwc` for automatic file creation
/// when `auto_create` is enabled.
#[instrument(name = "init_sqlite_db", skip_all)]
pub async fn init_db(config: &Sqlite) -> CPResult<DatabaseConnection> {
    if config.auto_create {
        tokio::fs::create_dir_all(DATA_DIR).await?;
    }

    let mut opts = ConnectOptions::new(config.to_url());
    opts.connect_timeout(Duration::from_millis(config.timeout))
        .idle_timeout(Duration::from_millis(config.idle_timeout))
        .max_lifetime(Duration::from_millis(config.max_lifetime))
        .max_connections(config.max_connections);

    #[cfg(debug_assertions)]
    {
        opts.sqlx_logging(true)
            .sqlx_logging_level(LevelFilter::Debug);
    }
    #[cfg(not(debug_assertions))]
    {
        opts.sqlx_logging(false)
            .sqlx_logging_level(LevelFilter::Off);
    }

    info!(
        "Connecting to SQLite database at: {} (auto_create: {})",
        config.db_path(),
        config.auto_create
    );

    let db = Database::connect(opts).await?;
    info!("Successfully connected to SQLite database");

    Ok(db)
}

/// Open a private in-memory database with the full schema applied.
///
/// The pool is pinned to a single connection: every SQLite memory
/// connection is its own database.
pub async fn init_memory_db() -> CPResult<DatabaseConnection> {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(opts).await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm_migration::SchemaManager;

    #[tokio::test]
    async fn memory_db_has_full_schema() {
        let db = init_memory_db().await.unwrap();
        let manager = SchemaManager::new(&db);
        for table in [
            "settings_current",
            "course",
            "c_course_setting",
            "c_tool",
            "extra_field",
        ] {
            assert!(manager.has_table(table).await.unwrap(), "{table}");
        }
    }
}
