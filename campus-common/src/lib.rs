//! Process wiring shared by the campus binaries: configuration, logging and
//! the database manager.

mod logger;

pub use campus_error::{CPError, CPResult};
pub use logger::Logger;

use campus_models::{settings::Settings, DbManager};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::{info, instrument};

pub struct CPAppContext<D: DbManager> {
    settings: Settings,
    logger: Option<Logger>,
    db_manager: Arc<D>,
}

impl<D: DbManager> CPAppContext<D> {
    /// Load configuration, start logging and open the database.
    #[instrument(name = "init-app-context", skip_all)]
    pub async fn init(config_path: String) -> CPResult<Self> {
        let settings = Settings::new(config_path)?;
        let mut logger = Logger::from_level_name(&settings.general.log_level);
        logger.initialize()?;

        let mut ctx = Self::with_settings(settings).await?;
        ctx.logger = Some(logger);
        info!("Application context initialized");
        Ok(ctx)
    }

    /// Context over given settings, leaving the global subscriber alone
    pub async fn with_settings(settings: Settings) -> CPResult<Self> {
        let db_manager = D::init(&settings).await?;
        Ok(CPAppContext {
            settings,
            logger: None,
            db_manager,
        })
    }

    #[inline]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[inline]
    pub fn logger(&self) -> Option<&Logger> {
        self.logger.as_ref()
    }

    #[inline]
    pub fn connection(&self) -> CPResult<DatabaseConnection> {
        Ok(self.db_manager.get_connection()?)
    }

    pub async fn shutdown(&self) -> CPResult<()> {
        self.db_manager.close().await
    }
}
