pub mod constants;
pub mod domain;
pub mod entities;
pub mod enums;
mod idens;
pub mod initializer;
pub mod settings;

pub use idens::extra_field::create_extra_field_table;

use async_trait::async_trait;
use campus_error::{init::InitContextError, storage::StorageError, CPResult};
use sea_orm::DatabaseConnection;
use settings::Settings;
use std::sync::Arc;

/// Database management interface.
///
/// Owns the connection pool for the lifetime of the process; repositories
/// borrow connections from it.
#[async_trait]
pub trait DbManager: Send + Sync + 'static {
    /// Connects to the configured database and brings the schema up to date.
    async fn init(settings: &Settings) -> CPResult<Arc<Self>, InitContextError>
    where
        Self: Sized;

    /// Retrieves a database connection from the connection pool.
    fn get_connection(&self) -> CPResult<DatabaseConnection, StorageError>;

    /// Gracefully closes all database connections.
    async fn close(&self) -> CPResult<()>;
}
