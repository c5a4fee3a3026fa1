pub mod init;
pub mod plugin;
pub mod storage;

use anyhow::Error as AnyhowError;
use config::ConfigError;
use init::InitContextError;
use plugin::PluginError;
use sea_orm::DbErr;
use serde_json::Error as SerdeJsonError;
use std::io::Error as IoError;
use storage::StorageError;
use thiserror::Error;

pub type CPResult<T, E = CPError> = anyhow::Result<T, E>;
pub type StorageResult<T, E = StorageError> = Result<T, E>;

#[derive(Error, Debug, Default)]
pub enum CPError {
    #[error("service unavailable")]
    #[default]
    ServiceUnavailable,
    #[error("{0}")]
    IoError(#[from] IoError),
    #[error("{0}")]
    Msg(String),
    #[error("{0}")]
    Anyhow(#[from] AnyhowError),
    #[error("{0}")]
    Json(#[from] SerdeJsonError),
    #[error("{0}")]
    ConfigError(#[from] ConfigError),
    #[error("{0}")]
    StorageError(#[from] StorageError),
    #[error("{0}")]
    InitContextError(#[from] InitContextError),
    #[error("{0}")]
    PluginError(#[from] PluginError),
}

impl From<String> for CPError {
    #[inline]
    fn from(e: String) -> Self {
        CPError::Msg(e)
    }
}

impl From<&str> for CPError {
    #[inline]
    fn from(e: &str) -> Self {
        CPError::Msg(e.to_string())
    }
}

impl From<DbErr> for CPError {
    #[inline]
    fn from(e: DbErr) -> Self {
        CPError::StorageError(StorageError::DBError(e))
    }
}
