use thiserror::Error;

/// Error type for startup wiring (config, database, logger)
#[derive(Error, Debug)]
pub enum InitContextError {
    /// Returned when a primitive error occurs
    #[error("primitive error: {0}")]
    Primitive(String),
}
