use thiserror::Error;

/// Failures raised by the plugin base itself, as opposed to the storage layer.
#[derive(Error, Debug)]
pub enum PluginError {
    /// Plugin identity is empty or contains characters that cannot form a setting key
    #[error("invalid plugin identity: `{0}`")]
    InvalidIdentity(String),
    /// Course ids are strictly positive
    #[error("invalid course id: {0}")]
    InvalidCourseId(i32),
    /// Plugin manifest is missing or malformed
    #[error("plugin manifest error: {0}")]
    Manifest(String),
    /// A language table exists but cannot be parsed
    #[error("language table error: {0}")]
    Lang(String),
}
