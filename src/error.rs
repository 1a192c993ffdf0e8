//! Error types for the strict loading paths.
//!
//! The default loaders never fail: a missing or malformed variable falls back
//! to its default and is logged. These errors only come out of the opt-in
//! helpers that read an env file directly or deserialize a section strictly.

/// Configuration error.
///
/// # Error Categories
///
/// - **Env file errors**: the file is missing, unreadable, or malformed
/// - **Environment errors**: a required variable is missing or a value
///   cannot be deserialized into its field type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Reading or parsing an env file failed.
    ///
    /// Wraps `dotenvy::Error` via `#[from]`.
    #[error("env file error: {0}")]
    EnvFile(#[from] dotenvy::Error),

    /// Deserializing environment variables into a section failed.
    #[error("environment error: {0}")]
    Env(#[from] envy::Error),
}

impl ConfigError {
    /// True when the env file simply does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConfigError::EnvFile(err) if err.not_found())
    }
}
