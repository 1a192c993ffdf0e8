//! Environment file (`.env`) loading.

use std::path::{Path, PathBuf};

use crate::{env::MapEnv, error::ConfigError};

/// Best-effort load of an env file into the process environment.
///
/// With `None`, looks for `.env` in the current directory and its parents.
/// Variables already set in the process environment are left untouched, so
/// the real environment always wins over the file.
///
/// Failures are logged and never returned. Returns the path that was loaded.
pub fn load_dotenv(path: Option<&Path>) -> Option<PathBuf> {
    let result = match path {
        Some(path) => dotenvy::from_path(path).map(|()| path.to_path_buf()),
        None => dotenvy::dotenv(),
    };

    match result {
        Ok(loaded) => {
            tracing::debug!(path = %loaded.display(), "loaded env file");
            Some(loaded)
        }
        Err(err) if err.not_found() => {
            tracing::info!(error = %err, "no .env file found");
            None
        }
        Err(err) => {
            tracing::warn!(error = %err, "failed to load env file, continuing without it");
            None
        }
    }
}

/// Parses an env file into a [`MapEnv`] without touching the process
/// environment.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or a line fails to parse.
pub fn read_env_file(path: impl AsRef<Path>) -> Result<MapEnv, ConfigError> {
    let mut env = MapEnv::new();
    for item in dotenvy::from_path_iter(path.as_ref())? {
        let (key, value) = item?;
        env.set(key, value);
    }
    Ok(env)
}
