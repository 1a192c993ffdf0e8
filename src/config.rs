//! Application configuration assembly.
//!
//! The root [`Config`] is built from environment variables and then extended
//! by options applied in order. Loading never fails: anything missing or
//! malformed falls back to its default and is logged.
//!
//! ```no_run
//! use app_config::{Config, DatabaseConfig, ProcessEnv, with_database_config};
//!
//! let db = DatabaseConfig::from_env(&ProcessEnv);
//! let config = Config::load([with_database_config(db)]);
//! ```

use std::fmt;
use std::path::PathBuf;

use crate::{
    db::DatabaseConfig,
    dotenv::{load_dotenv, read_env_file},
    env::{EnvSource, Layered, MapEnv, ProcessEnv, get_string},
};

/// Default listen address when `ADDR` is not set.
pub const DEFAULT_ADDR: &str = ":8080";

/// A mutation applied to a partially built [`Config`].
pub type ConfigOption = Box<dyn FnOnce(&mut Config)>;

/// Application configuration.
///
/// # Environment Variables
///
/// - `ADDR` (optional): listen address, defaults to `:8080`
/// - `SECRET_KEY` (optional): secret key, defaults to empty
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub addr: String,

    pub secret_key: Vec<u8>,

    /// Set only through [`with_database_config`] or
    /// [`ConfigBuilder::database`].
    pub database: Option<DatabaseConfig>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("secret_key", &format_args!("<{} bytes>", self.secret_key.len()))
            .field("database", &self.database)
            .finish()
    }
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// First attempts to load a `.env` file (optional; variables already in
    /// the environment are kept), then reads `ADDR` and `SECRET_KEY` and
    /// applies `options` in order.
    pub fn load(options: impl IntoIterator<Item = ConfigOption>) -> Self {
        load_dotenv(None);
        Self::load_from(&ProcessEnv, options)
    }

    /// Load configuration from an explicit source.
    ///
    /// Later options see, and may overwrite, whatever earlier ones set.
    pub fn load_from(
        source: &impl EnvSource,
        options: impl IntoIterator<Item = ConfigOption>,
    ) -> Self {
        let mut config = Self {
            addr: get_string(source, "ADDR", DEFAULT_ADDR),
            secret_key: get_string(source, "SECRET_KEY", "").into_bytes(),
            database: None,
        };

        for option in options {
            option(&mut config);
        }

        config
    }

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Returns an option that sets the database section.
pub fn with_database_config(database: DatabaseConfig) -> ConfigOption {
    Box::new(move |config: &mut Config| {
        config.database = Some(database);
    })
}

/// Builder alternative to passing option closures directly.
///
/// Database sections and custom options are applied in the order they were
/// added, so the last one to touch a field wins.
#[derive(Default)]
pub struct ConfigBuilder {
    env_file: Option<PathBuf>,
    options: Vec<ConfigOption>,
}

impl ConfigBuilder {
    /// Read this env file instead of looking up `.env`.
    pub fn env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file = Some(path.into());
        self
    }

    pub fn database(self, database: DatabaseConfig) -> Self {
        self.option(with_database_config(database))
    }

    pub fn option(mut self, option: ConfigOption) -> Self {
        self.options.push(option);
        self
    }

    /// Load from the process environment, seeded from the env file.
    pub fn build(self) -> Config {
        load_dotenv(self.env_file.as_deref());
        Config::load_from(&ProcessEnv, self.options)
    }

    /// Load from `source`, with the env file (if any) filling in variables
    /// that `source` does not set. The process environment is not modified.
    pub fn build_from(self, source: &impl EnvSource) -> Config {
        let file_env = match &self.env_file {
            Some(path) => read_env_file(path).unwrap_or_else(|err| {
                tracing::info!(path = %path.display(), error = %err, "env file not loaded");
                MapEnv::new()
            }),
            None => MapEnv::new(),
        };

        Config::load_from(&Layered::new(source, file_env), self.options)
    }
}

impl fmt::Debug for ConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigBuilder")
            .field("env_file", &self.env_file)
            .field("options", &self.options.len())
            .finish()
    }
}
