//! Application configuration loaded from environment variables.
//!
//! # Layout
//!
//! - [`env`]: variable lookup with default fallbacks
//! - [`dotenv`]: optional `.env` file loading
//! - [`config`]: the root [`Config`] and its options
//! - [`db`]: database connection parameters
//! - [`error`]: errors from the strict loading paths
//!
//! # Loading Flow
//!
//! 1. Seed the process environment from `.env` (if present)
//! 2. Read `ADDR` and `SECRET_KEY`, falling back to defaults
//! 3. Apply each option in order

pub mod config;
pub mod db;
pub mod dotenv;
pub mod env;
pub mod error;

pub use config::{Config, ConfigBuilder, ConfigOption, with_database_config};
pub use db::DatabaseConfig;
pub use env::{
    EnvSource, Layered, MapEnv, ProcessEnv, get_env, get_env_as_int, get_int, get_string,
};
pub use error::ConfigError;
