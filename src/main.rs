//! Loads the application configuration and logs what was resolved.
//!
//! # Startup Flow
//!
//! 1. Initialize logging
//! 2. Load `.env` and the process environment
//! 3. Attach the database section when `DATABASE_URI` is non-empty

use app_config::{Config, DatabaseConfig, ProcessEnv, dotenv::load_dotenv, with_database_config};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Seed from .env before deciding whether a database is configured
    load_dotenv(None);

    let database = DatabaseConfig::from_env_if_configured(&ProcessEnv);
    let config = Config::load_from(&ProcessEnv, database.map(with_database_config));
    tracing::info!("Configuration loaded");

    tracing::info!(addr = %config.addr, "listen address");
    tracing::info!(bytes = config.secret_key.len(), "secret key");
    match &config.database {
        Some(db) => tracing::info!(
            max_open_conns = db.max_open_conns,
            max_idle_conns = db.max_idle_conns,
            min_idle_conns = db.min_idle_conns,
            conn_max_lifetime = db.conn_max_lifetime,
            "database configured"
        ),
        None => tracing::info!("no database configured"),
    }

    if config.secret_key.is_empty() {
        tracing::warn!("SECRET_KEY is empty");
    }

    Ok(())
}
