//! Database connection parameters.
//!
//! Only the parameters are modeled here; opening and pooling connections is
//! left to whatever driver the application uses.

use std::borrow::Cow;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    env::{EnvSource, get_int, get_string},
    error::ConfigError,
};

/// Prefix shared by every database environment variable.
pub const ENV_PREFIX: &str = "DATABASE_";

const DEFAULT_MAX_OPEN_CONNS: i64 = 25;
const DEFAULT_MAX_IDLE_CONNS: i64 = 10;
const DEFAULT_MIN_IDLE_CONNS: i64 = 5;
const DEFAULT_CONN_MAX_LIFETIME: i64 = 3600;

/// Connection parameters for a database.
///
/// # Environment Variables
///
/// - `DATABASE_URI`: connection string
/// - `DATABASE_MAX_OPEN_CONNS`: defaults to 25
/// - `DATABASE_MAX_IDLE_CONNS`: defaults to 10
/// - `DATABASE_MIN_IDLE_CONNS`: defaults to 5
/// - `DATABASE_CONN_MAX_LIFETIME`: seconds, defaults to 3600
///
/// No invariants are enforced between fields. Zero is a valid value for
/// every one of them.
///
/// `Debug` masks any credentials in the URI.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub uri: String,

    #[serde(default = "default_max_open_conns")]
    pub max_open_conns: i64,

    #[serde(default = "default_max_idle_conns")]
    pub max_idle_conns: i64,

    #[serde(default = "default_min_idle_conns")]
    pub min_idle_conns: i64,

    /// Maximum connection lifetime in seconds.
    #[serde(default = "default_conn_max_lifetime")]
    pub conn_max_lifetime: i64,
}

fn default_max_open_conns() -> i64 {
    DEFAULT_MAX_OPEN_CONNS
}

fn default_max_idle_conns() -> i64 {
    DEFAULT_MAX_IDLE_CONNS
}

fn default_min_idle_conns() -> i64 {
    DEFAULT_MIN_IDLE_CONNS
}

fn default_conn_max_lifetime() -> i64 {
    DEFAULT_CONN_MAX_LIFETIME
}

impl DatabaseConfig {
    /// Reads the `DATABASE_*` variables, falling back to defaults.
    ///
    /// Never fails: missing or malformed values are logged and replaced by
    /// their default, the same way the root configuration is loaded.
    pub fn from_env(source: &impl EnvSource) -> Self {
        Self {
            uri: get_string(source, "DATABASE_URI", ""),
            max_open_conns: get_int(source, "DATABASE_MAX_OPEN_CONNS", DEFAULT_MAX_OPEN_CONNS),
            max_idle_conns: get_int(source, "DATABASE_MAX_IDLE_CONNS", DEFAULT_MAX_IDLE_CONNS),
            min_idle_conns: get_int(source, "DATABASE_MIN_IDLE_CONNS", DEFAULT_MIN_IDLE_CONNS),
            conn_max_lifetime: get_int(
                source,
                "DATABASE_CONN_MAX_LIFETIME",
                DEFAULT_CONN_MAX_LIFETIME,
            ),
        }
    }

    /// Like [`DatabaseConfig::from_env`], but only when `DATABASE_URI` is
    /// set to a non-empty value.
    pub fn from_env_if_configured(source: &impl EnvSource) -> Option<Self> {
        source
            .get("DATABASE_URI")
            .is_some_and(|uri| !uri.is_empty())
            .then(|| Self::from_env(source))
    }

    /// Deserializes the `DATABASE_*` variables with `envy`.
    ///
    /// Empty values count as unset, so an empty numeric variable takes its
    /// default.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `DATABASE_URI` is unset or empty
    /// - a numeric variable is set but is not an integer
    pub fn from_env_strict(source: &impl EnvSource) -> Result<Self, ConfigError> {
        let vars = source
            .vars()
            .into_iter()
            .filter(|(_, value)| !value.is_empty());

        // Field names map onto the prefix: uri -> DATABASE_URI
        let config = envy::prefixed(ENV_PREFIX).from_iter::<_, Self>(vars)?;
        Ok(config)
    }

    /// Connection lifetime as a duration. `None` means connections are
    /// never closed for age.
    pub fn max_lifetime(&self) -> Option<Duration> {
        u64::try_from(self.conn_max_lifetime)
            .ok()
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("uri", &redact_uri(&self.uri))
            .field("max_open_conns", &self.max_open_conns)
            .field("max_idle_conns", &self.max_idle_conns)
            .field("min_idle_conns", &self.min_idle_conns)
            .field("conn_max_lifetime", &self.conn_max_lifetime)
            .finish()
    }
}

/// Replaces the userinfo part of a URI (`user:password@`) with `***@`.
fn redact_uri(uri: &str) -> Cow<'_, str> {
    let start = uri.find("://").map_or(0, |i| i + 3);
    let rest = &uri[start..];
    let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());

    match rest[..authority_end].rfind('@') {
        Some(at) => Cow::Owned(format!("{}***{}", &uri[..start], &rest[at..])),
        None => Cow::Borrowed(uri),
    }
}
