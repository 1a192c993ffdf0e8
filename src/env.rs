//! Environment variable access with default fallbacks.
//!
//! Lookups go through the [`EnvSource`] trait so callers can read from the
//! real process environment ([`ProcessEnv`]), an in-memory map ([`MapEnv`]),
//! or a combination of both ([`Layered`]).
//!
//! Nothing is cached: every call reads the source again.

use std::collections::HashMap;
use std::env;

/// A key-value lookup for environment variables.
pub trait EnvSource {
    /// Returns the value of `key`, or `None` if it is not set.
    fn get(&self, key: &str) -> Option<String>;

    /// Returns every variable visible through this source.
    fn vars(&self) -> Vec<(String, String)>;
}

impl<S: EnvSource + ?Sized> EnvSource for &S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn vars(&self) -> Vec<(String, String)> {
        (**self).vars()
    }
}

/// The process environment.
///
/// Values that are not valid unicode are treated as unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }

    fn vars(&self) -> Vec<(String, String)> {
        env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }
}

/// An in-memory environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Builder-style variant of [`MapEnv::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvSource for MapEnv {
    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn vars(&self) -> Vec<(String, String)> {
        self.vars
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

/// Two sources stacked: `primary` is consulted first, `fallback` fills gaps.
///
/// An empty value in `primary` counts as set, so it shadows the fallback.
#[derive(Debug, Clone)]
pub struct Layered<A, B> {
    pub primary: A,
    pub fallback: B,
}

impl<A, B> Layered<A, B> {
    pub fn new(primary: A, fallback: B) -> Self {
        Self { primary, fallback }
    }
}

impl<A: EnvSource, B: EnvSource> EnvSource for Layered<A, B> {
    fn get(&self, key: &str) -> Option<String> {
        self.primary.get(key).or_else(|| self.fallback.get(key))
    }

    fn vars(&self) -> Vec<(String, String)> {
        let mut merged: HashMap<String, String> = self.fallback.vars().into_iter().collect();
        merged.extend(self.primary.vars());
        merged.into_iter().collect()
    }
}

/// Reads `key` as a string.
///
/// Returns `default` when the variable is unset or empty. A set value is
/// returned verbatim, without trimming.
pub fn get_string(source: &impl EnvSource, key: &str, default: &str) -> String {
    match source.get(key) {
        Some(value) if !value.is_empty() => value,
        _ => {
            tracing::warn!(key, default, "environment variable is not set, using default");
            default.to_string()
        }
    }
}

/// Reads `key` as a base-10 signed integer.
///
/// Returns `default` when the variable is unset, empty, or does not parse.
/// The parse error is logged and swallowed.
pub fn get_int(source: &impl EnvSource, key: &str, default: i64) -> i64 {
    let value = match source.get(key) {
        Some(value) if !value.is_empty() => value,
        _ => {
            tracing::warn!(key, default, "environment variable is not set, using default");
            return default;
        }
    };

    match value.parse::<i64>() {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::warn!(
                key,
                value = %value,
                default,
                error = %err,
                "failed to parse environment variable as integer, using default"
            );
            default
        }
    }
}

/// [`get_string`] against the process environment.
pub fn get_env(key: &str, default: &str) -> String {
    get_string(&ProcessEnv, key, default)
}

/// [`get_int`] against the process environment.
pub fn get_env_as_int(key: &str, default: i64) -> i64 {
    get_int(&ProcessEnv, key, default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_string_missing_uses_default() {
        let env = MapEnv::new();
        assert_eq!(get_string(&env, "ADDR", ":8080"), ":8080");
        assert_eq!(get_string(&env, "ADDR", ""), "");
    }

    #[test]
    fn test_get_string_empty_uses_default() {
        let env = MapEnv::new().with("ADDR", "");
        assert_eq!(get_string(&env, "ADDR", ":8080"), ":8080");
    }

    #[test]
    fn test_get_string_returns_value_verbatim() {
        let env = MapEnv::new().with("ADDR", "  :3000 ");
        assert_eq!(get_string(&env, "ADDR", ":8080"), "  :3000 ");
        assert_eq!(get_string(&env, "ADDR", "ignored"), "  :3000 ");
    }

    #[test]
    fn test_get_int_parses_values() {
        let env = MapEnv::new()
            .with("POSITIVE", "42")
            .with("NEGATIVE", "-7")
            .with("ZERO", "0")
            .with("PLUS", "+5");

        assert_eq!(get_int(&env, "POSITIVE", 1), 42);
        assert_eq!(get_int(&env, "NEGATIVE", 1), -7);
        assert_eq!(get_int(&env, "ZERO", 1), 0);
        assert_eq!(get_int(&env, "PLUS", 1), 5);
    }

    #[test]
    fn test_get_int_missing_or_empty_uses_default() {
        let env = MapEnv::new().with("EMPTY", "");
        assert_eq!(get_int(&env, "MISSING", 25), 25);
        assert_eq!(get_int(&env, "EMPTY", -3), -3);
    }

    #[test]
    fn test_get_int_invalid_uses_default() {
        let env = MapEnv::new()
            .with("WORD", "ten")
            .with("FLOAT", "1.5")
            .with("PADDED", " 10")
            .with("HUGE", "99999999999999999999");

        assert_eq!(get_int(&env, "WORD", 10), 10);
        assert_eq!(get_int(&env, "FLOAT", 10), 10);
        assert_eq!(get_int(&env, "PADDED", 10), 10);
        assert_eq!(get_int(&env, "HUGE", 10), 10);
    }

    #[test]
    fn test_reads_are_not_cached() {
        let mut env = MapEnv::new().with("ADDR", ":1");
        assert_eq!(get_string(&env, "ADDR", ":8080"), ":1");

        env.set("ADDR", ":2");
        assert_eq!(get_string(&env, "ADDR", ":8080"), ":2");
    }

    #[test]
    fn test_layered_primary_wins() {
        let process = MapEnv::new().with("ADDR", ":9000");
        let file = MapEnv::new()
            .with("ADDR", ":1234")
            .with("SECRET_KEY", "from-file");
        let env = Layered::new(process, file);

        assert_eq!(get_string(&env, "ADDR", ":8080"), ":9000");
        assert_eq!(get_string(&env, "SECRET_KEY", ""), "from-file");
        assert_eq!(get_string(&env, "MISSING", "d"), "d");

        let mut vars = env.vars();
        vars.sort();
        assert_eq!(
            vars,
            vec![
                ("ADDR".to_string(), ":9000".to_string()),
                ("SECRET_KEY".to_string(), "from-file".to_string()),
            ]
        );
    }

    #[test]
    fn test_map_env_from_iter() {
        let env: MapEnv = [("A", "1"), ("B", "2")].into_iter().collect();
        assert_eq!(env.len(), 2);
        assert_eq!(env.get("B").as_deref(), Some("2"));
    }
}
