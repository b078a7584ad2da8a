use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use category_storage::PoolSettings;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub api_keys: String,
    pub database_max_connections: u32,
    pub database_min_connections: u32,
    pub database_idle_timeout: Duration,
    pub database_max_lifetime: Duration,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            host: lookup("HOST").context("Cannot load HOST env variable")?,
            port: lookup("PORT")
                .context("Cannot load PORT env variable")?
                .parse()
                .context("PORT must be a number")?,
            database_url: lookup("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            api_keys: lookup("API_KEYS").unwrap_or_default(),
            database_max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 50)?,
            database_min_connections: parse_or(&lookup, "DATABASE_MIN_CONNECTIONS", 5)?,
            database_idle_timeout: Duration::from_secs(parse_or(
                &lookup,
                "DATABASE_IDLE_TIMEOUT_SECS",
                600,
            )?),
            database_max_lifetime: Duration::from_secs(parse_or(
                &lookup,
                "DATABASE_MAX_LIFETIME_SECS",
                3600,
            )?),
            request_timeout: Duration::from_secs(parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30)?),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.database_max_connections,
            min_connections: self.database_min_connections,
            idle_timeout: Some(self.database_idle_timeout),
            max_lifetime: Some(self.database_max_lifetime),
            ..PoolSettings::default()
        }
    }

    /// The database URL with credentials removed, for logging. Drops the
    /// userinfo before `@` and any query string, which may carry a password.
    pub fn redacted_database_url(&self) -> &str {
        let without_userinfo = self
            .database_url
            .rsplit_once('@')
            .map_or(self.database_url.as_str(), |(_, rest)| rest);

        without_userinfo
            .split_once('?')
            .map_or(without_userinfo, |(base, _)| base)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a number")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_required_values_and_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "3000"),
            ("DATABASE_URL", "postgres://app:secret@db:5432/categories"),
        ]))
        .unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.api_keys, "");
        assert_eq!(config.database_max_connections, 50);
        assert_eq!(config.database_min_connections, 5);
        assert_eq!(config.database_idle_timeout, Duration::from_secs(600));
        assert_eq!(config.database_max_lifetime, Duration::from_secs(3600));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("API_KEYS", "one,two"),
            ("DATABASE_MAX_CONNECTIONS", "8"),
            ("REQUEST_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.api_keys, "one,two");
        assert_eq!(config.pool_settings().max_connections, 8);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_missing_database_url_fails() {
        let result = Config::from_lookup(lookup_from(&[("HOST", "localhost"), ("PORT", "3000")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_numbers_fail() {
        let bad_port = Config::from_lookup(lookup_from(&[
            ("HOST", "localhost"),
            ("PORT", "http"),
            ("DATABASE_URL", "sqlite::memory:"),
        ]));
        assert!(bad_port.is_err());

        let bad_timeout = Config::from_lookup(lookup_from(&[
            ("HOST", "localhost"),
            ("PORT", "3000"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("REQUEST_TIMEOUT_SECS", "soon"),
        ]));
        assert!(bad_timeout.is_err());
    }

    #[test]
    fn test_redacted_database_url() {
        let config = Config::from_lookup(lookup_from(&[
            ("HOST", "localhost"),
            ("PORT", "3000"),
            ("DATABASE_URL", "postgres://app:secret@db:5432/categories"),
        ]))
        .unwrap();

        assert_eq!(config.redacted_database_url(), "db:5432/categories");
    }

    #[test]
    fn test_redacted_database_url_drops_query_credentials() {
        let config = Config::from_lookup(lookup_from(&[
            ("HOST", "localhost"),
            ("PORT", "3000"),
            (
                "DATABASE_URL",
                "postgres://db:5432/categories?user=app&password=secret",
            ),
        ]))
        .unwrap();

        let redacted = config.redacted_database_url();
        assert_eq!(redacted, "postgres://db:5432/categories");
        assert!(!redacted.contains("secret"));
    }
}
