use anyhow::{Context, Result, anyhow};
use std::env;
use std::fmt::Display;
use std::str::FromStr;
use tracing::info;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,
    pub api_prefix: String,
    pub db_max_connections: u32,

    /// JSON body limit. Photos travel inline as data URIs.
    pub max_payload_bytes: usize,

    // Rate limiting
    pub rate_submit_per_min: u32,

    /// Reject submissions whose company name matches no stored company.
    pub require_known_company: bool,

    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| anyhow!("DATABASE_URL must be set"))?;

        Ok(Self {
            database_url,
            server_addr: lookup("SERVER_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string()),
            api_prefix: lookup("API_PREFIX").unwrap_or_else(|| "/api".to_string()),
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?,
            max_payload_bytes: parse_or(&lookup, "MAX_PAYLOAD_BYTES", 10 * 1024 * 1024)?,
            rate_submit_per_min: parse_or(&lookup, "RATE_SUBMIT_PER_MIN", 60)?,
            require_known_company: parse_or(&lookup, "REQUIRE_KNOWN_COMPANY", false)?,
            log_dir: lookup("LOG_DIR").unwrap_or_else(|| "logs".to_string()),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {key} value: {raw:?}")),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_database_url_is_fatal() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));

        let err = Config::from_lookup(lookup_from(&[("DATABASE_URL", "  ")])).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let config = Config::from_lookup(lookup_from(&[("DATABASE_URL", "memory:")])).unwrap();
        assert_eq!(config.database_url, "memory:");
        assert_eq!(config.server_addr, "0.0.0.0:8080");
        assert_eq!(config.api_prefix, "/api");
        assert_eq!(config.db_max_connections, 10);
        assert_eq!(config.max_payload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.rate_submit_per_min, 60);
        assert!(!config.require_known_company);
        assert_eq!(config.log_dir, "logs");
    }

    #[test]
    fn overrides_are_parsed() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "mysql://u:p@localhost/attendance"),
            ("API_PREFIX", "/v2"),
            ("RATE_SUBMIT_PER_MIN", "5"),
            ("REQUIRE_KNOWN_COMPANY", "true"),
            ("MAX_PAYLOAD_BYTES", " 2048 "),
        ]))
        .unwrap();
        assert_eq!(config.api_prefix, "/v2");
        assert_eq!(config.rate_submit_per_min, 5);
        assert!(config.require_known_company);
        assert_eq!(config.max_payload_bytes, 2048);
    }

    #[test]
    fn unparseable_value_names_the_variable() {
        let err = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "memory:"),
            ("DB_MAX_CONNECTIONS", "lots"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("DB_MAX_CONNECTIONS"));
    }
}
