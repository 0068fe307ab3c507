/*
 * Responsibility
 * - 環境変数の読み込み (PORT, APP_ENV, KV_URL, DATABASE_URL, BINDINGS_FILE など)
 * - 設定値のバリデーション (不正なら起動失敗)
 * - KV / DB は任意: 未設定でも起動し、使われた時点で BindingMissing になる
 */
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: Option<&str>) -> Self {
        match raw.unwrap_or("development").to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    /// `redis://...` for Valkey/Redis, `memory://` for an in-process store.
    pub kv_url: Option<String>,
    pub database_url: Option<String>,

    /// JSON object of bindings; when unset, bindings come from the process environment.
    pub bindings_file: Option<PathBuf>,

    pub request_timeout: Duration,
    pub body_limit_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port: u16 = parse_or(var("PORT"), "PORT", 3000)?;
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        let app_env = AppEnv::parse(var("APP_ENV").as_deref());

        let request_timeout_secs: u64 =
            parse_or(var("REQUEST_TIMEOUT_SECS"), "REQUEST_TIMEOUT_SECS", 30)?;
        if request_timeout_secs == 0 {
            return Err(ConfigError::Invalid("REQUEST_TIMEOUT_SECS"));
        }

        let body_limit_bytes: usize =
            parse_or(var("BODY_LIMIT_BYTES"), "BODY_LIMIT_BYTES", 1024 * 1024)?;

        Ok(Self {
            addr,
            app_env,
            kv_url: var("KV_URL"),
            database_url: var("DATABASE_URL"),
            bindings_file: var("BINDINGS_FILE").map(PathBuf::from),
            request_timeout: Duration::from_secs(request_timeout_secs),
            body_limit_bytes,
        })
    }
}

fn parse_or<T: FromStr>(
    raw: Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid(key)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.app_env, AppEnv::Development);
        assert!(config.kv_url.is_none());
        assert!(config.database_url.is_none());
        assert!(config.bindings_file.is_none());
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.body_limit_bytes, 1024 * 1024);
    }

    #[test]
    fn reads_bindings_and_env() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("APP_ENV", "Prod"),
            ("KV_URL", "memory://"),
            ("DATABASE_URL", "postgres://localhost/mail"),
        ])
        .unwrap();
        assert_eq!(config.addr.port(), 8080);
        assert!(config.app_env.is_production());
        assert_eq!(config.kv_url.as_deref(), Some("memory://"));
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/mail")
        );
    }

    #[test]
    fn empty_values_are_unset() {
        let config = config_from(&[("KV_URL", "  "), ("DATABASE_URL", "")]).unwrap();
        assert!(config.kv_url.is_none());
        assert!(config.database_url.is_none());
    }

    #[test]
    fn invalid_numbers_fail() {
        assert!(matches!(
            config_from(&[("PORT", "eighty")]),
            Err(ConfigError::Invalid("PORT"))
        ));
        assert!(matches!(
            config_from(&[("REQUEST_TIMEOUT_SECS", "0")]),
            Err(ConfigError::Invalid("REQUEST_TIMEOUT_SECS"))
        ));
    }
}
