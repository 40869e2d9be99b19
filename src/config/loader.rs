//! Load [`AppConfig`] from environment variables.

use crate::config::AppConfig;
use crate::error::ConfigError;
use axum::http::HeaderValue;
use sqlx::postgres::PgSslMode;
use std::str::FromStr;

impl AppConfig {
    /// Read configuration from the process environment. Call `dotenvy::dotenv()` first to honour `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. Unset and blank keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut cfg = AppConfig::default();

        if let Some(url) = get("DATABASE_URL") {
            cfg.database.url = url;
        }
        if let Some(mode) = get("DATABASE_SSL_MODE") {
            cfg.database.ssl_mode = PgSslMode::from_str(&mode).map_err(|e| invalid("DATABASE_SSL_MODE", &mode, e))?;
        }
        if let Some(n) = get("DATABASE_MAX_CONNECTIONS") {
            cfg.database.max_connections = parse_positive("DATABASE_MAX_CONNECTIONS", &n)?;
        }
        if let Some(host) = get("HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = get("PORT") {
            cfg.server.port = parse_positive("PORT", &port)?;
        }
        if let Some(limit) = get("BODY_LIMIT_BYTES") {
            cfg.server.body_limit = parse_positive("BODY_LIMIT_BYTES", &limit)?;
        }
        if let Some(origin) = get("CLIENT_URL") {
            HeaderValue::from_str(&origin).map_err(|e| invalid("CLIENT_URL", &origin, e))?;
            cfg.client_url = Some(origin);
        }
        if let Some(strict) = get("STRICT_UPDATE_VALIDATION") {
            cfg.validation.strict_update_name = parse_bool("STRICT_UPDATE_VALIDATION", &strict)?;
        }
        Ok(cfg)
    }
}

fn invalid(key: &'static str, value: &str, reason: impl ToString) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_positive<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr + Default + PartialEq,
    T::Err: ToString,
{
    let n = value.parse::<T>().map_err(|e| invalid(key, value, e))?;
    if n == T::default() {
        return Err(invalid(key, value, "must be greater than 0"));
    }
    Ok(n)
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, value, "expected a boolean")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let env: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|k| env.get(k).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = load(&[]).unwrap();
        assert_eq!(cfg.database.url, crate::config::DEFAULT_DATABASE_URL);
        assert!(matches!(cfg.database.ssl_mode, PgSslMode::Require));
        assert_eq!(cfg.server.port, crate::config::DEFAULT_PORT);
        assert!(cfg.client_url.is_none());
        assert!(!cfg.validation.strict_update_name);
    }

    #[test]
    fn reads_overrides() {
        let cfg = load(&[
            ("DATABASE_URL", "postgres://u:p@db:5432/shop"),
            ("DATABASE_SSL_MODE", "disable"),
            ("CLIENT_URL", "http://localhost:5173"),
            ("PORT", "8080"),
            ("STRICT_UPDATE_VALIDATION", "true"),
        ])
        .unwrap();
        assert_eq!(cfg.database.url, "postgres://u:p@db:5432/shop");
        assert!(matches!(cfg.database.ssl_mode, PgSslMode::Disable));
        assert_eq!(cfg.client_url.as_deref(), Some("http://localhost:5173"));
        assert_eq!(cfg.server.port, 8080);
        assert!(cfg.validation.strict_update_name);
    }

    #[test]
    fn blank_client_url_is_unset() {
        let cfg = load(&[("CLIENT_URL", "  ")]).unwrap();
        assert!(cfg.client_url.is_none());
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(matches!(load(&[("PORT", "0")]), Err(ConfigError::Invalid { key: "PORT", .. })));
        assert!(matches!(load(&[("PORT", "http")]), Err(ConfigError::Invalid { key: "PORT", .. })));
        assert!(matches!(
            load(&[("DATABASE_SSL_MODE", "sometimes")]),
            Err(ConfigError::Invalid { key: "DATABASE_SSL_MODE", .. })
        ));
        assert!(matches!(
            load(&[("STRICT_UPDATE_VALIDATION", "maybe")]),
            Err(ConfigError::Invalid { key: "STRICT_UPDATE_VALIDATION", .. })
        ));
    }
}
