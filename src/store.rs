//! Database connector: one process-wide pool, explicit open and close.

use crate::config::DatabaseConfig;
use crate::error::ConfigError;
use crate::migration::apply_migrations;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::str::FromStr;
use std::time::Duration;

/// Build the pool without touching the network; connections open on first use.
pub fn connect(config: &DatabaseConfig) -> Result<PgPool, ConfigError> {
    let options = PgConnectOptions::from_str(&config.url)
        .map_err(|e| ConfigError::Invalid {
            key: "DATABASE_URL",
            value: redact(&config.url),
            reason: e.to_string(),
        })?
        .ssl_mode(config.ssl_mode);
    Ok(PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect_lazy_with(options))
}

/// Authenticate and synchronize schema. Failures are logged and the server keeps running degraded;
/// returns whether the database is usable.
pub async fn initialize(pool: PgPool) -> bool {
    if let Err(e) = sqlx::query("SELECT 1").execute(&pool).await {
        tracing::error!(error = %e, "an error occurred while trying to authenticate to the database");
        return false;
    }
    if let Err(e) = apply_migrations(&pool).await {
        tracing::error!(error = %e, "schema synchronization failed");
        return false;
    }
    tracing::info!("database connection established");
    true
}

pub async fn close(pool: PgPool) {
    pool.close().await;
    tracing::info!("database pool closed");
}

/// Connection string without its password, for error messages.
fn redact(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            let userinfo = &url[scheme_end + 3..at];
            match userinfo.find(':') {
                Some(colon) => format!("{}{}:***{}", &url[..scheme_end + 3], &userinfo[..colon], &url[at..]),
                None => url.to_string(),
            }
        }
        _ => url.to_string(),
    }
}
