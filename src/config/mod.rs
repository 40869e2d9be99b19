//! Process configuration, read once at startup.

mod loader;

use sqlx::postgres::PgSslMode;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/products";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT: usize = 100 * 1024;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    /// The one browser origin allowed to call the API. `None` admits only requests without an `Origin`.
    pub client_url: Option<String>,
    pub validation: ValidationConfig,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub ssl_mode: PgSslMode,
    pub max_connections: u32,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub body_limit: usize,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ValidationConfig {
    /// Also require a non-empty `name` on `PUT /products/:id`.
    pub strict_update_name: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: DEFAULT_DATABASE_URL.into(),
                ssl_mode: PgSslMode::Require,
                max_connections: DEFAULT_MAX_CONNECTIONS,
            },
            server: ServerConfig {
                host: DEFAULT_HOST.into(),
                port: DEFAULT_PORT,
                body_limit: DEFAULT_BODY_LIMIT,
            },
            client_url: None,
            validation: ValidationConfig::default(),
        }
    }
}
