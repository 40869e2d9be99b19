//! Product API: REST CRUD backend for products on PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod migration;
pub mod model;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

#[cfg(test)]
mod tests;

pub use config::AppConfig;
pub use error::{AppError, ConfigError, StorageError};
pub use migration::apply_migrations;
pub use model::{NewProduct, Product, ProductChanges};
pub use routes::app_router;
pub use service::{PgProductRepository, ProductRepository};
pub use state::AppState;
