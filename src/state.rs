//! Shared application state for all routes.

use crate::config::AppConfig;
use crate::service::ProductRepository;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub products: Arc<dyn ProductRepository>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(products: Arc<dyn ProductRepository>, config: AppConfig) -> Self {
        Self {
            products,
            config: Arc::new(config),
        }
    }
}
