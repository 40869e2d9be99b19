//! API tests driving the assembled router with in-memory repositories.
//!
//! - **api_tests**: product CRUD, validation, and storage error mapping
//! - **server_tests**: root route, cross-origin policy, docs, body limits


use crate::config::AppConfig;
use crate::error::StorageError;
use crate::model::{NewProduct, Product, ProductChanges};
use crate::routes::app_router;
use crate::service::ProductRepository;
use crate::state::AppState;
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Repository keeping rows in memory, ids assigned like a SERIAL column.
#[derive(Default)]
pub struct MemoryProductRepository {
    rows: Mutex<Vec<Product>>,
    last_id: AtomicI32,
}

#[async_trait]
impl ProductRepository for MemoryProductRepository {
    async fn create(&self, fields: NewProduct) -> Result<Product, StorageError> {
        let now = Utc::now();
        let product = Product {
            id: self.last_id.fetch_add(1, Ordering::SeqCst) + 1,
            name: fields.name,
            price: fields.price,
            availability: fields.availability.unwrap_or(true),
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(product.clone());
        Ok(product)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, StorageError> {
        Ok(self.rows.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Product>, StorageError> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by_key(|p| p.id);
        Ok(rows)
    }

    async fn update(&self, mut record: Product, changes: ProductChanges) -> Result<Product, StorageError> {
        let mut rows = self.rows.lock().unwrap();
        let target = match rows.iter_mut().find(|p| p.id == record.id) {
            Some(row) => row,
            None => &mut record,
        };
        changes.apply_to(target);
        target.updated_at = Utc::now();
        Ok(target.clone())
    }

    async fn destroy(&self, record: &Product) -> Result<(), StorageError> {
        self.rows.lock().unwrap().retain(|p| p.id != record.id);
        Ok(())
    }
}

/// Repository whose every call fails as if the pool could not hand out a connection.
pub struct UnavailableRepository;

fn unavailable() -> StorageError {
    StorageError::Database(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl ProductRepository for UnavailableRepository {
    async fn create(&self, _fields: NewProduct) -> Result<Product, StorageError> {
        Err(unavailable())
    }

    async fn find_by_id(&self, _id: i32) -> Result<Option<Product>, StorageError> {
        Err(unavailable())
    }

    async fn find_all(&self) -> Result<Vec<Product>, StorageError> {
        Err(unavailable())
    }

    async fn update(&self, _record: Product, _changes: ProductChanges) -> Result<Product, StorageError> {
        Err(unavailable())
    }

    async fn destroy(&self, _record: &Product) -> Result<(), StorageError> {
        Err(unavailable())
    }
}

pub fn app_with(repo: Arc<dyn ProductRepository>, config: AppConfig) -> Router {
    app_router(AppState::new(repo, config))
}

pub fn memory_app() -> Router {
    app_with(Arc::new(MemoryProductRepository::default()), AppConfig::default())
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// JSON body, or the raw text as a JSON string when the body is not JSON.
    pub body: Value,
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    TestResponse { status, headers, body }
}

pub fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()
}
