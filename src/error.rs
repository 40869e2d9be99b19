//! Typed errors and HTTP mapping.

use crate::service::FieldError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}' ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Failure reported by the persistence layer.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Field values that cannot be stored in the `products` columns.
    #[error("Validation error: {}", .0.join(",\n"))]
    Validation(Vec<String>),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StorageError {
    pub fn name(&self) -> &'static str {
        match self {
            StorageError::Validation(_) => "ValidationError",
            StorageError::Database(
                sqlx::Error::PoolTimedOut
                | sqlx::Error::PoolClosed
                | sqlx::Error::Io(_)
                | sqlx::Error::Tls(_),
            ) => "ConnectionError",
            StorageError::Database(_) => "DatabaseError",
        }
    }

    /// The error as a JSON object, as returned to clients in `{ "error": ... }`.
    pub fn to_json(&self) -> Value {
        let mut body = json!({
            "name": self.name(),
            "message": self.to_string(),
        });
        match self {
            StorageError::Validation(messages) => {
                body["errors"] = messages
                    .iter()
                    .map(|m| json!({ "message": m }))
                    .collect();
            }
            StorageError::Database(sqlx::Error::Database(db)) => {
                if let Some(code) = db.code() {
                    body["code"] = Value::String(code.into_owned());
                }
            }
            StorageError::Database(_) => {}
        }
        body
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("validation failed with {} error(s)", .0.len())]
    Validation(Vec<FieldError>),
    #[error("{0}")]
    NotFound(&'static str),
    /// Storage failure reported to the client as a 400 with the raw error.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// Storage failure on a path that does not convert it into a client response.
    #[error("unhandled storage failure: {0}")]
    Unhandled(StorageError),
    #[error("{message}")]
    Body { status: StatusCode, message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::Validation(errors) => (StatusCode::BAD_REQUEST, json!(errors)),
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, json!(message)),
            AppError::Storage(e) => {
                tracing::warn!(error = %e, "storage error");
                (StatusCode::BAD_REQUEST, e.to_json())
            }
            AppError::Unhandled(e) => {
                let error_id = uuid::Uuid::new_v4();
                tracing::error!(error = ?e, %error_id, "unhandled storage failure");
                (StatusCode::INTERNAL_SERVER_ERROR, json!("Internal Server Error"))
            }
            AppError::Body { status, message } => (status, json!(message)),
        };
        (status, Json(json!({ "error": error }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::Location;

    #[test]
    fn coercion_failures_are_validation_errors() {
        let e = StorageError::Validation(vec!["name cannot be an array or an object".into()]);
        let body = e.to_json();
        assert_eq!(body["name"], "ValidationError");
        assert_eq!(body["errors"][0]["message"], "name cannot be an array or an object");
        assert!(body["message"].as_str().unwrap().starts_with("Validation error:"));
    }

    #[test]
    fn pool_failures_are_connection_errors() {
        let e = StorageError::Database(sqlx::Error::PoolTimedOut);
        assert_eq!(e.name(), "ConnectionError");
        assert!(e.to_json().get("errors").is_none());
    }

    #[test]
    fn status_codes() {
        let validation = AppError::Validation(vec![FieldError::new(
            Location::Body,
            "name",
            None,
            "Name cannot be empty",
        )]);
        assert_eq!(validation.into_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::NotFound("Item doesn't exist").into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Storage(StorageError::Database(sqlx::Error::RowNotFound))
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Unhandled(StorageError::Database(sqlx::Error::PoolClosed))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
