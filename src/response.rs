//! Standard response envelope helpers.

use axum::{http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize)]
pub struct DataBody<T> {
    pub data: T,
}

/// Body of a successful delete: the confirmation and the remaining products.
#[derive(Serialize)]
pub struct DeletedBody<T> {
    pub message: &'static str,
    pub data: T,
}

#[derive(Serialize, ToSchema)]
pub struct MessageBody {
    pub msg: &'static str,
}

pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<DataBody<T>>) {
    (StatusCode::CREATED, Json(DataBody { data }))
}

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<DataBody<T>>) {
    (StatusCode::OK, Json(DataBody { data }))
}

pub fn deleted<T: Serialize>(message: &'static str, data: T) -> (StatusCode, Json<DeletedBody<T>>) {
    (StatusCode::OK, Json(DeletedBody { message, data }))
}
