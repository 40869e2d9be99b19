//! Product CRUD handlers: list, create, read, update, delete.

use crate::error::AppError;
use crate::extractors::Validated;
use crate::model::{NewProduct, ProductChanges};
use crate::openapi::{DeletedResponse, MessageError, ProductInput, ProductListResponse, ProductResponse, ProductUpdate, ValidationErrors};
use crate::response::{created, deleted, ok};
use crate::service::{CreateRules, DeleteRules, NoRules, ReadRules, UpdateRules};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

pub const READ_NOT_FOUND: &str = "An item with the provided id does not exist in the database";
pub const UPDATE_NOT_FOUND: &str = "The item doesn't exist";
pub const DELETE_NOT_FOUND: &str = "Item doesn't exist";
pub const DELETED_MESSAGE: &str = "Item deleted successfully!";

/// Path id as a key; integers that do not fit the key type match no row.
fn product_id<R>(req: &Validated<R>) -> Option<i32> {
    req.param("id").and_then(|s| s.parse().ok())
}

#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    summary = "Gets a list of Products",
    description = "Returns a list of Products",
    responses(
        (status = 200, description = "Successful response", body = ProductListResponse),
        (status = 400, description = "The products could not be read")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_products(
    State(state): State<AppState>,
    _req: Validated<NoRules>,
) -> Result<impl IntoResponse, AppError> {
    let products = state.products.find_all().await?;
    Ok(ok(products))
}

#[utoipa::path(
    post,
    path = "/products",
    tag = "Products",
    summary = "Creates a new product",
    description = "Adds a new product to the database",
    request_body = ProductInput,
    responses(
        (status = 201, description = "A new Product was successfully created", body = ProductResponse),
        (status = 400, description = "Bad request - One or more fields were not valid for creating a Product", body = ValidationErrors)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_product(
    State(state): State<AppState>,
    req: Validated<CreateRules>,
) -> Result<impl IntoResponse, AppError> {
    let fields = NewProduct::from_body(&req.body)?;
    let product = state.products.create(fields).await?;
    tracing::info!(id = product.id, "product created");
    Ok(created(product))
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "Products",
    summary = "Gets a product by its ID",
    description = "Returns a product",
    params(("id" = i32, Path, description = "Id of the Product to get")),
    responses(
        (status = 200, description = "Successful response", body = ProductResponse),
        (status = 404, description = "The item was not found in the database", body = MessageError),
        (status = 400, description = "Bad request - Invalid Product ID", body = ValidationErrors)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_product_by_id(
    State(state): State<AppState>,
    req: Validated<ReadRules>,
) -> Result<impl IntoResponse, AppError> {
    let Some(id) = product_id(&req) else {
        return Err(AppError::NotFound(READ_NOT_FOUND));
    };
    let product = state
        .products
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound(READ_NOT_FOUND))?;
    Ok(ok(product))
}

#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "Products",
    summary = "Updates a product",
    description = "Modifies an existing product from the database",
    params(("id" = i32, Path, description = "The ID of the product to update")),
    request_body = ProductUpdate,
    responses(
        (status = 200, description = "Successful response", body = ProductResponse),
        (status = 400, description = "Bad Request - Invalid input data", body = ValidationErrors),
        (status = 404, description = "Not Found - Could not find a Product with the given ID", body = MessageError)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_product(
    State(state): State<AppState>,
    req: Validated<UpdateRules>,
) -> Result<impl IntoResponse, AppError> {
    let Some(id) = product_id(&req) else {
        return Err(AppError::NotFound(UPDATE_NOT_FOUND));
    };
    let product = state
        .products
        .find_by_id(id)
        .await
        .map_err(AppError::Unhandled)?
        .ok_or(AppError::NotFound(UPDATE_NOT_FOUND))?;
    let changes = ProductChanges::from_body(&req.body).map_err(AppError::Unhandled)?;
    let product = state
        .products
        .update(product, changes)
        .await
        .map_err(AppError::Unhandled)?;
    tracing::info!(id = product.id, "product updated");
    Ok(ok(product))
}

#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "Products",
    summary = "Deletes a Product",
    description = "Removes a Product from the database",
    params(("id" = i32, Path, description = "The ID of the product to delete")),
    responses(
        (status = 200, description = "Product deleted successfully", body = DeletedResponse),
        (status = 404, description = "Not Found - Product with the given ID was not found in the database", body = MessageError),
        (status = 400, description = "Bad Request - Invalid input data", body = ValidationErrors)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_product(
    State(state): State<AppState>,
    req: Validated<DeleteRules>,
) -> Result<impl IntoResponse, AppError> {
    let Some(id) = product_id(&req) else {
        return Err(AppError::NotFound(DELETE_NOT_FOUND));
    };
    let product = state
        .products
        .find_by_id(id)
        .await
        .map_err(AppError::Unhandled)?
        .ok_or(AppError::NotFound(DELETE_NOT_FOUND))?;
    state.products.destroy(&product).await.map_err(AppError::Unhandled)?;
    tracing::info!(id = product.id, "product deleted");
    let remaining = state.products.find_all().await.map_err(AppError::Unhandled)?;
    Ok(deleted(DELETED_MESSAGE, remaining))
}
