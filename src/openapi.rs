//! OpenAPI document for the products API and the `/docs` viewer.

use crate::handlers::products;
use crate::routes::common;
use crate::model::Product;
use crate::response::MessageBody;
use crate::service::{FieldError, Location};
use axum::{routing::get, Json, Router};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};
use utoipa_scalar::{Scalar, Servable};

/// Fields accepted by `POST /products`.
#[derive(Serialize, ToSchema)]
pub struct ProductInput {
    #[schema(example = "Product name example")]
    pub name: String,
    #[schema(example = 99.99)]
    pub price: f64,
    #[schema(example = true)]
    pub availability: Option<bool>,
}

/// Fields accepted by `PUT /products/:id`.
#[derive(Serialize, ToSchema)]
pub struct ProductUpdate {
    #[schema(example = "Product name example")]
    pub name: Option<String>,
    #[schema(example = 99.99)]
    pub price: f64,
    #[schema(example = false)]
    pub availability: bool,
}

#[derive(Serialize, ToSchema)]
pub struct ProductResponse {
    pub data: Product,
}

#[derive(Serialize, ToSchema)]
pub struct ProductListResponse {
    pub data: Vec<Product>,
}

#[derive(Serialize, ToSchema)]
pub struct DeletedResponse {
    #[schema(example = "Item deleted successfully!")]
    pub message: String,
    pub data: Vec<Product>,
}

/// Rejected request: every violated rule, in declaration order.
#[derive(Serialize, ToSchema)]
pub struct ValidationErrors {
    pub error: Vec<FieldError>,
}

#[derive(Serialize, ToSchema)]
pub struct MessageError {
    #[schema(example = "Item doesn't exist")]
    pub error: String,
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Products REST API", description = "API docs for products"),
    paths(
        common::root,
        products::list_products,
        products::create_product,
        products::get_product_by_id,
        products::update_product,
        products::delete_product,
    ),
    components(schemas(
        Product,
        ProductInput,
        ProductUpdate,
        ProductResponse,
        ProductListResponse,
        DeletedResponse,
        ValidationErrors,
        MessageError,
        MessageBody,
        FieldError,
        Location,
    )),
    tags(
        (name = "Products", description = "API operations related to products"),
        (name = "Health", description = "Service status")
    )
)]
pub struct ApiDoc;

/// `/docs` (interactive viewer) and `/docs/openapi.json`.
pub fn docs_routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
}
