//! Product routes.

use crate::handlers::products::{create_product, delete_product, get_product_by_id, list_products, update_product};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/:id",
            get(get_product_by_id).put(update_product).delete(delete_product),
        )
}
