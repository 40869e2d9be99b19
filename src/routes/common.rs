//! Root route.

use crate::response::MessageBody;
use crate::state::AppState;
use axum::{routing::get, Json, Router};

pub const ROOT_MESSAGE: &str = "The database is connected!";

/// Reports connected regardless of the database's actual state.
#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses((status = 200, description = "Server is up", body = MessageBody))
)]
pub async fn root() -> Json<MessageBody> {
    Json(MessageBody { msg: ROOT_MESSAGE })
}

pub fn common_routes() -> Router<AppState> {
    Router::new().route("/", get(root))
}
