pub mod backend;
pub mod demo;

use axum::routing::get;
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        .route("/demo/{use_case}/status", get(demo::status))
        .route("/api/backend-status", get(backend::status))
}
