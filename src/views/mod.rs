pub mod demo;

use axum::routing::{get, post};
use axum::Router;

use crate::state::SharedState;

pub fn view_routes() -> Router<SharedState> {
    Router::new()
        .route("/demo", get(demo::page))
        // Form submissions, answered with the result container fragment
        .route("/demo/scenario", post(demo::submit_scenario))
        .route("/demo/materials", post(demo::submit_materials))
        .route("/demo/exams", post(demo::submit_exams))
        .route("/demo/reports", post(demo::submit_reports))
}
