use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::state::SharedState;

const HEALTH_PATH: &str = "/health";

/// Whether the AI backend answers its health check.
pub async fn status(State(state): State<SharedState>) -> Json<Value> {
    let base_url = state.transport.base_url().to_string();

    match state.transport.get_json(HEALTH_PATH).await {
        Ok(body) => Json(json!({
            "base_url": base_url,
            "reachable": true,
            "detail": body,
        })),
        Err(e) => {
            tracing::warn!("AI backend health check failed: {e}");
            Json(json!({
                "base_url": base_url,
                "reachable": false,
                "detail": e.to_string(),
            }))
        }
    }
}
