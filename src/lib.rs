pub mod config;
pub mod error;
pub mod state;
pub mod submission;
pub mod demo;
pub mod routes;
pub mod views;

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::demo::session::DemoSessions;
use crate::state::{AppState, SharedState};
use crate::submission::{HttpTransport, Transport};

/// Build the router talking to the AI backend configured in `config`.
pub fn build_app(mut config: Config) -> Result<(Router, SharedState), String> {
    config.ai_base_url = config::normalize_base_url(&config.ai_base_url)?;
    let transport = HttpTransport::new(config.ai_base_url.clone())?;
    tracing::info!("AI backend at {}", config.ai_base_url);
    Ok(build_app_with_transport(config, Arc::new(transport)))
}

pub fn build_app_with_transport(
    config: Config,
    transport: Arc<dyn Transport>,
) -> (Router, SharedState) {
    let static_dir = ServeDir::new(&config.static_dir);
    let max_body_size = config.max_body_size;

    let state: SharedState = Arc::new(AppState {
        config,
        transport,
        sessions: DemoSessions::new(),
    });

    let app = Router::new()
        .merge(routes::api_routes())
        .merge(views::view_routes())
        .route("/health", axum::routing::get(health))
        .fallback_service(static_dir)
        .layer(RequestBodyLimitLayer::new(max_body_size))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .with_state(state.clone());

    (app, state)
}

async fn health() -> &'static str {
    "ok"
}
