use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use super::trades::{trades_router, TradeState};
use crate::trades::TradeStore;

/// Create the API router
pub fn create_router(store: Arc<TradeStore>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/v1/echo", get(echo))
        .merge(trades_router())
        .with_state(store)
}

// ===== Route Handlers =====

/// Health check endpoint
async fn health_check(State(store): State<TradeState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        trades: store.len(),
    })
}

/// Echo the `message` query parameter back as plain text
async fn echo(Query(params): Query<EchoQuery>) -> Response {
    match params.message {
        Some(message) => message.into_response(),
        None => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "malformed_input",
                "message": "missing message",
            })),
        )
            .into_response(),
    }
}

// ===== Request/Response Types =====

#[derive(Deserialize)]
struct EchoQuery {
    message: Option<String>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    trades: usize,
}
