//! Trade API endpoints.
//!
//! # Endpoints
//!
//! - `GET    /v1/trades` - List every stored trade
//! - `POST   /v1/trades` - Submit a batch (or a single trade)
//! - `GET    /v1/trades/:trade_id` - Fetch one trade
//! - `PUT    /v1/trades/:trade_id` - Replace a trade; the id changes with the payload
//! - `DELETE /v1/trades/:trade_id` - Delete a trade

use crate::models::{InternalTrade, TradeSubmitted};
use crate::trades::{TradeError, TradeErrorKind, TradeStore};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

pub type TradeState = Arc<TradeStore>;

pub fn trades_router() -> Router<TradeState> {
    Router::new()
        .route("/v1/trades", get(list_trades).post(submit_trades))
        .route(
            "/v1/trades/:trade_id",
            get(get_trade).put(replace_trade).delete(delete_trade),
        )
}

// ===== Route Handlers =====

async fn list_trades(State(store): State<TradeState>) -> Json<Vec<InternalTrade>> {
    Json(store.get_all())
}

async fn submit_trades(
    State(store): State<TradeState>,
    body: Bytes,
) -> Result<Json<Vec<TradeSubmitted>>, ApiError> {
    debug!(bytes = body.len(), "Trade submission received");
    Ok(Json(store.insert_batch(&body)?))
}

async fn get_trade(
    State(store): State<TradeState>,
    Path(trade_id): Path<String>,
) -> Result<Json<InternalTrade>, ApiError> {
    Ok(Json(store.get(&trade_id)?))
}

async fn delete_trade(
    State(store): State<TradeState>,
    Path(trade_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    store.delete(&trade_id)?;
    Ok(StatusCode::OK)
}

async fn replace_trade(
    State(store): State<TradeState>,
    Path(trade_id): Path<String>,
    body: Bytes,
) -> Result<Json<InternalTrade>, ApiError> {
    Ok(Json(store.update(&trade_id, &body)?))
}

// ===== Error Handling =====

#[derive(Debug)]
pub struct ApiError(TradeError);

impl From<TradeError> for ApiError {
    fn from(err: TradeError) -> Self {
        ApiError(err)
    }
}

pub fn status_for(kind: TradeErrorKind) -> StatusCode {
    match kind {
        TradeErrorKind::MalformedInput | TradeErrorKind::WrongFieldType => StatusCode::BAD_REQUEST,
        TradeErrorKind::InvalidFieldValue => StatusCode::UNPROCESSABLE_ENTITY,
        TradeErrorKind::NotFound => StatusCode::NOT_FOUND,
        TradeErrorKind::Conflict => StatusCode::CONFLICT,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.0.kind();
        let body = Json(json!({
            "error": kind.as_str(),
            "message": self.0.to_string(),
        }));

        (status_for(kind), body).into_response()
    }
}
