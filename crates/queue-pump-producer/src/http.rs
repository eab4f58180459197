//! HTTP trigger surface for the producer.
//!
//! Deliberately thin: the routes parse a request, call into the producer,
//! and shape the response. All production semantics live in
//! [`crate::producer`].

use crate::producer::Producer;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

/// Shared state for request handlers
#[derive(Clone)]
pub struct AppState {
    pub producer: Arc<Producer>,
}

#[derive(Debug, Deserialize)]
pub struct ProduceRequest {
    /// Number of messages to enqueue (N >= 0)
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct ProduceResponse {
    pub requested: usize,
    pub sent: usize,
    pub failed: usize,
}

#[derive(Debug, Serialize)]
pub struct MessageCountResponse {
    pub message_count: u64,
}

/// Build the producer router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/produce", post(produce))
        .route("/message-count", get(message_count))
        .route("/healthz", get(healthz))
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Trigger production of the requested number of messages
async fn produce(
    State(state): State<AppState>,
    Json(request): Json<ProduceRequest>,
) -> Result<Json<ProduceResponse>, (StatusCode, String)> {
    match state.producer.produce(request.count).await {
        Ok(report) => Ok(Json(ProduceResponse {
            requested: report.requested,
            sent: report.sent,
            failed: report.failed,
        })),
        Err(e) => {
            error!(error = %e, count = request.count, "Produce request failed");
            Err((StatusCode::BAD_GATEWAY, e.to_string()))
        }
    }
}

/// Report the approximate number of messages on the queue
async fn message_count(
    State(state): State<AppState>,
) -> Result<Json<MessageCountResponse>, (StatusCode, String)> {
    match state.producer.message_count().await {
        Ok(count) => Ok(Json(MessageCountResponse {
            message_count: count,
        })),
        Err(e) => {
            error!(error = %e, "Message count request failed");
            Err((StatusCode::BAD_GATEWAY, e.to_string()))
        }
    }
}
