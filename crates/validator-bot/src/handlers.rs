//! HTTP Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use tower_http::trace::TraceLayer;

use teloxide::types::Update;

use crate::state::AppState;
use crate::telegram::text_message;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Build the router: health check plus the Telegram webhook
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/{token}", post(telegram_webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Telegram webhook.
///
/// Answers 200 for every update on the right path, so Telegram never
/// redelivers; failures are logged instead.
pub async fn telegram_webhook(
    State(state): State<AppState>,
    Path(token): Path<String>,
    body: String,
) -> StatusCode {
    if token != *state.webhook_token {
        return StatusCode::NOT_FOUND;
    }

    let update: Update = match serde_json::from_str(&body) {
        Ok(update) => update,
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring malformed update");
            return StatusCode::OK;
        }
    };

    let Some((chat_id, text)) = text_message(&update) else {
        tracing::debug!(update_id = ?update.id, "Ignoring non-text update");
        return StatusCode::OK;
    };

    let today = Utc::now().date_naive();
    let Some(reply) = state.dispatcher.handle(text, today).await else {
        return StatusCode::OK;
    };

    if let Err(e) = state.sender.send_message(chat_id, &reply).await {
        tracing::warn!(
            update_id = ?update.id,
            chat_id = chat_id.0,
            error = %e,
            "Update caused error"
        );
    }

    StatusCode::OK
}
