//! Brief receiver — the minimal backend the wizard submits to.
//!
//! Accepts `POST /api/brief`, normalizes and validates the payload, logs it
//! and acknowledges. Nothing is stored. Only POST is routed, so any other
//! method gets a 405, which the wizard treats as "no backend".

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use uuid::Uuid;

use crate::brief::normalize;
use crate::config::ReceiverConfig;

/// Shared state for receiver routes.
#[derive(Clone, Default)]
pub struct ReceiverState {
    received: Arc<AtomicU64>,
}

impl ReceiverState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of briefs accepted since startup.
    pub fn received(&self) -> u64 {
        self.received.load(Ordering::SeqCst)
    }
}

/// Build the receiver routes.
pub fn brief_routes(state: ReceiverState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/brief", post(receive_brief))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve the receiver until the process exits.
pub async fn serve(config: &ReceiverConfig, state: ReceiverState) -> crate::Result<()> {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!(port = config.port, "Brief receiver started");
    axum::serve(listener, brief_routes(state)).await?;
    Ok(())
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "intake-wizard"
    }))
}

/// POST /api/brief
async fn receive_brief(
    State(state): State<ReceiverState>,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    let brief = normalize(&body);
    if let Err(e) = brief.validate() {
        warn!(error = %e, "Rejected incomplete brief");
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({"ok": false, "error": e.to_string()})),
        );
    }

    let id = Uuid::new_v4();
    let received_at = Utc::now();
    state.received.fetch_add(1, Ordering::SeqCst);
    info!(
        brief_id = %id,
        email = %brief.email,
        plan = %brief.plan,
        availability = %brief.availability,
        case_study = brief.case_study_opt_in,
        "Brief received"
    );
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "ok": true,
            "id": id,
            "receivedAt": received_at.to_rfc3339(),
        })),
    )
}
