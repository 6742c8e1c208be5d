use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};

use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "im ready",
            "UTC_time": chrono::Utc::now().to_rfc2822(),
            "devices": state.config.devices.len(),
            "snapshots": state.history.len().await,
        })),
    )
}
