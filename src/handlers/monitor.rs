use axum::{Json, extract::State};

use crate::collector::MonitorSnapshot;
use crate::state::AppState;

/// Весь журнал снимков, от старых к новым
pub async fn monitor_history(State(state): State<AppState>) -> Json<Vec<MonitorSnapshot>> {
    Json(state.history.snapshot().await)
}
