use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers::{
    get_interface, get_interface_for, health, list_interfaces, list_interfaces_for,
    monitor_history, query_snmp, system_info,
};
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/interfaces", get(list_interfaces))
        .route("/interface/{id}", get(get_interface))
        .route("/interfaces/{ip}", get(list_interfaces_for))
        .route("/interface/{ip}/{id}", get(get_interface_for))
        .route("/system", get(system_info))
        .route("/snmp", post(query_snmp))
        .route("/monitor", get(monitor_history))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
