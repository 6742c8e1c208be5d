use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::collector::{Discovery, InterfaceRecord};
use crate::error::ApiError;
use crate::models::EmptyResult;
use crate::state::AppState;

const NO_INTERFACES: &str = "No interfaces found";

fn interfaces_response(interfaces: Vec<InterfaceRecord>) -> Response {
    if interfaces.is_empty() {
        Json(EmptyResult::new(NO_INTERFACES)).into_response()
    } else {
        Json(interfaces).into_response()
    }
}

/// Все интерфейсы устройства по умолчанию
pub async fn list_interfaces(State(state): State<AppState>) -> Response {
    let device = state.config.get_default_device();
    let inventory = &state.config.settings.inventory;

    let interfaces = state
        .inspector
        .inspect_all(
            &device.ip,
            &device.community,
            inventory.discovery,
            &inventory.fallback_ips,
        )
        .await;

    interfaces_response(interfaces)
}

/// Один интерфейс устройства по умолчанию
pub async fn get_interface(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<InterfaceRecord>, ApiError> {
    let device = state.config.get_default_device();
    let inventory = &state.config.settings.inventory;

    let record = state
        .inspector
        .lookup(
            &device.ip,
            &device.community,
            &id,
            inventory.discovery,
            &inventory.fallback_ips,
        )
        .await
        .inspect_err(|e| {
            tracing::error!(
                device = %device.ip,
                if_index = %id,
                error = %e,
                "ошибка получения интерфейса"
            )
        })?;

    Ok(Json(record))
}

/// Все интерфейсы произвольного устройства, индексы из walk ifIndex
pub async fn list_interfaces_for(
    State(state): State<AppState>,
    Path(ip): Path<String>,
) -> Response {
    let community = state.config.get_community();

    let interfaces = state
        .inspector
        .inspect_all(&ip, &community, Discovery::Dynamic, &[])
        .await;

    interfaces_response(interfaces)
}

/// Один интерфейс произвольного устройства
pub async fn get_interface_for(
    State(state): State<AppState>,
    Path((ip, id)): Path<(String, String)>,
) -> Result<Json<InterfaceRecord>, ApiError> {
    let community = state.config.get_community();

    let record = state
        .inspector
        .lookup(&ip, &community, &id, Discovery::Dynamic, &[])
        .await
        .inspect_err(|e| {
            tracing::error!(
                device = %ip,
                if_index = %id,
                error = %e,
                "ошибка получения интерфейса"
            )
        })?;

    Ok(Json(record))
}
