use axum::{Json, extract::State};

use crate::error::ApiError;
use crate::formatter::format_uptime;
use crate::models::SystemInfo;
use crate::snmp::oid::{SYS_DESCR, SYS_UPTIME};
use crate::snmp::{NOT_AVAILABLE, lookup};
use crate::state::AppState;

/// sysDescr и sysUpTime устройства по умолчанию
pub async fn system_info(State(state): State<AppState>) -> Result<Json<SystemInfo>, ApiError> {
    let device = state.config.get_default_device();
    let oids = [SYS_DESCR.to_string(), SYS_UPTIME.to_string()];

    let varbinds = state
        .transport
        .get(&device.ip, &device.community, &oids)
        .await
        .inspect_err(|e| {
            tracing::error!(
                device = %device.ip,
                error = %e,
                "ошибка получения системной информации"
            )
        })?;

    let description = lookup(&varbinds, SYS_DESCR).unwrap_or(NOT_AVAILABLE);
    let uptime = lookup(&varbinds, SYS_UPTIME)
        .and_then(|ticks| ticks.parse::<u64>().ok())
        .map(format_uptime)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    Ok(Json(SystemInfo {
        description: description.to_string(),
        uptime,
    }))
}
