use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::error::ApiError;
use crate::models::{SnmpQuery, SnmpQueryResult};
use crate::snmp::{normalize_root, parse_oid};
use crate::state::AppState;

/// Произвольный GET: `{ip, community, oids}` -> `{ip, data: {oid: value}}`
pub async fn query_snmp(
    State(state): State<AppState>,
    payload: Result<Json<SnmpQuery>, JsonRejection>,
) -> Result<Json<SnmpQueryResult>, ApiError> {
    let Json(query) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let (ip, community, oids) = query.into_parts()?;

    // Невалидный OID отклоняется до обращения к устройству
    for oid in &oids {
        parse_oid(oid)?;
    }
    let oids: Vec<String> = oids.iter().map(|oid| normalize_root(oid)).collect();

    let varbinds = state
        .transport
        .get(&ip, &community, &oids)
        .await
        .inspect_err(|e| {
            tracing::error!(
                device = %ip,
                oids = ?oids,
                error = %e,
                "ошибка SNMP запроса"
            )
        })?;

    let data = varbinds
        .into_iter()
        .map(|vb| (vb.oid, vb.value))
        .collect();

    Ok(Json(SnmpQueryResult { ip, data }))
}
