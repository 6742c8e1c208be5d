use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Ошибки SNMP обмена с устройством
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnmpError {
    #[error("таймаут SNMP запроса к {target} после {timeout_secs}с")]
    Timeout { target: String, timeout_secs: u64 },

    #[error("SNMP обмен с {target} не удался: {message}")]
    Transport { target: String, message: String },

    #[error("объект {oid} отсутствует на {target}")]
    NoSuchObject { target: String, oid: String },

    #[error("невалидный OID: {oid}")]
    InvalidOid { oid: String },
}

impl SnmpError {
    pub fn transport(target: &str, message: impl ToString) -> Self {
        SnmpError::Transport {
            target: target.to_string(),
            message: message.to_string(),
        }
    }
}

/// Ошибка HTTP слоя, отдается клиенту как `{ "error": "..." }`
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Snmp(#[from] SnmpError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Snmp(SnmpError::NoSuchObject { .. }) => StatusCode::NOT_FOUND,
            ApiError::Snmp(SnmpError::InvalidOid { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Snmp(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
