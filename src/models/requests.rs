use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ApiError;

/// Тело `POST /snmp`. Поля опциональны, чтобы отсутствие любого из них
/// давало 400 с понятным текстом
#[derive(Debug, Default, Deserialize)]
pub struct SnmpQuery {
    pub ip: Option<String>,
    pub community: Option<String>,
    pub oids: Option<Vec<String>>,
}

impl SnmpQuery {
    /// Проверяет, что все поля заданы и не пустые
    pub fn into_parts(self) -> Result<(String, String, Vec<String>), ApiError> {
        match (self.ip, self.community, self.oids) {
            (Some(ip), Some(community), Some(oids))
                if !ip.is_empty() && !community.is_empty() && !oids.is_empty() =>
            {
                Ok((ip, community, oids))
            }
            _ => Err(ApiError::BadRequest(
                "ip, community and oids are required".to_string(),
            )),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SnmpQueryResult {
    pub ip: String,
    pub data: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
pub struct SystemInfo {
    pub description: String,
    pub uptime: String,
}

/// Ответ "ничего не найдено": 200 с пояснением и пустым списком
#[derive(Debug, Serialize)]
pub struct EmptyResult {
    pub message: String,
    pub data: Vec<serde_json::Value>,
}

impl EmptyResult {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_requires_every_field() {
        let query: SnmpQuery =
            serde_json::from_str(r#"{"ip": "10.0.0.1", "oids": ["1.3.6.1.2.1.1.1.0"]}"#).unwrap();
        assert!(matches!(query.into_parts(), Err(ApiError::BadRequest(_))));

        let query: SnmpQuery = serde_json::from_str(
            r#"{"ip": "10.0.0.1", "community": "public", "oids": []}"#,
        )
        .unwrap();
        assert!(query.into_parts().is_err());
    }

    #[test]
    fn complete_query_splits_into_parts() {
        let query: SnmpQuery = serde_json::from_str(
            r#"{"ip": "10.0.0.1", "community": "public", "oids": ["1.3.6.1.2.1.1.1.0"]}"#,
        )
        .unwrap();

        let (ip, community, oids) = query.into_parts().unwrap();
        assert_eq!(ip, "10.0.0.1");
        assert_eq!(community, "public");
        assert_eq!(oids, vec!["1.3.6.1.2.1.1.1.0"]);
    }
}
