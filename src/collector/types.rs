use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// ifIndex -> IP адрес
pub type TopologyMap = BTreeMap<String, String>;

/// Результат разрешения топологии устройства
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Topology {
    pub indices: Vec<String>,
    pub addresses: Vec<String>,
    pub map: TopologyMap,
}

/// Операционное состояние интерфейса
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OperState {
    Up,
    Down,
}

impl OperState {
    /// ifOperStatus: только "1" означает up(1)
    pub fn from_status(raw: Option<&str>) -> Self {
        match raw {
            Some("1") => OperState::Up,
            _ => OperState::Down,
        }
    }
}

/// Нормализованная запись об интерфейсе
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceRecord {
    #[serde(rename = "ifIndex")]
    pub index: String,
    pub name: String,
    pub ip: Option<String>,
    pub status: OperState,
    pub speed: String,
}

/// Снимок метрик устройства за один тик
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorSnapshot {
    pub timestamp: DateTime<Utc>,
    pub ip: String,
    #[serde(rename = "sysName")]
    pub sys_name: String,
    pub metrics: BTreeMap<String, String>,
}
