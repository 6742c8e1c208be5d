use serde::{Deserialize, Serialize};

use crate::collector::{Discovery, OverlapPolicy};

/// Базовые настройки приложения
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Настройки SNMP подключения
    pub connection: ConnectionSettings,
    /// HTTP сервер
    pub http: HttpSettings,
    /// Цикл сбора метрик
    pub collection: CollectionSettings,
    /// Устройство по умолчанию для HTTP маршрутов
    pub inventory: InventorySettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionSettings {
    /// Таймаут одного SNMP обмена (секунды)
    pub timeout: u64,
    /// UDP порт агента
    pub port: u16,
    /// max-repetitions для GETBULK при walk
    pub max_repetitions: u32,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            timeout: 30,
            port: 161,
            max_repetitions: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    pub bind: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:5000".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionSettings {
    pub enabled: bool,
    /// Период тика (миллисекунды)
    pub period_ms: u64,
    /// Что делать с тиком, пока предыдущий еще идет
    pub overlap: OverlapPolicy,
    /// Размер журнала снимков, `null` - без ограничения
    pub history_capacity: Option<usize>,
    /// Запрашивать sysName перед метриками
    pub resolve_sys_name: bool,
}

impl Default for CollectionSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            period_ms: 1000,
            overlap: OverlapPolicy::Skip,
            history_capacity: Some(10_000),
            resolve_sys_name: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InventorySettings {
    pub default_device: DeviceTarget,
    /// IP для последнего шага разрешения топологии
    pub fallback_ips: Vec<String>,
    /// Способ получения ifIndex для `/interfaces`
    pub discovery: Discovery,
}

impl Default for InventorySettings {
    fn default() -> Self {
        Self {
            default_device: DeviceTarget::default(),
            fallback_ips: ["42.42.42.1", "42.42.42.2", "192.168.10.1", "192.168.20.1"]
                .into_iter()
                .map(String::from)
                .collect(),
            discovery: Discovery::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceTarget {
    pub ip: String,
    pub community: String,
}

impl Default for DeviceTarget {
    fn default() -> Self {
        Self {
            ip: "192.168.10.1".to_string(),
            community: "public".to_string(),
        }
    }
}
