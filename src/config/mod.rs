use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;

pub mod devices;
pub mod settings;

pub use devices::{Device, default_devices};
pub use settings::{DeviceTarget, Settings};

use crate::snmp::parse_oid;

/// Переменная окружения с путем к YAML конфигурации
pub const CONFIG_PATH_ENV: &str = "SNMP_MONITOR_CONFIG";

/// Главная конфигурация приложения
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Базовые настройки
    #[serde(default)]
    pub settings: Settings,
    /// Устройства для цикла сбора
    #[serde(default = "default_devices")]
    pub devices: Vec<Device>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            devices: default_devices(),
        }
    }
}

impl AppConfig {
    /// Загружает конфигурацию из YAML файла
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Не удалось прочитать файл: {}", path.display()))?;

        let config: AppConfig =
            serde_yml::from_str(&content).context("Не удалось распарсить YAML")?;
        config.validate()?;

        Ok(config)
    }

    /// YAML из `SNMP_MONITOR_CONFIG`, если задан, иначе встроенные значения
    pub fn from_env() -> Result<Self> {
        match env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::load(path),
            Err(_) => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.devices.is_empty() {
            anyhow::bail!("Список устройств пустой");
        }

        for device in &self.devices {
            if device.oids.is_empty() {
                anyhow::bail!("У устройства {} нет OID метрик", device.ip);
            }
            for oid in &device.oids {
                parse_oid(oid).with_context(|| format!("устройство {}", device.ip))?;
            }
        }

        if self.settings.collection.period_ms == 0 {
            anyhow::bail!("period_ms должен быть больше нуля");
        }

        Ok(())
    }

    /// Получает timeout из переменной окружения или из настроек
    pub fn get_timeout(&self) -> Duration {
        let secs = env::var("SNMP_TIMEOUT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(self.settings.connection.timeout);
        Duration::from_secs(secs)
    }

    /// Получает community устройства по умолчанию
    pub fn get_community(&self) -> String {
        env::var("SNMP_COMMUNITY")
            .unwrap_or_else(|_| self.settings.inventory.default_device.community.clone())
    }

    /// Устройство по умолчанию для HTTP маршрутов
    pub fn get_default_device(&self) -> DeviceTarget {
        DeviceTarget {
            ip: self.settings.inventory.default_device.ip.clone(),
            community: self.get_community(),
        }
    }

    /// Адрес HTTP сервера
    pub fn get_bind_addr(&self) -> String {
        env::var("SNMP_MONITOR_BIND").unwrap_or_else(|_| self.settings.http.bind.clone())
    }

    pub fn get_period(&self) -> Duration {
        Duration::from_millis(self.settings.collection.period_ms)
    }

    pub fn debug_config(&self) {
        tracing::info!(
            devices = self.devices.len(),
            default_device = %self.settings.inventory.default_device.ip,
            timeout_secs = self.get_timeout().as_secs(),
            period_ms = self.settings.collection.period_ms,
            overlap = ?self.settings.collection.overlap,
            history_capacity = ?self.settings.collection.history_capacity,
            discovery = ?self.settings.inventory.discovery,
            "конфигурация загружена"
        );
    }
}
