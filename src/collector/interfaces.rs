use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::topology::TopologyResolver;
use super::types::{InterfaceRecord, OperState, TopologyMap};
use crate::error::SnmpError;
use crate::snmp::oid::{IF_DESCR, IF_OPER_STATUS, IF_SPEED, with_index};
use crate::snmp::{NOT_AVAILABLE, SnmpTransport, Varbind, lookup};

/// Значение ifSpeed, которым агент сообщает "неизвестно/переполнение"
pub const IF_SPEED_OVERFLOW: u64 = 4_294_967_295;

/// Как получить список ifIndex устройства
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Discovery {
    /// Индексы 1..=n без опроса ifIndex, известные IP берутся из конфигурации
    FixedRange(u32),
    /// Индексы из walk ifIndex, известные IP - из walk ipAdEntAddr
    Dynamic,
}

impl Default for Discovery {
    fn default() -> Self {
        Discovery::FixedRange(20)
    }
}

/// ifSpeed в "<n> Mbps"
pub fn format_speed(raw: Option<&str>) -> String {
    match raw.and_then(|s| s.trim().parse::<u64>().ok()) {
        Some(bps) if bps < IF_SPEED_OVERFLOW => format!("{} Mbps", bps as f64 / 1_000_000.0),
        _ => NOT_AVAILABLE.to_string(),
    }
}

pub struct InterfaceInspector {
    transport: Arc<dyn SnmpTransport>,
    resolver: TopologyResolver,
}

impl InterfaceInspector {
    pub fn new(transport: Arc<dyn SnmpTransport>) -> Self {
        Self {
            resolver: TopologyResolver::new(transport.clone()),
            transport,
        }
    }

    /// Один интерфейс с уже построенной картой IP
    pub async fn inspect(
        &self,
        target: &str,
        community: &str,
        index: &str,
        map: &TopologyMap,
    ) -> Result<InterfaceRecord, SnmpError> {
        let varbinds = self.fetch(target, community, index).await?;
        Ok(Self::build_record(index, &varbinds, map))
    }

    /// Один интерфейс: сначала сам объект, потом карта IP.
    ///
    /// Отсутствующий интерфейс отдается как `SnmpError::NoSuchObject`
    /// до опроса таблиц IP.
    pub async fn lookup(
        &self,
        target: &str,
        community: &str,
        index: &str,
        discovery: Discovery,
        fallback_ips: &[String],
    ) -> Result<InterfaceRecord, SnmpError> {
        let varbinds = self.fetch(target, community, index).await?;
        let known_ips = self.known_ips(target, community, discovery, fallback_ips).await;
        let map = self.resolver.resolve_map(target, community, &known_ips).await;

        Ok(Self::build_record(index, &varbinds, &map))
    }

    /// Все интерфейсы устройства. Интерфейсы с ошибкой пропускаются
    pub async fn inspect_all(
        &self,
        target: &str,
        community: &str,
        discovery: Discovery,
        fallback_ips: &[String],
    ) -> Vec<InterfaceRecord> {
        let indices = match discovery {
            Discovery::FixedRange(count) => (1..=count).map(|i| i.to_string()).collect(),
            Discovery::Dynamic => self.resolver.discover_indices(target, community).await,
        };

        if indices.is_empty() {
            tracing::info!(device = %target, "интерфейсы не найдены");
            return Vec::new();
        }

        let known_ips = self.known_ips(target, community, discovery, fallback_ips).await;
        let map = self.resolver.resolve_map(target, community, &known_ips).await;

        let mut interfaces = Vec::with_capacity(indices.len());
        for index in &indices {
            match self.inspect(target, community, index, &map).await {
                Ok(record) => interfaces.push(record),
                Err(e) => {
                    tracing::warn!(
                        device = %target,
                        if_index = %index,
                        error = %e,
                        "интерфейс пропущен"
                    );
                }
            }
        }

        interfaces
    }

    async fn known_ips(
        &self,
        target: &str,
        community: &str,
        discovery: Discovery,
        fallback_ips: &[String],
    ) -> Vec<String> {
        match discovery {
            Discovery::FixedRange(_) => fallback_ips.to_vec(),
            Discovery::Dynamic => self.resolver.discover_addresses(target, community).await,
        }
    }

    async fn fetch(
        &self,
        target: &str,
        community: &str,
        index: &str,
    ) -> Result<Vec<Varbind>, SnmpError> {
        if index.parse::<u32>().is_err() {
            return Err(SnmpError::InvalidOid {
                oid: with_index(IF_DESCR, index),
            });
        }

        let oids = vec![
            with_index(IF_DESCR, index),
            with_index(IF_OPER_STATUS, index),
            with_index(IF_SPEED, index),
        ];

        let varbinds = self.transport.get(target, community, &oids).await?;

        if !varbinds.is_empty() && varbinds.iter().all(|vb| vb.type_tag.is_absent()) {
            return Err(SnmpError::NoSuchObject {
                target: target.to_string(),
                oid: oids[0].clone(),
            });
        }

        Ok(varbinds)
    }

    fn build_record(index: &str, varbinds: &[Varbind], map: &TopologyMap) -> InterfaceRecord {
        let name = lookup(varbinds, &with_index(IF_DESCR, index));
        let status = lookup(varbinds, &with_index(IF_OPER_STATUS, index));
        let speed = lookup(varbinds, &with_index(IF_SPEED, index));

        InterfaceRecord {
            index: index.to_string(),
            name: name.unwrap_or(NOT_AVAILABLE).to_string(),
            ip: map.get(index).cloned(),
            status: OperState::from_status(status),
            speed: format_speed(speed),
        }
    }
}
