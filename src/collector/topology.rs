use std::collections::HashSet;
use std::sync::Arc;

use super::types::{Topology, TopologyMap};
use crate::snmp::oid::{
    AT_IF_INDEX, IF_INDEX, IP_AD_ENT_ADDR, IP_AD_ENT_IF_INDEX, OidSuffix, with_index,
};
use crate::snmp::{SnmpTransport, decode_suffix, trailing_ipv4};

/// Строит карту ifIndex -> IP по цепочке источников.
///
/// Агенты заполняют разные таблицы, поэтому источники опрашиваются по
/// приоритету: atTable, ipAddrTable, затем прямой GET по известным IP.
/// Первый непустой результат побеждает, остальные не запрашиваются.
pub struct TopologyResolver {
    transport: Arc<dyn SnmpTransport>,
}

impl TopologyResolver {
    pub fn new(transport: Arc<dyn SnmpTransport>) -> Self {
        Self { transport }
    }

    /// Полное разрешение: индексы, адреса и карта
    pub async fn resolve(&self, target: &str, community: &str) -> Topology {
        let indices = self.discover_indices(target, community).await;
        let addresses = self.discover_addresses(target, community).await;
        let map = self.resolve_map(target, community, &addresses).await;

        Topology {
            indices,
            addresses,
            map,
        }
    }

    /// Индексы интерфейсов из ifIndex. Ошибка walk - пустой список
    pub async fn discover_indices(&self, target: &str, community: &str) -> Vec<String> {
        let rows = match self.transport.walk(target, community, IF_INDEX).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!(
                    device = %target,
                    oid = IF_INDEX,
                    error = %e,
                    "не удалось получить список ifIndex"
                );
                return Vec::new();
            }
        };

        let mut seen = HashSet::new();
        let indices: Vec<String> = rows
            .iter()
            .filter_map(|vb| match decode_suffix(&vb.oid, IF_INDEX) {
                Some(OidSuffix::Index(index)) => Some(index),
                _ => None,
            })
            .filter(|index| seen.insert(index.clone()))
            .collect();

        tracing::debug!(device = %target, ?indices, "список ifIndex");
        indices
    }

    /// IP адреса устройства из ipAdEntAddr. Ошибка walk - пустой список
    pub async fn discover_addresses(&self, target: &str, community: &str) -> Vec<String> {
        let rows = match self.transport.walk(target, community, IP_AD_ENT_ADDR).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!(
                    device = %target,
                    oid = IP_AD_ENT_ADDR,
                    error = %e,
                    "не удалось получить список IP"
                );
                return Vec::new();
            }
        };

        let mut seen = HashSet::new();
        let addresses: Vec<String> = rows
            .iter()
            .filter_map(|vb| match decode_suffix(&vb.oid, IP_AD_ENT_ADDR) {
                Some(OidSuffix::Ipv4(ip)) => Some(ip),
                _ => None,
            })
            .filter(|ip| seen.insert(ip.clone()))
            .collect();

        tracing::debug!(device = %target, ?addresses, "список IP");
        addresses
    }

    /// Карта ifIndex -> IP, первый непустой источник побеждает
    pub async fn resolve_map(
        &self,
        target: &str,
        community: &str,
        known_ips: &[String],
    ) -> TopologyMap {
        let map = self.map_from_walk(target, community, AT_IF_INDEX).await;
        if !map.is_empty() {
            tracing::debug!(device = %target, source = "atIfIndex", ?map, "карта IP построена");
            return map;
        }

        tracing::info!(device = %target, "atIfIndex пуст, пробуем ipAdEntIfIndex");
        let map = self.map_from_walk(target, community, IP_AD_ENT_IF_INDEX).await;
        if !map.is_empty() {
            tracing::debug!(
                device = %target,
                source = "ipAdEntIfIndex",
                ?map,
                "карта IP построена"
            );
            return map;
        }

        if known_ips.is_empty() {
            return map;
        }

        tracing::info!(device = %target, ips = ?known_ips, "используем GET по известным IP");
        let map = self.map_from_known(target, community, known_ips).await;
        tracing::debug!(device = %target, source = "known_ips", ?map, "карта IP построена");
        map
    }

    async fn map_from_walk(&self, target: &str, community: &str, base: &str) -> TopologyMap {
        let rows = match self.transport.walk(target, community, base).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!(
                    device = %target,
                    oid = %base,
                    error = %e,
                    "walk таблицы IP не удался"
                );
                return TopologyMap::new();
            }
        };

        let mut map = TopologyMap::new();
        for vb in rows.iter().filter(|vb| vb.is_available()) {
            if let Some(ip) = trailing_ipv4(&vb.oid, base) {
                map.insert(vb.value.clone(), ip);
            }
        }
        map
    }

    async fn map_from_known(
        &self,
        target: &str,
        community: &str,
        known_ips: &[String],
    ) -> TopologyMap {
        let oids: Vec<String> = known_ips
            .iter()
            .map(|ip| with_index(IP_AD_ENT_IF_INDEX, ip))
            .collect();

        let varbinds = match self.transport.get(target, community, &oids).await {
            Ok(varbinds) => varbinds,
            Err(e) => {
                tracing::warn!(
                    device = %target,
                    oids = ?oids,
                    error = %e,
                    "GET ipAdEntIfIndex не удался"
                );
                return TopologyMap::new();
            }
        };

        let mut map = TopologyMap::new();
        for (ip, oid) in known_ips.iter().zip(&oids) {
            if let Some(index) = crate::snmp::lookup(&varbinds, oid) {
                map.insert(index.to_string(), ip.clone());
            }
        }
        map
    }
}
