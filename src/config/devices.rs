use serde::{Deserialize, Serialize};

/// Устройство под мониторингом
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub ip: String,
    #[serde(default = "default_community")]
    pub community: String,
    /// OID метрик, опрашиваемых одним GET на каждом тике
    pub oids: Vec<String>,
}

fn default_community() -> String {
    "public".to_string()
}

/// Метрики Cisco маршрутизатора: система, CPU, память, ifOperStatus.2
const ROUTER_METRICS: &[&str] = &[
    "1.3.6.1.2.1.1.1.0",
    "1.3.6.1.2.1.1.3.0",
    "1.3.6.1.4.1.9.2.1.56.0",
    "1.3.6.1.4.1.9.2.1.57.0",
    "1.3.6.1.4.1.9.2.1.58.0",
    "1.3.6.1.4.1.9.2.1.8.0",
    "1.3.6.1.4.1.9.2.1.9.0",
    "1.3.6.1.2.1.2.2.1.8.2",
];

pub fn default_devices() -> Vec<Device> {
    ["192.168.220.134", "192.168.10.1", "192.168.20.1"]
        .into_iter()
        .map(|ip| Device {
            ip: ip.to_string(),
            community: default_community(),
            oids: ROUTER_METRICS.iter().map(|oid| oid.to_string()).collect(),
        })
        .collect()
}
