use std::sync::Arc;

use crate::collector::{History, InterfaceInspector};
use crate::config::AppConfig;
use crate::snmp::SnmpTransport;

/// Общее состояние HTTP обработчиков
#[derive(Clone)]
pub struct AppState {
    pub transport: Arc<dyn SnmpTransport>,
    pub inspector: Arc<InterfaceInspector>,
    pub history: Arc<History>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(transport: Arc<dyn SnmpTransport>, config: AppConfig) -> Self {
        let history = Arc::new(History::new(config.settings.collection.history_capacity));

        Self {
            inspector: Arc::new(InterfaceInspector::new(transport.clone())),
            transport,
            history,
            config: Arc::new(config),
        }
    }
}
