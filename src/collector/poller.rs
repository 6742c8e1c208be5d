use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{MissedTickBehavior, interval};

use super::history::History;
use super::types::MonitorSnapshot;
use crate::config::Device;
use crate::error::SnmpError;
use crate::formatter::names::{metric_name, row_index};
use crate::snmp::oid::{IF_DESCR, IF_OPER_STATUS, SYS_NAME, normalize_root, with_index};
use crate::snmp::{NOT_AVAILABLE, SnmpTransport, Varbind, lookup};

/// Имя устройства, если sysName получить не удалось
pub const UNKNOWN_SYS_NAME: &str = "Unknown";

/// Политика для тика, который пришел во время выполнения предыдущего
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Новый тик отбрасывается
    #[default]
    Skip,
    /// Запоминается один отложенный тик, он стартует сразу после текущего
    Queue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
}

/// Решение по очередному срабатыванию таймера
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickAdmission {
    Start,
    Skipped,
    Queued,
}

struct GuardState {
    state: LoopState,
    queued: bool,
}

/// Автомат Idle -> Running -> Idle, не допускающий параллельных тиков
pub struct TickGuard {
    policy: OverlapPolicy,
    inner: Mutex<GuardState>,
}

impl TickGuard {
    pub fn new(policy: OverlapPolicy) -> Self {
        Self {
            policy,
            inner: Mutex::new(GuardState {
                state: LoopState::Idle,
                queued: false,
            }),
        }
    }

    pub fn state(&self) -> LoopState {
        self.lock().state
    }

    pub fn try_begin(&self) -> TickAdmission {
        let mut inner = self.lock();
        match (inner.state, self.policy) {
            (LoopState::Idle, _) => {
                inner.state = LoopState::Running;
                TickAdmission::Start
            }
            (LoopState::Running, OverlapPolicy::Skip) => TickAdmission::Skipped,
            (LoopState::Running, OverlapPolicy::Queue) => {
                inner.queued = true;
                TickAdmission::Queued
            }
        }
    }

    /// Завершает тик. `true` - есть отложенный тик, состояние остается Running
    pub fn finish(&self) -> bool {
        let mut inner = self.lock();
        if inner.queued {
            inner.queued = false;
            true
        } else {
            inner.state = LoopState::Idle;
            false
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, GuardState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Итог одного тика
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub appended: usize,
    pub failed: usize,
}

/// Опрос списка устройств и запись снимков в журнал
pub struct Poller {
    transport: Arc<dyn SnmpTransport>,
    history: Arc<History>,
    devices: Vec<Device>,
    resolve_sys_name: bool,
}

impl Poller {
    pub fn new(
        transport: Arc<dyn SnmpTransport>,
        history: Arc<History>,
        devices: Vec<Device>,
        resolve_sys_name: bool,
    ) -> Self {
        Self {
            transport,
            history,
            devices,
            resolve_sys_name,
        }
    }

    /// Один проход по всем устройствам в порядке конфигурации
    pub async fn tick(&self) -> TickReport {
        let mut report = TickReport::default();

        for device in &self.devices {
            match self.poll_device(device).await {
                Ok(()) => report.appended += 1,
                Err(_) => report.failed += 1,
            }
        }

        report
    }

    async fn poll_device(&self, device: &Device) -> Result<(), SnmpError> {
        let sys_name = if self.resolve_sys_name {
            self.sys_name(device).await
        } else {
            UNKNOWN_SYS_NAME.to_string()
        };

        let varbinds = match self
            .transport
            .get(&device.ip, &device.community, &device.oids)
            .await
        {
            Ok(varbinds) => varbinds,
            Err(e) => {
                tracing::error!(
                    device = %device.ip,
                    sys_name = %sys_name,
                    error = %e,
                    "ошибка сбора данных устройства"
                );
                return Err(e);
            }
        };

        let snapshot = MonitorSnapshot {
            timestamp: Utc::now(),
            ip: device.ip.clone(),
            sys_name,
            metrics: Self::build_metrics(&device.oids, &varbinds),
        };

        tracing::info!(
            device = %device.ip,
            sys_name = %snapshot.sys_name,
            metrics = ?snapshot.metrics,
            "метрики собраны"
        );

        let sys_name = snapshot.sys_name.clone();
        self.history.push(snapshot).await;
        self.report_down_interfaces(device, &sys_name, &varbinds)
            .await;

        Ok(())
    }

    async fn sys_name(&self, device: &Device) -> String {
        let oids = [SYS_NAME.to_string()];
        match self.transport.get(&device.ip, &device.community, &oids).await {
            Ok(varbinds) => lookup(&varbinds, SYS_NAME)
                .unwrap_or(UNKNOWN_SYS_NAME)
                .to_string(),
            Err(e) => {
                tracing::warn!(device = %device.ip, error = %e, "не удалось получить sysName");
                UNKNOWN_SYS_NAME.to_string()
            }
        }
    }

    /// Ключи метрик по имени OID; повторяющееся имя получает суффикс индекса
    fn build_metrics(oids: &[String], varbinds: &[Varbind]) -> BTreeMap<String, String> {
        let mut metrics = BTreeMap::new();

        for oid in oids {
            let oid = normalize_root(oid);
            let mut name = metric_name(&oid);
            if metrics.contains_key(&name) {
                name = match row_index(&oid) {
                    Some(index) => format!("{}.{}", name, index),
                    None => oid.clone(),
                };
            }

            let value = varbinds
                .iter()
                .find(|vb| vb.oid == oid)
                .map(|vb| vb.value.clone())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string());

            metrics.insert(name, value);
        }

        metrics
    }

    /// Логирует упавшие интерфейсы из метрик ifOperStatus.<n>
    async fn report_down_interfaces(
        &self,
        device: &Device,
        sys_name: &str,
        varbinds: &[Varbind],
    ) {
        let prefix = format!("{}.", IF_OPER_STATUS);

        for oid in &device.oids {
            let oid = normalize_root(oid);
            let Some(index) = oid.strip_prefix(&prefix) else {
                continue;
            };

            if lookup(varbinds, &oid) == Some("1") {
                continue;
            }

            let fallback = format!("Interface {}", index);
            let descr_oid = with_index(IF_DESCR, index);
            let if_descr = match self
                .transport
                .get(&device.ip, &device.community, std::slice::from_ref(&descr_oid))
                .await
            {
                Ok(varbinds) => lookup(&varbinds, &descr_oid)
                    .map(str::to_string)
                    .unwrap_or(fallback),
                Err(e) => {
                    tracing::warn!(device = %device.ip, error = %e, "не удалось получить ifDescr");
                    fallback
                }
            };

            tracing::error!(
                device = %device.ip,
                sys_name = %sys_name,
                interface = %if_descr,
                "интерфейс упал"
            );
        }
    }
}

/// Таймер сбора: каждый тик выполняется отдельной задачей под `TickGuard`
pub struct CollectionLoop {
    poller: Arc<Poller>,
    guard: Arc<TickGuard>,
    period: Duration,
}

impl CollectionLoop {
    pub fn new(poller: Arc<Poller>, policy: OverlapPolicy, period: Duration) -> Self {
        Self {
            poller,
            guard: Arc::new(TickGuard::new(policy)),
            period,
        }
    }

    /// Срабатывание таймера: запускает тик или отдает его политике
    pub fn fire(&self) -> TickAdmission {
        let admission = self.guard.try_begin();

        match admission {
            TickAdmission::Start => {
                let poller = self.poller.clone();
                let guard = self.guard.clone();
                tokio::spawn(async move {
                    loop {
                        let report = poller.tick().await;
                        tracing::debug!(
                            appended = report.appended,
                            failed = report.failed,
                            "тик завершен"
                        );
                        if !guard.finish() {
                            break;
                        }
                    }
                });
            }
            TickAdmission::Skipped => {
                tracing::warn!("предыдущий тик еще выполняется, тик пропущен");
            }
            TickAdmission::Queued => {
                tracing::debug!("предыдущий тик еще выполняется, тик отложен");
            }
        }

        admission
    }

    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        tracing::info!(period_ms = self.period.as_millis() as u64, "цикл сбора запущен");

        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.fire();
                }
                _ = shutdown.changed() => {
                    tracing::info!("цикл сбора остановлен");
                    break;
                }
            }
        }
    }
}
