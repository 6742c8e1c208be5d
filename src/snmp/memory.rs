use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;

use super::oid::normalize_root;
use super::value::{SnmpValue, TypeTag, Varbind};
use super::SnmpTransport;
use crate::error::SnmpError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Get,
    Walk,
}

#[derive(Default)]
struct Agent {
    objects: BTreeMap<String, (SnmpValue, TypeTag)>,
    failing_walks: HashSet<String>,
    failure: Option<SnmpError>,
}

/// In-memory SNMP транспорт: набор агентов с заранее заданными объектами.
///
/// Считает вызовы по (операция, OID), что позволяет проверять порядок
/// опроса без сети.
#[derive(Default)]
pub struct MemoryTransport {
    agents: Mutex<HashMap<String, Agent>>,
    calls: Mutex<Vec<(String, Operation, String)>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, target: &str, oid: &str, value: SnmpValue, type_tag: TypeTag) {
        let mut agents = self.agents.lock().unwrap_or_else(|e| e.into_inner());
        agents
            .entry(target.to_string())
            .or_default()
            .objects
            .insert(normalize_root(oid), (value, type_tag));
    }

    pub fn insert_text(&self, target: &str, oid: &str, value: &str) {
        self.insert(target, oid, SnmpValue::Text(value.to_string()), TypeTag::OctetString);
    }

    pub fn insert_integer(&self, target: &str, oid: &str, value: i64) {
        self.insert(target, oid, SnmpValue::Integer(value), TypeTag::Integer);
    }

    /// Все обмены с `target` будут завершаться ошибкой
    pub fn fail_target(&self, target: &str, error: SnmpError) {
        let mut agents = self.agents.lock().unwrap_or_else(|e| e.into_inner());
        agents.entry(target.to_string()).or_default().failure = Some(error);
    }

    /// WALK поддерева `root` на `target` будет завершаться ошибкой транспорта
    pub fn fail_walk(&self, target: &str, root: &str) {
        let mut agents = self.agents.lock().unwrap_or_else(|e| e.into_inner());
        agents
            .entry(target.to_string())
            .or_default()
            .failing_walks
            .insert(normalize_root(root));
    }

    /// Сколько раз запрашивался `oid` указанной операцией (на любом агенте)
    pub fn calls(&self, operation: Operation, oid: &str) -> usize {
        let oid = normalize_root(oid);
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|(_, op, called)| *op == operation && *called == oid)
            .count()
    }

    /// Число обменов с `target`
    pub fn exchanges(&self, target: &str) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|(t, _, _)| t == target)
            .count()
    }

    fn record(&self, target: &str, operation: Operation, oid: &str) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((target.to_string(), operation, normalize_root(oid)));
    }
}

#[async_trait]
impl SnmpTransport for MemoryTransport {
    async fn get(
        &self,
        target: &str,
        _community: &str,
        oids: &[String],
    ) -> Result<Vec<Varbind>, SnmpError> {
        for oid in oids {
            self.record(target, Operation::Get, oid);
        }

        let agents = self.agents.lock().unwrap_or_else(|e| e.into_inner());
        let agent = agents.get(target).ok_or_else(|| SnmpError::Timeout {
            target: target.to_string(),
            timeout_secs: 30,
        })?;

        if let Some(err) = &agent.failure {
            return Err(err.clone());
        }

        Ok(oids
            .iter()
            .map(|oid| {
                let oid = normalize_root(oid);
                match agent.objects.get(&oid) {
                    Some((value, tag)) => Varbind::new(oid, value.clone(), *tag),
                    None => Varbind::new(oid, SnmpValue::Missing, TypeTag::NoSuchInstance),
                }
            })
            .collect())
    }

    async fn walk(
        &self,
        target: &str,
        _community: &str,
        root: &str,
    ) -> Result<Vec<Varbind>, SnmpError> {
        self.record(target, Operation::Walk, root);

        let agents = self.agents.lock().unwrap_or_else(|e| e.into_inner());
        let agent = agents.get(target).ok_or_else(|| SnmpError::Timeout {
            target: target.to_string(),
            timeout_secs: 30,
        })?;

        if let Some(err) = &agent.failure {
            return Err(err.clone());
        }

        let root = normalize_root(root);
        if agent.failing_walks.contains(&root) {
            return Err(SnmpError::transport(target, format!("walk {} отклонен", root)));
        }

        let prefix = format!("{}.", root);
        Ok(agent
            .objects
            .iter()
            .filter(|(oid, _)| oid.starts_with(&prefix))
            .map(|(oid, (value, tag))| Varbind::new(oid.clone(), value.clone(), *tag))
            .collect())
    }
}
