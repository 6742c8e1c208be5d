use async_trait::async_trait;
use snmp2::{AsyncSession, Oid};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::time::timeout;

use super::oid::{normalize_root, parse_oid};
use super::value::{SnmpValue, TypeTag, Varbind};
use super::SnmpTransport;
use crate::error::SnmpError;

/// error-status noSuchName (RFC 1157)
const ERROR_STATUS_NO_SUCH_NAME: u32 = 2;

pub struct SnmpClientV2c {
    session: AsyncSession,
    target: String,
}

impl SnmpClientV2c {
    pub async fn new(target: &str, community: &[u8]) -> Result<Self, SnmpError> {
        let session = AsyncSession::new_v2c(target, community, 2)
            .await
            .map_err(|e| {
                SnmpError::transport(target, format!("не удалось создать сессию: {}", e))
            })?;

        Ok(Self {
            session,
            target: target.to_string(),
        })
    }

    /// GET всех OID одним PDU. Ответ идет в порядке запроса.
    ///
    /// noSuchObject/noSuchInstance отдаются как Missing. Если агент отвечает
    /// noSuchName (стиль v1), OID из error-index исключается и запрос
    /// повторяется с оставшимися.
    pub async fn get_many(&mut self, oids: &[String]) -> Result<Vec<Varbind>, SnmpError> {
        let mut pending: Vec<(String, Oid<'static>)> = oids
            .iter()
            .map(|oid| Ok((normalize_root(oid), parse_oid(oid)?)))
            .collect::<Result<_, SnmpError>>()?;
        let mut answered: HashMap<String, Varbind> = HashMap::with_capacity(pending.len());

        while !pending.is_empty() {
            let request: Vec<&Oid> = pending.iter().map(|(_, oid)| oid).collect();
            let resp = self.session.get_many(&request).await.map_err(|e| {
                SnmpError::transport(&self.target, format!("GET запрос не удался: {}", e))
            })?;

            match resp.error_status {
                0 => {
                    for ((name, _), (_, value)) in pending.iter().zip(resp.varbinds) {
                        let (value, tag) = SnmpValue::from_raw(&value);
                        answered.insert(name.clone(), Varbind::new(name.clone(), value, tag));
                    }
                    break;
                }
                ERROR_STATUS_NO_SUCH_NAME => {
                    let index = resp.error_index as usize;
                    if index == 0 || index > pending.len() {
                        return Err(SnmpError::NoSuchObject {
                            target: self.target.clone(),
                            oid: pending[0].0.clone(),
                        });
                    }
                    let (missing, _) = pending.remove(index - 1);
                    tracing::debug!(
                        device = %self.target,
                        oid = %missing,
                        "агент ответил noSuchName, OID исключен"
                    );
                }
                status => {
                    return Err(SnmpError::transport(
                        &self.target,
                        format!("агент вернул error-status {} для {:?}", status, oids),
                    ));
                }
            }
        }

        Ok(oids
            .iter()
            .map(|oid| {
                let name = normalize_root(oid);
                answered.get(&name).cloned().unwrap_or_else(|| {
                    Varbind::new(name, SnmpValue::Missing, TypeTag::NoSuchObject)
                })
            })
            .collect())
    }

    pub async fn walk_bulk(
        &mut self,
        root: &str,
        max_repetitions: u32,
    ) -> Result<Vec<Varbind>, SnmpError> {
        let root_oid = parse_oid(root)?;
        let target = self.target.clone();
        let mut results = Vec::new();
        let mut current_oid = root_oid.to_owned();

        loop {
            let resp = self
                .session
                .getbulk(&[&current_oid], 0, max_repetitions)
                .await
                .map_err(|e| {
                    SnmpError::transport(&target, format!("GETBULK запрос не удался: {}", e))
                })?;

            if resp.error_status != 0 {
                return Err(SnmpError::transport(
                    &target,
                    format!("агент вернул error-status {} для {}", resp.error_status, root),
                ));
            }

            let mut next_oid = None;

            for (oid, value) in resp.varbinds {
                if !oid.starts_with(&root_oid) {
                    return Ok(results);
                }

                let (value, tag) = SnmpValue::from_raw(&value);
                if tag == TypeTag::EndOfMibView {
                    return Ok(results);
                }

                results.push(Varbind::new(oid.to_string(), value, tag));
                next_oid = Some(oid.to_owned());
            }

            // Агент, который не продвигается по дереву, зациклил бы walk
            match next_oid {
                Some(oid) if oid != current_oid => current_oid = oid,
                _ => break,
            }
        }

        Ok(results)
    }
}

/// Production транспорт: SNMPv2c поверх snmp2, одна сессия на обмен
#[derive(Debug, Clone)]
pub struct V2cTransport {
    port: u16,
    timeout: Duration,
    max_repetitions: u32,
}

impl V2cTransport {
    pub fn new(port: u16, timeout: Duration, max_repetitions: u32) -> Self {
        Self {
            port,
            timeout,
            max_repetitions,
        }
    }

    fn socket_target(&self, target: &str) -> String {
        if target.parse::<SocketAddr>().is_ok() {
            target.to_string()
        } else {
            format!("{}:{}", target, self.port)
        }
    }

    async fn with_timeout<T>(
        &self,
        target: &str,
        work: impl Future<Output = Result<T, SnmpError>>,
    ) -> Result<T, SnmpError> {
        match timeout(self.timeout, work).await {
            Ok(result) => result,
            Err(_) => Err(SnmpError::Timeout {
                target: target.to_string(),
                timeout_secs: self.timeout.as_secs(),
            }),
        }
    }
}

#[async_trait]
impl SnmpTransport for V2cTransport {
    async fn get(
        &self,
        target: &str,
        community: &str,
        oids: &[String],
    ) -> Result<Vec<Varbind>, SnmpError> {
        let address = self.socket_target(target);

        let work = async {
            let mut client = SnmpClientV2c::new(&address, community.as_bytes()).await?;
            client.get_many(oids).await
        };

        let result = self.with_timeout(target, work).await;
        match &result {
            Ok(varbinds) => {
                tracing::debug!(device = %target, oids = ?oids, count = varbinds.len(), "SNMP GET")
            }
            Err(e) => {
                tracing::debug!(device = %target, oids = ?oids, error = %e, "SNMP GET не удался")
            }
        }
        result
    }

    async fn walk(
        &self,
        target: &str,
        community: &str,
        root: &str,
    ) -> Result<Vec<Varbind>, SnmpError> {
        let address = self.socket_target(target);

        let work = async {
            let mut client = SnmpClientV2c::new(&address, community.as_bytes()).await?;
            client.walk_bulk(root, self.max_repetitions).await
        };

        let result = self.with_timeout(target, work).await;
        match &result {
            Ok(varbinds) => {
                tracing::debug!(device = %target, root = %root, count = varbinds.len(), "SNMP WALK")
            }
            Err(e) => {
                tracing::debug!(device = %target, root = %root, error = %e, "SNMP WALK не удался")
            }
        }
        result
    }
}
