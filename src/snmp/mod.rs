use async_trait::async_trait;

use crate::error::SnmpError;

pub mod memory;
pub mod oid;
pub mod v2c;
pub mod value;

pub use memory::MemoryTransport;
pub use oid::{OidSuffix, decode_suffix, normalize_root, parse_oid, trailing_ipv4};
pub use v2c::{SnmpClientV2c, V2cTransport};
pub use value::{NOT_AVAILABLE, SnmpValue, TypeTag, Varbind};

/// Запрос/ответ к SNMP агенту.
///
/// Каждый вызов - отдельный обмен: реализация сама открывает и закрывает
/// сессию, ошибка одного обмена не влияет на другие.
#[async_trait]
pub trait SnmpTransport: Send + Sync {
    /// GET по списку OID. Ответ идет в том же порядке, что и запрос;
    /// ошибочные varbind отдаются как "N/A".
    async fn get(
        &self,
        target: &str,
        community: &str,
        oids: &[String],
    ) -> Result<Vec<Varbind>, SnmpError>;

    /// WALK поддерева `root`
    async fn walk(&self, target: &str, community: &str, root: &str)
    -> Result<Vec<Varbind>, SnmpError>;
}

/// Значение varbind по OID, если агент его отдал
pub fn lookup<'a>(varbinds: &'a [Varbind], oid: &str) -> Option<&'a str> {
    varbinds
        .iter()
        .find(|vb| vb.oid == oid && vb.is_available())
        .map(|vb| vb.value.as_str())
}
