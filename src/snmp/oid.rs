use snmp2::Oid;

use crate::error::SnmpError;

pub const SYS_DESCR: &str = "1.3.6.1.2.1.1.1.0";
pub const SYS_UPTIME: &str = "1.3.6.1.2.1.1.3.0";
pub const SYS_NAME: &str = "1.3.6.1.2.1.1.5.0";

pub const IF_INDEX: &str = "1.3.6.1.2.1.2.2.1.1";
pub const IF_DESCR: &str = "1.3.6.1.2.1.2.2.1.2";
pub const IF_SPEED: &str = "1.3.6.1.2.1.2.2.1.5";
pub const IF_OPER_STATUS: &str = "1.3.6.1.2.1.2.2.1.8";

pub const IP_AD_ENT_ADDR: &str = "1.3.6.1.2.1.4.20.1.1";
pub const IP_AD_ENT_IF_INDEX: &str = "1.3.6.1.2.1.4.20.1.2";
pub const AT_IF_INDEX: &str = "1.3.6.1.2.1.3.1.1.3";

/// Декодированный хвост OID относительно базового
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OidSuffix {
    /// Один компонент: ifIndex
    Index(String),
    /// Четыре компонента: IPv4 адрес
    Ipv4(String),
}

pub fn parse_oid(s: &str) -> Result<Oid<'static>, SnmpError> {
    let normalized = normalize_root(s);
    let parts: Result<Vec<u64>, _> = normalized
        .trim()
        .split('.')
        .filter(|p| !p.is_empty())
        .map(|p| p.parse::<u64>())
        .collect();

    let parts = parts.map_err(|_| SnmpError::InvalidOid { oid: s.to_string() })?;
    if parts.len() < 2 {
        return Err(SnmpError::InvalidOid { oid: s.to_string() });
    }

    Oid::from(&parts).map_err(|_| SnmpError::InvalidOid { oid: s.to_string() })
}

/// Приводит текстовые корни `iso.3.6.1` и `so.3.6.1` к `1.3.6.1`
pub fn normalize_root(oid: &str) -> String {
    let oid = oid.trim().trim_start_matches('.');
    for alias in ["iso.", "so."] {
        if let Some(rest) = oid.strip_prefix(alias) {
            return format!("1.{}", rest);
        }
    }
    oid.to_string()
}

/// `base.<index>`
pub fn with_index(base: &str, index: &str) -> String {
    format!("{}.{}", base, index)
}

/// Возвращает компоненты OID после `base`, если OID лежит под `base`
fn suffix_parts<'a>(oid: &'a str, base: &str) -> Option<Vec<&'a str>> {
    let rest = oid.strip_prefix(base)?.strip_prefix('.')?;
    let parts: Vec<&str> = rest.split('.').collect();

    if parts.iter().all(|p| !p.is_empty() && p.parse::<u64>().is_ok()) {
        Some(parts)
    } else {
        None
    }
}

/// Декодирует хвост OID: 1 компонент - индекс, 4 компонента - IPv4.
///
/// Компоненты адреса берутся как есть, без проверки диапазона октета.
pub fn decode_suffix(oid: &str, base: &str) -> Option<OidSuffix> {
    let normalized = normalize_root(oid);
    let parts = suffix_parts(&normalized, base)?;

    match parts.len() {
        1 => Some(OidSuffix::Index(parts[0].to_string())),
        4 => Some(OidSuffix::Ipv4(parts.join("."))),
        _ => None,
    }
}

/// IPv4 из последних четырех компонентов OID.
///
/// atTable индексируется как `ifIndex.1.a.b.c.d`, поэтому длина хвоста
/// здесь не фиксирована.
pub fn trailing_ipv4(oid: &str, base: &str) -> Option<String> {
    let normalized = normalize_root(oid);
    let parts = suffix_parts(&normalized, base)?;

    if parts.len() < 4 {
        return None;
    }

    Some(parts[parts.len() - 4..].join("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_ipv4_suffix() {
        let oid = "1.3.6.1.2.1.4.20.1.1.192.168.10.1";
        assert_eq!(
            decode_suffix(oid, IP_AD_ENT_ADDR),
            Some(OidSuffix::Ipv4("192.168.10.1".to_string()))
        );
    }

    #[test]
    fn decodes_index_suffix() {
        assert_eq!(
            decode_suffix("1.3.6.1.2.1.2.2.1.1.17", IF_INDEX),
            Some(OidSuffix::Index("17".to_string()))
        );
    }

    #[test]
    fn non_matching_base_is_none() {
        assert_eq!(
            decode_suffix("1.3.6.1.2.1.4.20.1.2.10.0.0.1", IP_AD_ENT_ADDR),
            None
        );
        // 1.3.6.1.2.1.2.2.1.10 не должен считаться ветвью 1.3.6.1.2.1.2.2.1.1
        assert_eq!(decode_suffix("1.3.6.1.2.1.2.2.1.10.3", IF_INDEX), None);
    }

    #[test]
    fn root_aliases_decode_the_same() {
        let canonical = decode_suffix("1.3.6.1.2.1.4.20.1.1.10.0.0.1", IP_AD_ENT_ADDR);
        let iso = decode_suffix("iso.3.6.1.2.1.4.20.1.1.10.0.0.1", IP_AD_ENT_ADDR);
        let so = decode_suffix("so.3.6.1.2.1.4.20.1.1.10.0.0.1", IP_AD_ENT_ADDR);

        assert_eq!(canonical, Some(OidSuffix::Ipv4("10.0.0.1".to_string())));
        assert_eq!(iso, canonical);
        assert_eq!(so, canonical);
    }

    #[test]
    fn address_components_are_not_range_checked() {
        assert_eq!(
            decode_suffix("1.3.6.1.2.1.4.20.1.1.10.0.0.300", IP_AD_ENT_ADDR),
            Some(OidSuffix::Ipv4("10.0.0.300".to_string()))
        );
        assert_eq!(
            trailing_ipv4("1.3.6.1.2.1.4.20.1.2.256.1.1.1", IP_AD_ENT_IF_INDEX),
            Some("256.1.1.1".to_string())
        );
    }

    #[test]
    fn unsupported_suffix_length_is_none() {
        assert_eq!(decode_suffix("1.3.6.1.2.1.2.2.1.1.1.2", IF_INDEX), None);
    }

    #[test]
    fn trailing_ipv4_reads_at_table_index() {
        assert_eq!(
            trailing_ipv4("1.3.6.1.2.1.3.1.1.3.2.1.42.42.42.1", AT_IF_INDEX),
            Some("42.42.42.1".to_string())
        );
        assert_eq!(
            trailing_ipv4("iso.3.6.1.2.1.4.20.1.2.192.168.20.1", IP_AD_ENT_IF_INDEX),
            Some("192.168.20.1".to_string())
        );
        assert_eq!(trailing_ipv4("1.3.6.1.2.1.3.1.1.3.2", AT_IF_INDEX), None);
    }

    #[test]
    fn parse_oid_accepts_aliases_and_rejects_garbage() {
        assert_eq!(
            parse_oid("iso.3.6.1.2.1.1.5.0").map(|o| o.to_string()),
            parse_oid(SYS_NAME).map(|o| o.to_string())
        );
        assert!(matches!(
            parse_oid("1.3.x.1"),
            Err(SnmpError::InvalidOid { .. })
        ));
    }
}
