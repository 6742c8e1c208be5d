/// Имя метрики по OID.
///
/// Скаляры именуются напрямую, колонки ifTable - по имени колонки
/// (индекс отбрасывается). Неизвестные OID остаются как есть.
pub fn metric_name(oid: &str) -> String {
    if let Some(name) = scalar_name(oid) {
        return name.to_string();
    }

    let column_oid = extract_column_oid(oid);
    match column_name(&column_oid) {
        Some(name) => name.to_string(),
        None => oid.to_string(),
    }
}

/// Индекс строки таблицы после OID колонки, если он есть
pub fn row_index(oid: &str) -> Option<&str> {
    let column_oid = extract_column_oid(oid);
    if column_oid == oid {
        return None;
    }
    oid.get(column_oid.len() + 1..)
}

fn scalar_name(oid: &str) -> Option<&'static str> {
    let name = match oid {
        // SNMPv2-MIB system
        "1.3.6.1.2.1.1.1.0" => "sysDescr",
        "1.3.6.1.2.1.1.2.0" => "sysObjectID",
        "1.3.6.1.2.1.1.3.0" => "sysUpTime",
        "1.3.6.1.2.1.1.4.0" => "sysContact",
        "1.3.6.1.2.1.1.5.0" => "sysName",
        "1.3.6.1.2.1.1.6.0" => "sysLocation",

        // OLD-CISCO-CPU-MIB / OLD-CISCO-MEMORY-MIB
        "1.3.6.1.4.1.9.2.1.56.0" => "cpu5Sec",
        "1.3.6.1.4.1.9.2.1.57.0" => "cpu1Min",
        "1.3.6.1.4.1.9.2.1.58.0" => "cpu5Min",
        "1.3.6.1.4.1.9.2.1.8.0" => "memFree",
        "1.3.6.1.4.1.9.2.1.9.0" => "memUsed",

        _ => return None,
    };
    Some(name)
}

fn extract_column_oid(oid: &str) -> String {
    let parts: Vec<&str> = oid.split('.').collect();

    // ifTable: 1.3.6.1.2.1.2.2.1.X.INDEX -> 1.3.6.1.2.1.2.2.1.X
    if parts.len() >= 11 && parts[0..9] == ["1", "3", "6", "1", "2", "1", "2", "2", "1"] {
        return parts[0..10].join(".");
    }

    oid.to_string()
}

fn column_name(column_oid: &str) -> Option<&'static str> {
    let name = match column_oid {
        "1.3.6.1.2.1.2.2.1.1" => "ifIndex",
        "1.3.6.1.2.1.2.2.1.2" => "ifDescr",
        "1.3.6.1.2.1.2.2.1.3" => "ifType",
        "1.3.6.1.2.1.2.2.1.4" => "ifMtu",
        "1.3.6.1.2.1.2.2.1.5" => "ifSpeed",
        "1.3.6.1.2.1.2.2.1.7" => "ifAdminStatus",
        "1.3.6.1.2.1.2.2.1.8" => "ifOperStatus",
        "1.3.6.1.2.1.2.2.1.10" => "ifInOctets",
        "1.3.6.1.2.1.2.2.1.13" => "ifInDiscards",
        "1.3.6.1.2.1.2.2.1.16" => "ifOutOctets",
        "1.3.6.1.2.1.2.2.1.19" => "ifOutDiscards",
        _ => return None,
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_scalars_and_columns() {
        assert_eq!(metric_name("1.3.6.1.2.1.1.3.0"), "sysUpTime");
        assert_eq!(metric_name("1.3.6.1.4.1.9.2.1.58.0"), "cpu5Min");
        assert_eq!(metric_name("1.3.6.1.2.1.2.2.1.8.2"), "ifOperStatus");
        assert_eq!(metric_name("1.3.6.1.2.1.2.2.1.10.14"), "ifInOctets");
    }

    #[test]
    fn unknown_oid_keeps_its_text() {
        assert_eq!(metric_name("1.3.6.1.4.1.2021.10.1.3.1"), "1.3.6.1.4.1.2021.10.1.3.1");
    }

    #[test]
    fn row_index_of_table_column() {
        assert_eq!(row_index("1.3.6.1.2.1.2.2.1.8.2"), Some("2"));
        assert_eq!(row_index("1.3.6.1.2.1.1.5.0"), None);
    }
}
