use serde::Serialize;
use snmp2::Value;

/// Маркер отсутствующего значения
pub const NOT_AVAILABLE: &str = "N/A";

/// Значение varbind после выхода из SNMP библиотеки
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnmpValue {
    Text(String),
    Integer(i64),
    Missing,
}

/// SNMP тип значения
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeTag {
    Integer,
    OctetString,
    ObjectIdentifier,
    IpAddress,
    Counter32,
    Gauge32,
    TimeTicks,
    Opaque,
    Counter64,
    Null,
    NoSuchObject,
    NoSuchInstance,
    EndOfMibView,
    Other,
}

impl TypeTag {
    /// Агент сообщил, что объекта нет
    pub fn is_absent(self) -> bool {
        matches!(self, TypeTag::NoSuchObject | TypeTag::NoSuchInstance)
    }
}

impl SnmpValue {
    pub fn normalize(&self) -> String {
        match self {
            SnmpValue::Text(s) => s.clone(),
            SnmpValue::Integer(n) => n.to_string(),
            SnmpValue::Missing => NOT_AVAILABLE.to_string(),
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            SnmpValue::Integer(n) => u64::try_from(*n).ok(),
            SnmpValue::Text(s) => s.trim().parse().ok(),
            SnmpValue::Missing => None,
        }
    }

    /// Конвертирует значение snmp2 в собственное (без заимствования буфера сессии)
    pub fn from_raw(value: &Value<'_>) -> (SnmpValue, TypeTag) {
        match value {
            Value::OctetString(bytes) => (
                SnmpValue::Text(String::from_utf8_lossy(bytes).into_owned()),
                TypeTag::OctetString,
            ),
            Value::Opaque(bytes) => (
                SnmpValue::Text(String::from_utf8_lossy(bytes).into_owned()),
                TypeTag::Opaque,
            ),
            Value::Integer(n) => (SnmpValue::Integer(*n), TypeTag::Integer),
            Value::Counter32(n) => (SnmpValue::Integer(i64::from(*n)), TypeTag::Counter32),
            Value::Unsigned32(n) => (SnmpValue::Integer(i64::from(*n)), TypeTag::Gauge32),
            Value::Timeticks(n) => (SnmpValue::Integer(i64::from(*n)), TypeTag::TimeTicks),
            Value::Counter64(n) => {
                let value = i64::try_from(*n)
                    .map(SnmpValue::Integer)
                    .unwrap_or_else(|_| SnmpValue::Text(n.to_string()));
                (value, TypeTag::Counter64)
            }
            Value::IpAddress(octets) => (
                SnmpValue::Text(format!(
                    "{}.{}.{}.{}",
                    octets[0], octets[1], octets[2], octets[3]
                )),
                TypeTag::IpAddress,
            ),
            Value::ObjectIdentifier(oid) => {
                (SnmpValue::Text(oid.to_string()), TypeTag::ObjectIdentifier)
            }
            Value::Null => (SnmpValue::Missing, TypeTag::Null),
            Value::NoSuchObject => (SnmpValue::Missing, TypeTag::NoSuchObject),
            Value::NoSuchInstance => (SnmpValue::Missing, TypeTag::NoSuchInstance),
            Value::EndOfMibView => (SnmpValue::Missing, TypeTag::EndOfMibView),
            other => (SnmpValue::Text(format!("{:?}", other)), TypeTag::Other),
        }
    }
}

/// Один varbind ответа
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Varbind {
    pub oid: String,
    pub value: String,
    #[serde(rename = "type")]
    pub type_tag: TypeTag,
}

impl Varbind {
    pub fn new(oid: impl Into<String>, value: SnmpValue, type_tag: TypeTag) -> Self {
        Self {
            oid: oid.into(),
            value: value.normalize(),
            type_tag,
        }
    }

    pub fn is_available(&self) -> bool {
        self.value != NOT_AVAILABLE
    }
}
