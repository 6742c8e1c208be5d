pub mod requests;

pub use requests::{EmptyResult, SnmpQuery, SnmpQueryResult, SystemInfo};
