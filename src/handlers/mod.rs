pub mod health;
pub mod interfaces;
pub mod monitor;
pub mod snmp;
pub mod system;

pub use health::health;
pub use interfaces::{get_interface, get_interface_for, list_interfaces, list_interfaces_for};
pub use monitor::monitor_history;
pub use snmp::query_snmp;
pub use system::system_info;
