pub mod names;
pub mod uptime;

pub use names::metric_name;
pub use uptime::format_uptime;
