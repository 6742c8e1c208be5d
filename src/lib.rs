pub mod collector;
pub mod config;
pub mod error;
pub mod formatter;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod snmp;
pub mod state;

pub use config::AppConfig;
pub use error::{ApiError, SnmpError};
pub use routes::create_router;
pub use state::AppState;
