pub mod history;
pub mod interfaces;
pub mod poller;
pub mod topology;
pub mod types;

pub use history::History;
pub use interfaces::{Discovery, InterfaceInspector, format_speed};
pub use poller::{CollectionLoop, OverlapPolicy, Poller, TickGuard, TickReport};
pub use topology::TopologyResolver;
pub use types::{InterfaceRecord, MonitorSnapshot, OperState, Topology, TopologyMap};
