//! Read-only transit data model.

pub mod network;
pub mod types;

pub use network::TransitNetwork;
pub use types::{Pattern, Stop, StopTime, TargetLink, Transfer};
