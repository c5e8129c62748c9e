//! Scheduled (single-criterion) RAPTOR: earliest-arrival search and its
//! range-RAPTOR extension.

pub mod scheduled;
pub mod state;

pub use scheduled::{range_search, scheduled_search};
pub use state::RaptorState;
