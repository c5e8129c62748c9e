//! Convenience re-exports for embedders of this crate.

pub use crate::dominance::{DominanceList, FareCalculator, FareParetoList, SuboptimalList};
pub use crate::error::{Error, Result};
pub use crate::mcraptor::{mcraptor_search, Bag, DepartureSampler, McRaptorState, ProfileResult};
pub use crate::model::network::TransitNetwork;
pub use crate::model::types::{Pattern, Stop, StopTime, TargetLink, Transfer};
pub use crate::path::{reconstruct_mcraptor, reconstruct_scheduled, Path};
pub use crate::propagation::propagate;
pub use crate::raptor::{range_search, scheduled_search, RaptorState};
pub use crate::request::Request;
pub use crate::timer::ExecutionTimer;
pub use crate::{
    PatternIndex, StopIndex, TargetIndex, Time, TripIndex, BOARD_SLACK, HARD_CUTOFF_SECONDS,
    NUMBER_OF_SEARCHES, UNREACHED,
};
