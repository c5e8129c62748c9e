//! Multi-criteria RAPTOR (McRAPTOR) profile router.

pub mod bag;
pub mod router;
pub mod sampler;
pub mod state;

pub use bag::Bag;
pub use router::{mcraptor_search, ProfileResult};
pub use sampler::DepartureSampler;
pub use state::McRaptorState;
