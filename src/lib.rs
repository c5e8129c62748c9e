//! Core of a public-transit shortest-path and profile-routing engine
//! built around the RAPTOR algorithm family.
//!
//! Given a read-only transit network, a set of access stops with
//! walk-times from an origin, and a set of egress stops with walk-times
//! to a destination, this crate computes earliest-arrival travel times
//! across rounds ([`raptor`]), a pareto-optimal set of profile-routing
//! paths under multiple criteria ([`mcraptor`]), and the extension of
//! stop-arrival times to arbitrary geographic targets ([`propagation`]).
//!
//! Loading a network from GTFS, building a street graph, computing
//! access/egress times, parsing requests off the wire, and fare
//! calculator implementations are all external collaborators: this
//! crate only specifies the interfaces it needs from them.

pub mod dominance;
pub mod error;
pub mod mcraptor;
pub mod model;
pub mod path;
pub mod prelude;
pub mod propagation;
pub mod raptor;
pub mod request;
pub mod timer;

pub use error::{Error, Result};
pub use mcraptor::mcraptor_search;
pub use model::network::TransitNetwork;
pub use propagation::propagate;
pub use raptor::{range_search, scheduled_search};
pub use request::Request;

/// A stop identifier, dense in `[0, nStops)`.
pub type StopIndex = usize;

/// A pattern identifier, dense in `[0, nPatterns)`.
pub type PatternIndex = usize;

/// A trip's position within its pattern's trip list.
pub type TripIndex = usize;

/// A propagation-target identifier, dense in `[0, nTargets)`.
pub type TargetIndex = usize;

/// Clock-time in seconds since service-day midnight.
///
/// Values may exceed `86400` for trips past midnight. [`UNREACHED`] is
/// the sentinel meaning "no path found yet".
pub type Time = u32;

/// Sentinel value for [`Time`] meaning "not yet reached".
pub const UNREACHED: Time = Time::MAX;

/// Minimum time between becoming available at a stop and boarding a
/// departing vehicle there (seconds). Shared by scheduled RAPTOR and
/// McRAPTOR boarding rules.
pub const BOARD_SLACK: Time = 60;

/// Hard search cutoff past the request's `toTime`, beyond which no
/// McRAPTOR state is ever created (see [`request::Request`]).
pub const HARD_CUTOFF_SECONDS: Time = 3 * 3600;

/// Target count of departure-time samples drawn by the McRAPTOR
/// sampler across a search window (see [`mcraptor::sampler`]).
pub const NUMBER_OF_SEARCHES: u32 = 35;
