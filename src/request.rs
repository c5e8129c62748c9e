//! Request parameter object: the tunables a caller
//! supplies for one search, plus the derived constants callers would
//! otherwise have to recompute themselves.

use serde::{Deserialize, Serialize};

use crate::Time;

/// Every tunable a caller may set for one scheduled or McRAPTOR search.
///
/// Deserializable so an embedding service can build one from its own
/// wire format without this crate depending on any particular encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Departure window start, seconds since service-day midnight.
    pub from_time: Time,
    /// Departure window end, seconds since service-day midnight.
    pub to_time: Time,

    /// Walking speed, meters/second.
    pub walk_speed: f64,
    /// Cycling speed, meters/second.
    pub bike_speed: f64,
    /// Driving speed, meters/second.
    pub car_speed: f64,

    /// Access/egress walk-time cap, minutes.
    pub max_walk_time: u32,
    /// Access/egress bike-time cap, minutes.
    pub max_bike_time: u32,
    /// Access/egress car-time cap, minutes.
    pub max_car_time: u32,
    /// Direct (no-transit) street-mode upper bound, minutes.
    pub street_time: u32,

    /// Sub-optimality budget, minutes; converted to seconds via
    /// [`Request::suboptimal_seconds`] before reaching a
    /// [`crate::dominance::SuboptimalList`].
    pub suboptimal_minutes: u32,
    /// Trip-duration cap, minutes; converted via
    /// [`Request::max_trip_duration_seconds`].
    pub max_trip_duration_minutes: u32,
    /// Bound on RAPTOR/McRAPTOR rounds (number of rides).
    pub max_rides: usize,

    /// Total Monte-Carlo departure-time draws across the window.
    pub monte_carlo_draws: u32,

    /// If `Some`, activates fare-pareto dominance with this fare cap
    /// (the core itself does not enforce the cap; it only switches
    /// dominance strategy — enforcement is the fare calculator's
    /// contract).
    pub max_fare: Option<i64>,
}

impl Request {
    /// `suboptimalMinutes` converted to seconds.
    pub fn suboptimal_seconds(&self) -> Time {
        self.suboptimal_minutes.saturating_mul(60)
    }

    /// `maxTripDurationMinutes` converted to seconds.
    pub fn max_trip_duration_seconds(&self) -> Time {
        self.max_trip_duration_minutes.saturating_mul(60)
    }

    /// Walk speed as integer millimeters/second, used by transfer and
    /// propagation distance conversions.
    pub fn walk_speed_mm_per_sec(&self) -> u32 {
        (self.walk_speed * 1000.0).round() as u32
    }

    /// Walk time, in whole seconds, for a transfer or propagation edge
    /// of `distance_millimeters`: integer division, truncating towards
    /// zero.
    pub fn transfer_seconds(&self, distance_millimeters: u32) -> Time {
        distance_millimeters / self.walk_speed_mm_per_sec().max(1)
    }

    /// Iterations-per-minute rule: `ceil(draws / windowMinutes)` when
    /// the network has frequency-based patterns, else one search per
    /// sampled departure minute.
    pub fn iterations_per_minute(&self, network_has_frequencies: bool) -> u32 {
        if !network_has_frequencies {
            return 1;
        }
        let window_minutes = self.window_seconds() / 60;
        if window_minutes == 0 {
            return self.monte_carlo_draws;
        }
        self.monte_carlo_draws.div_ceil(window_minutes)
    }

    /// `toTime - fromTime`, the departure-sampling window in seconds.
    pub fn window_seconds(&self) -> Time {
        self.to_time.saturating_sub(self.from_time)
    }

    /// Hard search cutoff: `toTime + HARD_CUTOFF_SECONDS`. McRAPTOR
    /// never creates a state past this, regardless of dominance.
    pub fn hard_cutoff(&self) -> Time {
        self.to_time.saturating_add(crate::HARD_CUTOFF_SECONDS)
    }
}
