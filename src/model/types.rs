//! Flat, dense record types backing [`super::network::TransitNetwork`].
//!
//! Patterns, trips and transfers are stored as parallel flattened
//! arrays sliced by `start`/`len` pairs rather than as nested
//! `Vec<Vec<_>>`: one allocation per array, one bounds check per
//! access, and trivial `Clone`/`Send`/`Sync`.

use crate::{PatternIndex, StopIndex, TargetIndex, Time};

/// A stop in the network, carrying only the offsets into the flat
/// tables it participates in. Geographic position, naming, and any
/// other descriptive metadata are the embedder's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stop {
    pub transfers_start: usize,
    pub transfers_len: usize,
    pub patterns_start: usize,
    pub patterns_len: usize,
    pub targets_start: usize,
    pub targets_len: usize,
}

/// A pattern: an ordered sequence of stops plus a non-overtaking list
/// of trips, each trip carrying one arrival/departure pair per stop
/// position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    pub stops_start: usize,
    pub num_stops: usize,
    pub trips_start: usize,
    pub num_trips: usize,
    /// Whether this pattern is a headway-based ("frequency") pattern.
    /// The scheduled core always rejects boarding on these with
    /// [`crate::Error::UnsupportedFrequencyBoarding`].
    pub is_frequency_based: bool,
}

impl Pattern {
    /// Offset of trip `trip`'s `stop_pos`-th stop-time in the flat
    /// `stop_times` array.
    #[inline]
    pub fn stop_time_offset(&self, trip: usize, stop_pos: usize) -> usize {
        self.trips_start + trip * self.num_stops + stop_pos
    }
}

/// Arrival and departure clock-time at one stop position of one trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopTime {
    pub arrival: Time,
    pub departure: Time,
}

/// A directed walking transfer out of some stop (the source stop is
/// implicit in which slice of the flat table this entry lives in).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    pub to_stop: StopIndex,
    pub distance_millimeters: u32,
}

/// A link from a stop to a geographic propagation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetLink {
    pub target: TargetIndex,
    pub distance_millimeters: u32,
}
