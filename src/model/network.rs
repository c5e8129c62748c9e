//! Read-only, in-memory transit network.
//!
//! Everything here is built once by an external loader (GTFS import,
//! scenario application, ...) and then shared read-only across
//! requests for the lifetime of the process.

use crate::error::{Error, Result};
use crate::model::types::{Pattern, Stop, StopTime, TargetLink, Transfer};
use crate::{PatternIndex, StopIndex, Time};

/// The transit network consumed by the scheduled and McRAPTOR
/// searches: stops, patterns, trip schedules, transfers and
/// stop-to-target distance tables, all as flat dense arrays.
#[derive(Debug, Clone)]
pub struct TransitNetwork {
    pub stops: Vec<Stop>,
    /// Ordered stop sequence for every pattern, concatenated.
    pub pattern_stops: Vec<StopIndex>,
    pub patterns: Vec<Pattern>,
    /// Per-trip, per-stop-position arrival/departure times, concatenated.
    pub stop_times: Vec<StopTime>,
    /// Patterns serving each stop, concatenated.
    pub stop_patterns: Vec<PatternIndex>,
    /// Outgoing transfers for each stop, concatenated.
    pub transfers: Vec<Transfer>,
    /// Stop-to-target distance table entries for each stop, concatenated.
    pub stop_targets: Vec<TargetLink>,
}

impl TransitNetwork {
    pub fn num_stops(&self) -> usize {
        self.stops.len()
    }

    pub fn num_patterns(&self) -> usize {
        self.patterns.len()
    }

    pub fn validate_stop(&self, stop: StopIndex) -> Result<()> {
        if stop >= self.stops.len() {
            Err(Error::InvalidStop(stop))
        } else {
            Ok(())
        }
    }

    pub fn validate_pattern(&self, pattern: PatternIndex) -> Result<()> {
        if pattern >= self.patterns.len() {
            Err(Error::InvalidPattern(pattern))
        } else {
            Ok(())
        }
    }

    /// The ordered stop sequence of a pattern.
    pub fn pattern_stops(&self, pattern: PatternIndex) -> Result<&[StopIndex]> {
        let p = self
            .patterns
            .get(pattern)
            .ok_or(Error::InvalidPattern(pattern))?;
        let end = p.stops_start + p.num_stops;
        self.pattern_stops
            .get(p.stops_start..end)
            .ok_or(Error::InvalidPattern(pattern))
    }

    /// The full stop-time row for one trip of one pattern.
    pub fn trip(&self, pattern: PatternIndex, trip_idx: usize) -> Result<&[StopTime]> {
        let p = self
            .patterns
            .get(pattern)
            .ok_or(Error::InvalidPattern(pattern))?;
        if trip_idx >= p.num_trips {
            return Err(Error::InvalidTrip(trip_idx, pattern));
        }
        let start = p.stop_time_offset(trip_idx, 0);
        let end = start + p.num_stops;
        self.stop_times
            .get(start..end)
            .ok_or(Error::InvalidPattern(pattern))
    }

    /// Outgoing transfers from `stop`.
    pub fn stop_transfers(&self, stop: StopIndex) -> Result<&[Transfer]> {
        self.validate_stop(stop)?;
        let s = &self.stops[stop];
        let end = s.transfers_start + s.transfers_len;
        self.transfers
            .get(s.transfers_start..end)
            .ok_or(Error::InvalidStop(stop))
    }

    /// Patterns serving `stop`.
    pub fn patterns_for_stop(&self, stop: StopIndex) -> &[PatternIndex] {
        let s = &self.stops[stop];
        let end = s.patterns_start + s.patterns_len;
        &self.stop_patterns[s.patterns_start..end]
    }

    /// Propagation target links for `stop` (empty if the stop was
    /// never linked to a pointset).
    pub fn stop_targets(&self, stop: StopIndex) -> &[TargetLink] {
        let s = &self.stops[stop];
        let end = s.targets_start + s.targets_len;
        &self.stop_targets[s.targets_start..end]
    }

    /// Binary-search the earliest trip on `pattern` boardable at stop
    /// position `stop_pos` no earlier than `earliest_board` (strict:
    /// `departure > earliest_board` is required by callers that apply
    /// board slack themselves; this helper uses `departure >=
    /// earliest_board` and lets the caller add slack before calling).
    pub fn find_earliest_trip(
        &self,
        pattern: PatternIndex,
        stop_pos: usize,
        earliest_board: Time,
    ) -> Option<usize> {
        let p = &self.patterns[pattern];
        let mut low = 0usize;
        let mut high = p.num_trips;
        let mut result = None;
        while low < high {
            let mid = low + (high - low) / 2;
            let offset = p.stop_time_offset(mid, stop_pos);
            let departure = self.stop_times[offset].departure;
            if departure >= earliest_board {
                result = Some(mid);
                high = mid;
            } else {
                low = mid + 1;
            }
        }
        result
    }
}
