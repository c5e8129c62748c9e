//! Scheduled RAPTOR per-round state.

use std::rc::Rc;

use fixedbitset::FixedBitSet;

use crate::{PatternIndex, StopIndex, Time, UNREACHED};

/// A per-round snapshot of stop arrival times and the board-side
/// bookkeeping needed to reconstruct a path,
/// linked to the state of the prior round.
#[derive(Debug, Clone)]
pub struct RaptorState {
    pub departure_time: Time,
    pub max_duration_seconds: Time,

    /// Best arrival time this round, including by street transfer.
    pub best_times: Vec<Time>,
    /// Best arrival time this round reached by alighting a vehicle.
    pub best_non_transfer_times: Vec<Time>,
    /// Pattern used to achieve `best_non_transfer_times[stop]`.
    pub previous_patterns: Vec<Option<PatternIndex>>,
    /// Board stop used to achieve `best_non_transfer_times[stop]`.
    pub previous_stop: Vec<Option<StopIndex>>,
    /// Source stop of the transfer that produced `best_times[stop]`,
    /// if it was transfer-improved.
    pub transfer_stop: Vec<Option<StopIndex>>,

    pub previous: Option<Rc<RaptorState>>,

    /// Stops whose `best_non_transfer_times` improved this round.
    pub non_transfer_touched: FixedBitSet,
    /// Stops whose `best_times` improved this round (by either cause).
    pub best_touched: FixedBitSet,
}

impl RaptorState {
    pub fn new(num_stops: usize, departure_time: Time, max_duration_seconds: Time) -> Self {
        RaptorState {
            departure_time,
            max_duration_seconds,
            best_times: vec![UNREACHED; num_stops],
            best_non_transfer_times: vec![UNREACHED; num_stops],
            previous_patterns: vec![None; num_stops],
            previous_stop: vec![None; num_stops],
            transfer_stop: vec![None; num_stops],
            previous: None,
            non_transfer_touched: FixedBitSet::with_capacity(num_stops),
            best_touched: FixedBitSet::with_capacity(num_stops),
        }
    }

    pub fn num_stops(&self) -> usize {
        self.best_times.len()
    }

    /// Advance to the next round: a shallow copy of all parallel
    /// arrays, linked back to `self_rc` so path reconstruction can
    /// still read the prior round unmodified.
    pub fn copy(self_rc: &Rc<RaptorState>) -> RaptorState {
        let num_stops = self_rc.num_stops();
        RaptorState {
            departure_time: self_rc.departure_time,
            max_duration_seconds: self_rc.max_duration_seconds,
            best_times: self_rc.best_times.clone(),
            best_non_transfer_times: self_rc.best_non_transfer_times.clone(),
            previous_patterns: self_rc.previous_patterns.clone(),
            previous_stop: self_rc.previous_stop.clone(),
            transfer_stop: self_rc.transfer_stop.clone(),
            previous: Some(Rc::clone(self_rc)),
            non_transfer_touched: FixedBitSet::with_capacity(num_stops),
            best_touched: FixedBitSet::with_capacity(num_stops),
        }
    }

    /// Pointwise-merge `other` into `self` (range-RAPTOR across
    /// departure minutes). Ties prefer `other`: it comes from a later
    /// (here: more-recently-processed, earlier-departing) search and
    /// implies fewer transfers were needed in that minute's search.
    pub fn min(&mut self, other: &RaptorState) {
        for stop in 0..self.num_stops() {
            if other.best_times[stop] <= self.best_times[stop] {
                self.best_times[stop] = other.best_times[stop];
                self.transfer_stop[stop] = other.transfer_stop[stop];
            }
            if other.best_non_transfer_times[stop] <= self.best_non_transfer_times[stop] {
                self.best_non_transfer_times[stop] = other.best_non_transfer_times[stop];
                self.previous_patterns[stop] = other.previous_patterns[stop];
                self.previous_stop[stop] = other.previous_stop[stop];
            }
        }
    }

    /// Attempt to record `time` at `stop`. Returns `true` if either
    /// the transfer-inclusive or the non-transfer best time improved.
    /// The only rejection is the duration cap —
    /// not fatal, just means this candidate is discarded.
    pub fn set_time_at_stop(
        &mut self,
        stop: StopIndex,
        time: Time,
        from_pattern: Option<PatternIndex>,
        from_stop: Option<StopIndex>,
        transfer: bool,
    ) -> bool {
        if time > self.departure_time.saturating_add(self.max_duration_seconds) {
            return false;
        }

        let mut improved = false;

        if !transfer && time < self.best_non_transfer_times[stop] {
            self.best_non_transfer_times[stop] = time;
            self.previous_patterns[stop] = from_pattern;
            self.previous_stop[stop] = from_stop;
            self.non_transfer_touched.set(stop, true);
            improved = true;
        }

        if time < self.best_times[stop] {
            if let Some(prev) = &self.previous {
                if prev.best_times[stop] < time {
                    log::warn!(
                        "previous round has lower time at stop {stop} ({} < {time}); \
                         continuing with the looser value",
                        prev.best_times[stop]
                    );
                }
            }
            self.best_times[stop] = time;
            self.transfer_stop[stop] = if transfer { from_stop } else { None };
            self.best_touched.set(stop, true);
            improved = true;
        }

        improved
    }

    /// Used by range-RAPTOR: move the window and discard any best
    /// times that now exceed the new duration cap.
    pub fn set_departure_time(&mut self, new_departure_time: Time) {
        self.departure_time = new_departure_time;
        let cutoff = new_departure_time.saturating_add(self.max_duration_seconds);
        for stop in 0..self.num_stops() {
            if self.best_times[stop] > cutoff {
                self.best_times[stop] = UNREACHED;
                self.transfer_stop[stop] = None;
            }
            if self.best_non_transfer_times[stop] > cutoff {
                self.best_non_transfer_times[stop] = UNREACHED;
                self.previous_patterns[stop] = None;
                self.previous_stop[stop] = None;
            }
        }
    }

    /// Stops touched (by transit or transfer) this round, driving the
    /// next round's pattern scan.
    pub fn touched_stops(&self) -> FixedBitSet {
        let mut touched = self.best_touched.clone();
        touched.union_with(&self.non_transfer_touched);
        touched
    }
}
