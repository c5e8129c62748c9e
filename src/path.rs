//! Path reconstruction: walking a search's
//! back-pointers into a flat sequence of transit legs.

use std::rc::Rc;

use crate::error::{Error, Result};
use crate::mcraptor::state::McRaptorState;
use crate::model::network::TransitNetwork;
use crate::raptor::state::RaptorState;
use crate::{PatternIndex, StopIndex, Time, TripIndex, BOARD_SLACK};

/// One complete itinerary: parallel arrays of length `L` (the number
/// of legs), board-stop/alight-stop/alight-time/trip index per leg.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path {
    pub patterns: Vec<PatternIndex>,
    pub board_stops: Vec<StopIndex>,
    pub alight_stops: Vec<StopIndex>,
    pub alight_times: Vec<Time>,
    pub trips: Vec<TripIndex>,
}

impl Path {
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Reconstruct the path to `terminal_stop` from a scheduled RAPTOR
/// search's final-round state, by walking `previous` back to round 0.
///
/// `RaptorState` does not itself record which trip index was boarded
/// (only the pattern and board stop survive per round), so
/// the trip is recovered deterministically by replaying the same
/// earliest-trip search the scan used, seeded from the predecessor
/// round's `bestTimes` at the board stop — the same computation
/// `raptor::scheduled::scan_pattern` performed when it produced this
/// leg.
pub fn reconstruct_scheduled(
    network: &TransitNetwork,
    state: &Rc<RaptorState>,
    terminal_stop: StopIndex,
) -> Result<Path> {
    struct RawLeg {
        pattern: PatternIndex,
        board_stop: StopIndex,
        alight_stop: StopIndex,
        alight_time: Time,
        predecessor: Rc<RaptorState>,
    }

    let mut raw = Vec::new();
    let mut stop = terminal_stop;
    let mut cur = Rc::clone(state);

    while let Some(prev) = cur.previous.clone() {
        if prev.best_non_transfer_times[stop] == cur.best_non_transfer_times[stop] {
            cur = prev;
            continue;
        }

        let pattern = cur.previous_patterns[stop]
            .ok_or(Error::MissingTransfer { from: stop, to: stop })?;
        let board_stop = cur.previous_stop[stop]
            .ok_or(Error::MissingTransfer { from: stop, to: stop })?;
        raw.push(RawLeg {
            pattern,
            board_stop,
            alight_stop: stop,
            alight_time: cur.best_non_transfer_times[stop],
            predecessor: Rc::clone(&prev),
        });

        stop = board_stop;
        cur = prev;
        if let Some(transfer_from) = cur.transfer_stop[stop] {
            stop = transfer_from;
        }
    }
    raw.reverse();

    let mut path = Path {
        patterns: Vec::with_capacity(raw.len()),
        board_stops: Vec::with_capacity(raw.len()),
        alight_stops: Vec::with_capacity(raw.len()),
        alight_times: Vec::with_capacity(raw.len()),
        trips: Vec::with_capacity(raw.len()),
    };

    for leg in &raw {
        let stops = network.pattern_stops(leg.pattern)?;
        let board_pos = stops
            .iter()
            .position(|&s| s == leg.board_stop)
            .ok_or(Error::MissingTransfer {
                from: leg.board_stop,
                to: leg.alight_stop,
            })?;
        let threshold = leg.predecessor.best_times[leg.board_stop].saturating_add(BOARD_SLACK);
        let trip_idx = network
            .find_earliest_trip(leg.pattern, board_pos, threshold)
            .ok_or(Error::MissingTransfer {
                from: leg.board_stop,
                to: leg.alight_stop,
            })?;

        path.patterns.push(leg.pattern);
        path.board_stops.push(leg.board_stop);
        path.alight_stops.push(leg.alight_stop);
        path.alight_times.push(leg.alight_time);
        path.trips.push(trip_idx);
    }

    Ok(path)
}

/// Reconstruct the path ending at a McRAPTOR state, by walking `back`
/// pointers to the access state. Unlike the
/// scheduled case, every field a leg needs is already recorded on the
/// state itself, so this cannot fail.
pub fn reconstruct_mcraptor(state: &Rc<McRaptorState>) -> Path {
    let mut patterns = Vec::new();
    let mut board_stops = Vec::new();
    let mut alight_stops = Vec::new();
    let mut alight_times = Vec::new();
    let mut trips = Vec::new();

    let mut cur = Some(Rc::clone(state));
    while let Some(s) = cur {
        if let (Some(pattern), Some(trip)) = (s.pattern, s.trip) {
            let back = s
                .back
                .as_ref()
                .expect("a boarding state always has a back-pointer");
            patterns.push(pattern);
            board_stops.push(back.stop);
            alight_stops.push(s.stop);
            alight_times.push(s.time);
            trips.push(trip);
        }
        cur = s.back.clone();
    }

    patterns.reverse();
    board_stops.reverse();
    alight_stops.reverse();
    alight_times.reverse();
    trips.reverse();

    Path {
        patterns,
        board_stops,
        alight_stops,
        alight_times,
        trips,
    }
}
