//! Scheduled (single-criterion, earliest-arrival) RAPTOR search and its
//! range-RAPTOR extension.
//!
//! Boarding rule: a trip is boardable at a stop when its departure is
//! at or after `earliest + BOARD_SLACK` (inclusive boundary — a strict
//! `>` reading was considered and rejected; see the worked-scenario
//! test below, which relies on the boundary being reachable).

use std::rc::Rc;

use fixedbitset::FixedBitSet;
use hashbrown::HashMap;

use crate::error::{Error, Result};
use crate::model::network::TransitNetwork;
use crate::raptor::state::RaptorState;
use crate::{PatternIndex, StopIndex, Time, BOARD_SLACK, UNREACHED};

/// Run the scheduled earliest-arrival search from a set of access
/// stops (with their walk-times from the origin) for `max_rides`
/// rounds. Returns the final round's state; the full round-by-round
/// history is reachable by following `.previous` (see [`crate::path`]).
pub fn scheduled_search(
    network: &TransitNetwork,
    access: &[(StopIndex, Time)],
    departure_time: Time,
    max_rides: usize,
    max_duration_seconds: Time,
    walk_speed_mm_per_sec: u32,
) -> Result<Rc<RaptorState>> {
    for &(stop, _) in access {
        network.validate_stop(stop)?;
    }

    let num_stops = network.num_stops();
    let mut round0 = RaptorState::new(num_stops, departure_time, max_duration_seconds);

    for &(stop, access_time) in access {
        let arrival = departure_time.saturating_add(access_time);
        round0.set_time_at_stop(stop, arrival, None, None, true);
    }
    relax_transfers(network, &mut round0, walk_speed_mm_per_sec)?;

    let mut current = Rc::new(round0);
    for _round in 1..=max_rides {
        let mut next = RaptorState::copy(&current);
        let touched = current.touched_stops();
        if touched.count_ones(..) == 0 {
            break;
        }

        for (pattern, start_pos) in create_pattern_queue(network, &touched) {
            scan_pattern(network, pattern, start_pos, &current, &mut next)?;
        }

        relax_transfers(network, &mut next, walk_speed_mm_per_sec)?;

        if next.touched_stops().count_ones(..) == 0 {
            current = Rc::new(next);
            break;
        }
        current = Rc::new(next);
    }

    Ok(current)
}

/// Repeat the scheduled search backwards over every departure time in
/// `departure_times`, folding each minute's result into a running
/// state via [`RaptorState::min`].
pub fn range_search(
    network: &TransitNetwork,
    access: &[(StopIndex, Time)],
    departure_times: &[Time],
    max_rides: usize,
    max_duration_seconds: Time,
    walk_speed_mm_per_sec: u32,
) -> Result<Rc<RaptorState>> {
    let mut sorted = departure_times.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    let mut merged: Option<RaptorState> = None;
    for &dep in &sorted {
        let result = scheduled_search(
            network,
            access,
            dep,
            max_rides,
            max_duration_seconds,
            walk_speed_mm_per_sec,
        )?;
        merged = Some(match merged {
            None => (*result).clone(),
            Some(mut acc) => {
                acc.min(&result);
                acc
            }
        });
    }

    merged
        .map(Rc::new)
        .ok_or_else(|| Error::InvalidTime(0))
}

fn scan_pattern(
    network: &TransitNetwork,
    pattern: PatternIndex,
    start_pos: usize,
    prev: &RaptorState,
    next: &mut RaptorState,
) -> Result<()> {
    if network.patterns[pattern].is_frequency_based {
        return Err(Error::UnsupportedFrequencyBoarding);
    }

    let stops = network.pattern_stops(pattern)?;
    let Some((mut trip_idx, board_pos)) =
        find_earliest_trip_at_stop(network, pattern, stops, &prev.best_times, start_pos)
    else {
        return Ok(());
    };

    let mut trip = network.trip(pattern, trip_idx)?;
    let mut board_stop = stops[board_pos];

    for (pos, &stop) in stops.iter().enumerate().skip(board_pos) {
        let earliest_board = prev.best_times[stop];
        if earliest_board != UNREACHED {
            let threshold = earliest_board.saturating_add(BOARD_SLACK);
            if threshold <= trip[pos].departure {
                if let Some(new_idx) = network.find_earliest_trip(pattern, pos, threshold) {
                    if new_idx != trip_idx {
                        trip_idx = new_idx;
                        trip = network.trip(pattern, trip_idx)?;
                        board_stop = stop;
                    }
                }
            }
        }

        let arrival = trip[pos].arrival;
        next.set_time_at_stop(stop, arrival, Some(pattern), Some(board_stop), false);
    }

    Ok(())
}

/// Binary-search the earliest trip boardable at or after
/// `prev_best_times[stop] + BOARD_SLACK` (inclusive — see the module
/// doc comment on the boundary resolution), scanning from `start_pos`
/// onward. Returns `(trip_idx, board_position)`.
fn find_earliest_trip_at_stop(
    network: &TransitNetwork,
    pattern: PatternIndex,
    stops: &[StopIndex],
    prev_best_times: &[Time],
    start_pos: usize,
) -> Option<(usize, usize)> {
    for (idx, &stop) in stops.iter().enumerate().skip(start_pos) {
        let earliest = prev_best_times[stop];
        if earliest == UNREACHED {
            continue;
        }
        let threshold = earliest.saturating_add(BOARD_SLACK);
        if let Some(trip_idx) = network.find_earliest_trip(pattern, idx, threshold) {
            return Some((trip_idx, idx));
        }
    }
    None
}

/// Every pattern serving a touched stop, paired with the earliest
/// stop position among its touched stops (so the scan can skip the
/// untouched prefix of the pattern).
pub(crate) fn create_pattern_queue(
    network: &TransitNetwork,
    touched: &FixedBitSet,
) -> Vec<(PatternIndex, usize)> {
    let mut best_pos: HashMap<PatternIndex, usize> = HashMap::new();
    for stop in touched.ones() {
        for &pattern in network.patterns_for_stop(stop) {
            let Ok(stops) = network.pattern_stops(pattern) else {
                continue;
            };
            if let Some(pos) = stops.iter().position(|&s| s == stop) {
                best_pos
                    .entry(pattern)
                    .and_modify(|existing| *existing = (*existing).min(pos))
                    .or_insert(pos);
            }
        }
    }
    best_pos.into_iter().collect()
}

/// Relax every transfer out of a stop touched by transit this round.
/// Walk time is `distance_millimeters / walk_speed_mm_per_sec`
/// truncating towards zero like the request's own
/// `transfer_seconds` helper.
fn relax_transfers(
    network: &TransitNetwork,
    state: &mut RaptorState,
    walk_speed_mm_per_sec: u32,
) -> Result<()> {
    let touched: Vec<StopIndex> = state.non_transfer_touched.ones().collect();
    for stop in touched {
        let board_time = state.best_times[stop];
        for transfer in network.stop_transfers(stop)? {
            let walk_seconds = transfer.distance_millimeters / walk_speed_mm_per_sec.max(1);
            let arrival = board_time.saturating_add(walk_seconds);
            state.set_time_at_stop(transfer.to_stop, arrival, None, Some(stop), true);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::{Pattern, Stop, StopTime, Transfer};

    /// Two stops, one pattern, one trip.
    fn two_stop_network(transfer_distance_mm: Option<u32>) -> TransitNetwork {
        let transfers = transfer_distance_mm
            .map(|s| {
                vec![Transfer {
                    to_stop: 2,
                    distance_millimeters: s,
                }]
            })
            .unwrap_or_default();
        let stops = if transfer_distance_mm.is_some() {
            vec![
                Stop {
                    transfers_start: 0,
                    transfers_len: 0,
                    patterns_start: 0,
                    patterns_len: 1,
                    targets_start: 0,
                    targets_len: 0,
                },
                Stop {
                    transfers_start: 0,
                    transfers_len: 1,
                    patterns_start: 1,
                    patterns_len: 1,
                    targets_start: 0,
                    targets_len: 0,
                },
                Stop {
                    transfers_start: 0,
                    transfers_len: 0,
                    patterns_start: 0,
                    patterns_len: 0,
                    targets_start: 0,
                    targets_len: 0,
                },
            ]
        } else {
            vec![
                Stop {
                    transfers_start: 0,
                    transfers_len: 0,
                    patterns_start: 0,
                    patterns_len: 1,
                    targets_start: 0,
                    targets_len: 0,
                },
                Stop {
                    transfers_start: 0,
                    transfers_len: 0,
                    patterns_start: 1,
                    patterns_len: 1,
                    targets_start: 0,
                    targets_len: 0,
                },
            ]
        };

        TransitNetwork {
            stops,
            pattern_stops: vec![0, 1],
            patterns: vec![Pattern {
                stops_start: 0,
                num_stops: 2,
                trips_start: 0,
                num_trips: 1,
                is_frequency_based: false,
            }],
            stop_times: vec![
                StopTime {
                    arrival: 8 * 3600,
                    departure: 8 * 3600,
                },
                StopTime {
                    arrival: 8 * 3600 + 600,
                    departure: 8 * 3600 + 600,
                },
            ],
            stop_patterns: vec![0, 0],
            transfers,
            stop_targets: vec![],
        }
    }

    // A nominal 1.3 m/s walk speed.
    const WALK_SPEED_MM_PER_SEC: u32 = 1300;

    #[test]
    fn scenario_1_two_stops_one_pattern_one_trip() {
        let network = two_stop_network(None);
        let departure = 7 * 3600 + 59 * 60;
        let state =
            scheduled_search(&network, &[(0, 0)], departure, 2, 7200, WALK_SPEED_MM_PER_SEC)
                .unwrap();

        // Round 1 is `current` after the loop breaks once nothing more is
        // touched; best_times[0] is carried from round 0 via `copy`.
        assert_eq!(state.best_times[0], departure);
        assert_eq!(state.best_non_transfer_times[1], 8 * 3600 + 10 * 60);
        assert_eq!(state.previous_patterns[1], Some(0));
        assert_eq!(state.previous_stop[1], Some(0));
    }

    #[test]
    fn scenario_2_board_slack_edge_case() {
        let network = two_stop_network(None);
        // Access seeds stop 0 at exactly the trip's departure time.
        let departure = 8 * 3600;
        let state =
            scheduled_search(&network, &[(0, 0)], departure, 2, 7200, WALK_SPEED_MM_PER_SEC)
                .unwrap();
        assert_eq!(state.best_non_transfer_times[1], UNREACHED);
    }

    #[test]
    fn scenario_3_transfer_only_improvement() {
        // 1300 mm at 1300 mm/s = 1 s.
        let network = two_stop_network(Some(1300));
        let departure = 8 * 3600 - 600; // arrives at stop 1 at 08:10:00
        let state =
            scheduled_search(&network, &[(0, 0)], departure, 2, 7200, WALK_SPEED_MM_PER_SEC)
                .unwrap();
        assert_eq!(state.best_times[2], 8 * 3600 + 10 * 60 + 1);
        assert_eq!(state.transfer_stop[2], Some(1));
        assert_eq!(state.best_non_transfer_times[2], UNREACHED);
    }

    /// T2: bestTimes is non-increasing across rounds of the same search.
    #[test]
    fn t2_best_times_non_increasing_across_rounds() {
        let network = two_stop_network(None);
        let departure = 7 * 3600 + 59 * 60;
        let round2 =
            scheduled_search(&network, &[(0, 0)], departure, 2, 7200, WALK_SPEED_MM_PER_SEC)
                .unwrap();
        let round1 = round2.previous.as_ref().unwrap();
        for stop in 0..network.num_stops() {
            assert!(round2.best_times[stop] <= round1.best_times[stop]);
        }
    }
}
