//! McRAPTOR profile router: the main loop, per-round pattern scan, and
//! transfer relaxation.

use std::hash::{Hash, Hasher};
use std::rc::Rc;

use fixedbitset::FixedBitSet;
use hashbrown::HashMap;

use crate::dominance::{DominanceList, FareCalculator};
use crate::error::{Error, Result};
use crate::mcraptor::bag::Bag;
use crate::mcraptor::sampler::DepartureSampler;
use crate::mcraptor::state::{McRaptorState, PatternSeq, PRIMES};
use crate::model::network::TransitNetwork;
use crate::raptor::scheduled::create_pattern_queue;
use crate::request::Request;
use crate::{PatternIndex, StopIndex, Time, BOARD_SLACK};

/// One final candidate itinerary: the McRAPTOR state it egresses from,
/// plus the clock time at the destination after walking the egress leg.
#[derive(Debug, Clone)]
pub struct ProfileResult {
    pub state: Rc<McRaptorState>,
    pub arrival_time: Time,
}

/// Equates two on-board candidates by their full boarded-pattern
/// sequence (`patterns[]`), hashing by the cheap rolling `patternHash`
/// and falling back to the full sequence on a hash collision
/// to avoid visiting the same boarding sequence twice.
#[derive(Clone)]
struct StatePatternKey(u64, PatternSeq);

impl PartialEq for StatePatternKey {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 == other.1
    }
}
impl Eq for StatePatternKey {}
impl Hash for StatePatternKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

/// Run the full McRAPTOR profile search: sample departure minutes,
/// run one profile round-trip per sample, and aggregate every
/// sample's egress candidates.
pub fn mcraptor_search(
    network: &TransitNetwork,
    access: &[(StopIndex, Time)],
    egress: &[(StopIndex, Time)],
    request: &Request,
    origin_latitude: f64,
    fare_calculator: Option<Rc<dyn FareCalculator>>,
) -> Result<Vec<ProfileResult>> {
    for &(stop, _) in access.iter().chain(egress) {
        network.validate_stop(stop)?;
    }

    let mut sampler = DepartureSampler::new(origin_latitude);
    let departures = sampler.sample_departures(request.from_time, request.to_time);

    let mut results = Vec::new();
    for departure_time in departures {
        results.extend(search_one_departure(
            network,
            access,
            egress,
            request,
            departure_time,
            &fare_calculator,
        )?);
    }
    Ok(results)
}

fn new_bag(request: &Request, fare_calculator: &Option<Rc<dyn FareCalculator>>) -> Bag {
    match (request.max_fare, fare_calculator) {
        (Some(_), Some(calc)) => Bag::new(DominanceList::new_fare_pareto(Rc::clone(calc))),
        _ => Bag::new(DominanceList::new_suboptimal(request.suboptimal_seconds())),
    }
}

fn search_one_departure(
    network: &TransitNetwork,
    access: &[(StopIndex, Time)],
    egress: &[(StopIndex, Time)],
    request: &Request,
    departure_time: Time,
    fare_calculator: &Option<Rc<dyn FareCalculator>>,
) -> Result<Vec<ProfileResult>> {
    let mut bags: HashMap<StopIndex, Bag> = HashMap::new();
    let mut touched = FixedBitSet::with_capacity(network.num_stops());

    for &(stop, access_time) in access {
        let time = departure_time.saturating_add(access_time);
        let state = McRaptorState::access(stop, time);
        let bag = bags.entry(stop).or_insert_with(|| new_bag(request, fare_calculator));
        if bag.add(state) {
            touched.set(stop, true);
        }
    }

    let mut touched_patterns = create_pattern_queue(network, &touched);
    for round in 1..=request.max_rides {
        if touched_patterns.is_empty() {
            break;
        }

        let mut new_touched = FixedBitSet::with_capacity(network.num_stops());
        do_one_round(
            network,
            request,
            fare_calculator,
            round,
            &touched_patterns,
            &mut bags,
            &mut new_touched,
        )?;

        let transferred = do_transfers(network, request, fare_calculator, &mut bags, &new_touched, round)?;
        new_touched.union_with(&transferred);

        if new_touched.count_ones(..) == 0 {
            break;
        }
        touched = new_touched;
        touched_patterns = create_pattern_queue(network, &touched);
    }

    let mut results = Vec::new();
    for &(stop, egress_time) in egress {
        if let Some(bag) = bags.get_mut(&stop) {
            for s in bag.non_dominated_states() {
                if !s.is_transfer() {
                    results.push(ProfileResult {
                        state: Rc::clone(s),
                        arrival_time: s.time.saturating_add(egress_time),
                    });
                }
            }
        }
    }
    Ok(results)
}

/// One round of `doOneRound`: for every touched
/// pattern, walk its stops alighting currently on-board candidates and
/// boarding newly eligible ones.
fn do_one_round(
    network: &TransitNetwork,
    request: &Request,
    fare_calculator: &Option<Rc<dyn FareCalculator>>,
    round: usize,
    touched_patterns: &[(PatternIndex, usize)],
    bags: &mut HashMap<StopIndex, Bag>,
    new_touched: &mut FixedBitSet,
) -> Result<()> {
    for &(pattern, start_pos) in touched_patterns {
        if network.patterns[pattern].is_frequency_based {
            return Err(Error::UnsupportedFrequencyBoarding);
        }
        let stops = network.pattern_stops(pattern)?;
        let mut on_board: HashMap<StatePatternKey, (Rc<McRaptorState>, usize)> = HashMap::new();

        for (pos, &stop) in stops.iter().enumerate().skip(start_pos) {
            // Alight every rider currently on board this pattern.
            let riders: Vec<(Rc<McRaptorState>, usize)> = on_board
                .values()
                .map(|(s, t)| (Rc::clone(s), *t))
                .collect();
            for (board_state, trip_idx) in riders {
                let trip = network.trip(pattern, trip_idx)?;
                let arrival = trip[pos].arrival;
                if arrival > request.hard_cutoff() {
                    continue;
                }
                let new_state =
                    McRaptorState::board(&board_state, stop, arrival, pattern, trip_idx, round)?;
                let bag = bags
                    .entry(stop)
                    .or_insert_with(|| new_bag(request, fare_calculator));
                if bag.add(new_state) {
                    new_touched.set(stop, true);
                }
            }

            // Board anyone from the prior round still eligible for this pattern.
            if let Some(bag) = bags.get_mut(&stop) {
                for s in bag.states_at_round(round - 1) {
                    if s.patterns.last() == Some(pattern) {
                        continue;
                    }
                    let threshold = s.time.saturating_add(BOARD_SLACK);
                    if let Some(trip_idx) = network.find_earliest_trip(pattern, pos, threshold) {
                        let new_seq = s.patterns.push(pattern);
                        let prime = PRIMES[round % PRIMES.len()];
                        let new_hash =
                            s.pattern_hash.wrapping_add((pattern as u64).wrapping_mul(prime));
                        let key = StatePatternKey(new_hash, new_seq);
                        on_board
                            .entry(key)
                            .and_modify(|(existing_state, existing_trip)| {
                                if trip_idx < *existing_trip {
                                    *existing_state = Rc::clone(&s);
                                    *existing_trip = trip_idx;
                                }
                            })
                            .or_insert((Rc::clone(&s), trip_idx));
                    }
                }
            }
        }
    }
    Ok(())
}

/// `doTransfers()`: relax every outgoing transfer from stops touched
/// this round's non-transfer (alighting) states. Returns the set of
/// stops newly touched by a transfer.
fn do_transfers(
    network: &TransitNetwork,
    request: &Request,
    fare_calculator: &Option<Rc<dyn FareCalculator>>,
    bags: &mut HashMap<StopIndex, Bag>,
    touched: &FixedBitSet,
    round: usize,
) -> Result<FixedBitSet> {
    let mut extra = FixedBitSet::with_capacity(network.num_stops());
    for stop in touched.ones() {
        let riders: Vec<Rc<McRaptorState>> = match bags.get_mut(&stop) {
            Some(bag) => bag
                .non_dominated_states()
                .iter()
                .filter(|s| !s.is_transfer() && s.round == round)
                .cloned()
                .collect(),
            None => continue,
        };
        for rider in riders {
            for transfer in network.stop_transfers(stop)? {
                let arrival = rider
                    .time
                    .saturating_add(request.transfer_seconds(transfer.distance_millimeters));
                if arrival > request.hard_cutoff() {
                    continue;
                }
                let new_state = McRaptorState::transfer(&rider, transfer.to_stop, arrival)?;
                let bag = bags
                    .entry(transfer.to_stop)
                    .or_insert_with(|| new_bag(request, fare_calculator));
                if bag.add(new_state) {
                    extra.set(transfer.to_stop, true);
                }
            }
        }
    }
    Ok(extra)
}
