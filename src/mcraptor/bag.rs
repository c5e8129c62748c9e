//! Per-stop McRAPTOR bag: a dominating list of
//! states at one stop, queried by round for boarding and by dominance
//! for egress/final output.

use std::rc::Rc;

use crate::dominance::DominanceList;
use crate::mcraptor::state::McRaptorState;

/// A stop's collection of non-dominated profile-routing states.
///
/// The bag does not physically partition transfer-ended from
/// vehicle-alighting states (both are governed by the same dominance
/// rule); instead callers filter the dominance-pruned set by `round`
/// when looking for board candidates, and by
/// [`McRaptorState::is_transfer`] when looking for egress candidates,
/// exactly as `doOneRound`'s board step and the main loop's egress
/// step each describe their own filter.
pub struct Bag {
    dominance: DominanceList,
}

impl Bag {
    pub fn new(dominance: DominanceList) -> Self {
        Bag { dominance }
    }

    /// Attempt to add `state`. Returns `true` if retained.
    pub fn add(&mut self, state: Rc<McRaptorState>) -> bool {
        self.dominance.add(state)
    }

    /// All non-dominated states at this stop.
    pub fn non_dominated_states(&mut self) -> &[Rc<McRaptorState>] {
        self.dominance.non_dominated_states()
    }

    /// Non-dominated states from exactly `round` (the board-feeder
    /// set for round `round + 1`).
    pub fn states_at_round(&mut self, round: usize) -> Vec<Rc<McRaptorState>> {
        self.non_dominated_states()
            .iter()
            .filter(|s| s.round == round)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcraptor::state::PatternSeq;

    fn state(time: crate::Time, round: usize) -> Rc<McRaptorState> {
        Rc::new(McRaptorState {
            back: None,
            time,
            pattern: None,
            trip: None,
            stop: 0,
            round,
            patterns: PatternSeq::empty(),
            pattern_hash: 0,
        })
    }

    #[test]
    fn states_at_round_filters_by_round() {
        let mut bag = Bag::new(DominanceList::new_suboptimal(300));
        bag.add(state(600, 0));
        bag.add(state(650, 1));
        let round0: Vec<_> = bag.states_at_round(0).iter().map(|s| s.time).collect();
        assert_eq!(round0, vec![600]);
    }
}
