//! Fare-pareto dominating list.

use std::rc::Rc;

use crate::mcraptor::state::McRaptorState;
use crate::Time;

/// Computes the fare of a state from its back-pointer chain.
///
/// Contract (enforced by callers, not by this trait): the result is
/// non-negative and monotonically non-decreasing as legs are appended
/// to a state's history.
pub trait FareCalculator {
    fn calculate_fare(&self, state: &Rc<McRaptorState>) -> i64;
}

/// Retains states pareto-optimal on `(time, fare)`.
#[derive(Debug, Default)]
pub struct FareParetoList {
    states: Vec<(Rc<McRaptorState>, i64)>,
    /// Lazily rebuilt on `non_dominated_states` so that accessor can
    /// return the same `&[Rc<McRaptorState>]` shape as `SuboptimalList`.
    cache: Vec<Rc<McRaptorState>>,
}

impl FareParetoList {
    pub fn new() -> Self {
        FareParetoList {
            states: Vec::new(),
            cache: Vec::new(),
        }
    }

    /// Attempt to add `new_state` with precomputed `fare`. Returns
    /// `true` if retained.
    pub fn add(&mut self, new_state: Rc<McRaptorState>, fare: i64) -> bool {
        for (other_state, other_fare) in &self.states {
            if other_state.time <= new_state.time && *other_fare <= fare {
                return false;
            }
        }
        self.states
            .retain(|(other_state, other_fare)| {
                !(other_state.time >= new_state.time && *other_fare >= fare)
            });
        self.states.push((new_state, fare));
        true
    }

    pub fn non_dominated_states(&mut self) -> &[Rc<McRaptorState>] {
        self.cache.clear();
        self.cache.extend(self.states.iter().map(|(s, _)| Rc::clone(s)));
        &self.cache
    }

    pub fn states_with_fares(&self) -> &[(Rc<McRaptorState>, i64)] {
        &self.states
    }
}
