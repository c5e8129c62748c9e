//! DominatingList variants: containers of states
//! at one location that accept new states and prune dominated ones
//! according to a chosen criterion set.
//!
//! The two variants are modeled as a tagged enum rather than a trait
//! object hierarchy: the choice is made once,
//! per request, by the caller, and the two `add` signatures differ
//! only in whether a fare lookup accompanies the state.

pub mod fare;
pub mod suboptimal;

pub use fare::{FareCalculator, FareParetoList};
pub use suboptimal::SuboptimalList;

use std::rc::Rc;

use crate::mcraptor::state::McRaptorState;

/// The two dominance strategies a request may select between.
pub enum DominanceList {
    Suboptimal(SuboptimalList),
    FarePareto(FareParetoList, Rc<dyn FareCalculator>),
}

impl DominanceList {
    pub fn new_suboptimal(suboptimal_seconds: u32) -> Self {
        DominanceList::Suboptimal(SuboptimalList::new(suboptimal_seconds))
    }

    pub fn new_fare_pareto(fare_calculator: Rc<dyn FareCalculator>) -> Self {
        DominanceList::FarePareto(FareParetoList::new(), fare_calculator)
    }

    /// Attempt to add `state`, returning `true` if it was retained as
    /// non-dominated.
    pub fn add(&mut self, state: Rc<McRaptorState>) -> bool {
        match self {
            DominanceList::Suboptimal(list) => list.add(state),
            DominanceList::FarePareto(list, calc) => {
                let fare = calc.calculate_fare(&state);
                list.add(state, fare)
            }
        }
    }

    pub fn non_dominated_states(&mut self) -> &[Rc<McRaptorState>] {
        match self {
            DominanceList::Suboptimal(list) => list.non_dominated_states(),
            DominanceList::FarePareto(list, _) => list.non_dominated_states(),
        }
    }
}
