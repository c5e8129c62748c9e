//! Suboptimal-budget dominating list.

use std::rc::Rc;

use crate::mcraptor::state::McRaptorState;
use crate::Time;

/// Retains every state within `suboptimal_seconds` of the best
/// observed arrival time, except states strictly dominated by an
/// earlier-round state at the same-or-better time.
#[derive(Debug)]
pub struct SuboptimalList {
    suboptimal_seconds: Time,
    best_time: Time,
    states: Vec<Rc<McRaptorState>>,
}

impl SuboptimalList {
    pub fn new(suboptimal_seconds: Time) -> Self {
        SuboptimalList {
            suboptimal_seconds,
            best_time: Time::MAX,
            states: Vec::new(),
        }
    }

    /// Attempt to add `new_state`. Returns `true` if retained.
    pub fn add(&mut self, new_state: Rc<McRaptorState>) -> bool {
        if self.best_time != Time::MAX
            && self
                .best_time
                .saturating_add(self.suboptimal_seconds)
                < new_state.time
        {
            return false;
        }

        for existing in &self.states {
            if existing.round < new_state.round && existing.time <= new_state.time {
                return false;
            }
        }

        self.best_time = self.best_time.min(new_state.time);
        self.states.push(new_state);
        true
    }

    /// Remove any state whose time now exceeds the (possibly since
    /// improved) best time plus the sub-optimality budget.
    pub fn prune(&mut self) {
        let threshold = self.best_time.saturating_add(self.suboptimal_seconds);
        self.states.retain(|s| s.time < threshold);
    }

    pub fn non_dominated_states(&mut self) -> &[Rc<McRaptorState>] {
        self.prune();
        &self.states
    }
}
