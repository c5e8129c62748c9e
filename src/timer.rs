//! Nested execution-timer tree for instrumentation.
//!
//! Purely instrumentational: nothing here affects search correctness.
//! Each request owns its own tree (no global registry), so the timers
//! are naturally request-local.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::error::{Error, Result};

/// A single named timer, optionally parented under another.
#[derive(Debug)]
pub struct ExecutionTimer {
    name: String,
    running_since: Option<Instant>,
    accumulated: Duration,
    children: Vec<Rc<RefCell<ExecutionTimer>>>,
}

impl ExecutionTimer {
    pub fn new(name: impl Into<String>) -> Self {
        ExecutionTimer {
            name: name.into(),
            running_since: None,
            accumulated: Duration::ZERO,
            children: Vec::new(),
        }
    }

    /// Start timing. Errors if already running.
    pub fn start(&mut self) -> Result<()> {
        if self.running_since.is_some() {
            return Err(Error::TimerAlreadyStarted(self.name.clone()));
        }
        self.running_since = Some(Instant::now());
        Ok(())
    }

    /// Stop timing, adding the elapsed duration to the accumulated
    /// total. Errors if not running.
    pub fn stop(&mut self) -> Result<()> {
        let started = self
            .running_since
            .take()
            .ok_or_else(|| Error::TimerNotRunning(self.name.clone()))?;
        self.accumulated += started.elapsed();
        Ok(())
    }

    pub fn accumulated_duration(&self) -> Duration {
        self.accumulated
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Create and attach a child timer.
    pub fn child(&mut self, name: impl Into<String>) -> Rc<RefCell<ExecutionTimer>> {
        let child = Rc::new(RefCell::new(ExecutionTimer::new(name)));
        self.children.push(Rc::clone(&child));
        child
    }

    /// Log this timer's accumulated duration, each child's share, and
    /// an "other" remainder (`self - sum(children)`), recursing into
    /// children.
    pub fn log_report(&self) {
        self.log_report_at_depth(0);
    }

    fn log_report_at_depth(&self, depth: usize) {
        let indent = "  ".repeat(depth);
        log::debug!("{indent}{}: {:?}", self.name, self.accumulated);

        let children_total: Duration = self
            .children
            .iter()
            .map(|c| c.borrow().accumulated)
            .sum();
        for child in &self.children {
            child.borrow().log_report_at_depth(depth + 1);
        }
        if !self.children.is_empty() {
            let other = self.accumulated.saturating_sub(children_total);
            log::debug!("{indent}  other: {other:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_twice_is_rejected() {
        let mut t = ExecutionTimer::new("search");
        t.start().unwrap();
        assert_eq!(
            t.start(),
            Err(Error::TimerAlreadyStarted("search".to_string()))
        );
    }

    #[test]
    fn stopping_without_starting_is_rejected() {
        let mut t = ExecutionTimer::new("search");
        assert_eq!(
            t.stop(),
            Err(Error::TimerNotRunning("search".to_string()))
        );
    }

    #[test]
    fn accumulates_across_start_stop_cycles() {
        let mut t = ExecutionTimer::new("search");
        t.start().unwrap();
        t.stop().unwrap();
        let first = t.accumulated_duration();
        t.start().unwrap();
        t.stop().unwrap();
        assert!(t.accumulated_duration() >= first);
    }

    #[test]
    fn child_is_independently_timed() {
        let mut parent = ExecutionTimer::new("round");
        let child = parent.child("scan");
        child.borrow_mut().start().unwrap();
        child.borrow_mut().stop().unwrap();
        assert_eq!(parent.children.len(), 1);
    }
}
