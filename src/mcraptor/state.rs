//! McRAPTOR per-state record and the persistent pattern-sequence used
//! to deduplicate boarding sequences.

use std::rc::Rc;

use crate::error::{Error, Result};
use crate::{PatternIndex, StopIndex, Time, TripIndex};

/// Large primes indexed by round, used to roll `pattern_hash` forward
/// on each boarding. Order-sensitive by round
/// so that boarding the same two patterns in a different order hashes
/// differently.
pub const PRIMES: [u64; 20] = [
    2_147_483_647,
    2_147_483_629,
    2_147_483_587,
    2_147_483_579,
    2_147_483_563,
    2_147_483_549,
    2_147_483_543,
    2_147_483_497,
    2_147_483_489,
    2_147_483_477,
    2_147_483_423,
    2_147_483_399,
    2_147_483_353,
    2_147_483_323,
    2_147_483_269,
    2_147_483_249,
    2_147_483_213,
    2_147_483_203,
    2_147_483_137,
    2_147_483_123,
];

/// A persistent (structurally shared) sequence of boarded patterns,
/// used both to equate two states' full boarding sequences
/// (`StatePatternKey`, see `super::router`) and to reconstruct how a
/// state came to be.
#[derive(Clone, Debug, Default)]
pub struct PatternSeq(Option<Rc<PatternSeqNode>>);

#[derive(Debug)]
struct PatternSeqNode {
    pattern: PatternIndex,
    prev: PatternSeq,
    len: usize,
}

impl PatternSeq {
    pub fn empty() -> Self {
        PatternSeq(None)
    }

    pub fn len(&self) -> usize {
        self.0.as_ref().map_or(0, |n| n.len)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Append `pattern`, returning the extended sequence. `self` is
    /// left unmodified (other states sharing its tail are unaffected).
    pub fn push(&self, pattern: PatternIndex) -> Self {
        PatternSeq(Some(Rc::new(PatternSeqNode {
            pattern,
            prev: self.clone(),
            len: self.len() + 1,
        })))
    }

    /// The most recently boarded pattern, if any. O(1): used to reject
    /// no-op reboarding without materializing the full sequence.
    pub fn last(&self) -> Option<PatternIndex> {
        self.0.as_ref().map(|n| n.pattern)
    }

    pub fn to_vec(&self) -> Vec<PatternIndex> {
        let mut out = Vec::with_capacity(self.len());
        let mut cur = self.0.clone();
        while let Some(node) = cur {
            out.push(node.pattern);
            cur = node.prev.0.clone();
        }
        out.reverse();
        out
    }
}

impl PartialEq for PatternSeq {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.to_vec() == other.to_vec()
    }
}

impl Eq for PatternSeq {}

/// A single McRAPTOR state: either an access/egress/transfer endpoint
/// (`pattern = None`) or the result of alighting a vehicle.
#[derive(Debug, Clone)]
pub struct McRaptorState {
    pub back: Option<Rc<McRaptorState>>,
    pub time: Time,
    pub pattern: Option<PatternIndex>,
    pub trip: Option<TripIndex>,
    pub stop: StopIndex,
    pub round: usize,
    pub patterns: PatternSeq,
    pub pattern_hash: u64,
}

impl McRaptorState {
    /// The state seeded at an access stop (round 0, no back-pointer).
    pub fn access(stop: StopIndex, time: Time) -> Rc<Self> {
        Rc::new(McRaptorState {
            back: None,
            time,
            pattern: None,
            trip: None,
            stop,
            round: 0,
            patterns: PatternSeq::empty(),
            pattern_hash: 0,
        })
    }

    /// The state produced by alighting `pattern`'s trip `trip` at
    /// `stop`, boarded from `back`.
    ///
    /// Fails if `time` is earlier than `back.time`: a monotonicity
    /// violation that can only mean a corrupted or non-FIFO network,
    /// never a legitimate candidate to discard quietly.
    pub fn board(
        back: &Rc<McRaptorState>,
        stop: StopIndex,
        time: Time,
        pattern: PatternIndex,
        trip: TripIndex,
        round: usize,
    ) -> Result<Rc<Self>> {
        if time < back.time {
            return Err(Error::BackpointerRegression { predecessor: back.time, state: time });
        }
        let prime = PRIMES[round % PRIMES.len()];
        let pattern_hash = back
            .pattern_hash
            .wrapping_add((pattern as u64).wrapping_mul(prime));
        Ok(Rc::new(McRaptorState {
            back: Some(Rc::clone(back)),
            time,
            pattern: Some(pattern),
            trip: Some(trip),
            stop,
            round,
            patterns: back.patterns.push(pattern),
            pattern_hash,
        }))
    }

    /// The state produced by walking a transfer out of `back`. Round
    /// and pattern sequence are unchanged: a transfer does not count
    /// as a ride.
    ///
    /// Fails under the same monotonicity violation as [`Self::board`].
    pub fn transfer(back: &Rc<McRaptorState>, stop: StopIndex, time: Time) -> Result<Rc<Self>> {
        if time < back.time {
            return Err(Error::BackpointerRegression { predecessor: back.time, state: time });
        }
        Ok(Rc::new(McRaptorState {
            back: Some(Rc::clone(back)),
            time,
            pattern: None,
            trip: None,
            stop,
            round: back.round,
            patterns: back.patterns.clone(),
            pattern_hash: back.pattern_hash,
        }))
    }

    /// Whether this state ends in a transfer (or is the original
    /// access state) rather than a vehicle alighting.
    pub fn is_transfer(&self) -> bool {
        self.pattern.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_sequences_with_same_elements_are_equal() {
        let a = PatternSeq::empty().push(1).push(2);
        let b = PatternSeq::empty().push(1).push(2);
        assert_eq!(a, b);
        assert_eq!(a.to_vec(), vec![1, 2]);
    }

    #[test]
    fn pattern_sequences_differing_in_order_are_not_equal() {
        let a = PatternSeq::empty().push(1).push(2);
        let b = PatternSeq::empty().push(2).push(1);
        assert_ne!(a, b);
    }

    #[test]
    fn transfer_preserves_round_and_pattern_hash() {
        let access = McRaptorState::access(0, 100);
        let boarded = McRaptorState::board(&access, 1, 200, 7, 0, 1).unwrap();
        let transferred = McRaptorState::transfer(&boarded, 2, 205).unwrap();
        assert_eq!(transferred.round, boarded.round);
        assert_eq!(transferred.pattern_hash, boarded.pattern_hash);
        assert!(transferred.is_transfer());
    }

    #[test]
    fn board_rejects_a_time_earlier_than_its_predecessor() {
        let access = McRaptorState::access(0, 300);
        let err = McRaptorState::board(&access, 1, 250, 7, 0, 1).unwrap_err();
        assert_eq!(err, Error::BackpointerRegression { predecessor: 300, state: 250 });
    }

    #[test]
    fn transfer_rejects_a_time_earlier_than_its_predecessor() {
        let access = McRaptorState::access(0, 300);
        let boarded = McRaptorState::board(&access, 1, 400, 7, 0, 1).unwrap();
        let err = McRaptorState::transfer(&boarded, 2, 390).unwrap_err();
        assert_eq!(err, Error::BackpointerRegression { predecessor: 400, state: 390 });
    }
}
