//! Deterministic departure-time sampler.
//!
//! Deliberately not built on the `rand` crate: the sampler's only
//! requirement is that the same seed reproduces the same departure
//! minutes, which a splitmix64-style hash mix gives without pulling in
//! an external PRNG dependency for one call site.

use crate::{Time, NUMBER_OF_SEARCHES};

/// A splitmix64-seeded sequence of departure minutes, walking
/// backwards from the end of the search window.
pub struct DepartureSampler {
    state: u64,
}

impl DepartureSampler {
    /// Seed from the origin coordinate: the latitude scaled by
    /// 1e9 and truncated to an integer.
    pub fn new(origin_latitude: f64) -> Self {
        let seed = (origin_latitude * 1e9) as i64 as u64;
        DepartureSampler { state: seed ^ 0x9E3779B97F4A7C15 }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E3779B97F4A7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }

    /// A value uniform in `[0, bound)`. Returns `0` for `bound == 0`.
    fn next_bounded(&mut self, bound: u64) -> u64 {
        if bound == 0 {
            0
        } else {
            self.next_u64() % bound
        }
    }

    /// Departure minutes from `to_time − 60` down to `from_time`,
    /// spaced by a random gap uniform in `[0, maxSamplingFrequency)`
    /// where `maxSamplingFrequency = 2 · (to_time − from_time) /
    /// NUMBER_OF_SEARCHES`. Produces roughly `NUMBER_OF_SEARCHES`
    /// samples.
    pub fn sample_departures(&mut self, from_time: Time, to_time: Time) -> Vec<Time> {
        let window = to_time.saturating_sub(from_time);
        let max_sampling_frequency =
            ((2 * window as u64) / NUMBER_OF_SEARCHES as u64).max(1);

        let mut departures = Vec::new();
        let mut t = to_time.saturating_sub(60);
        loop {
            if t < from_time {
                break;
            }
            departures.push(t);
            if t == from_time {
                break;
            }
            // At least one second of progress even when the sampled
            // gap is zero, so the walk always terminates.
            let gap = (self.next_bounded(max_sampling_frequency) as Time).max(1);
            t = t.saturating_sub(gap);
        }
        departures
    }
}
