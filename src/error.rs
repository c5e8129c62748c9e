//! Error taxonomy for the core.
//!
//! Recoverable rejections (a state dominated, a duration cap exceeded,
//! a stop with no bag) are represented in-band as `bool`/`Option`
//! returns throughout this crate and never constructed as an [`Error`].
//! Only programmer errors and unsupported configurations reach here.

use thiserror::Error as ThisError;

use crate::{PatternIndex, StopIndex};

#[derive(ThisError, Debug, PartialEq, Eq, Clone)]
pub enum Error {
    #[error("invalid stop index {0}")]
    InvalidStop(StopIndex),

    #[error("invalid pattern index {0}")]
    InvalidPattern(PatternIndex),

    #[error("invalid trip index {0} on pattern {1}")]
    InvalidTrip(usize, PatternIndex),

    #[error("departure time {0} exceeds the maximum representable service-day time")]
    InvalidTime(u32),

    #[error("timer '{0}' was already running")]
    TimerAlreadyStarted(String),

    #[error("timer '{0}' is not running")]
    TimerNotRunning(String),

    #[error("back-pointer time decreased: predecessor at {predecessor} is later than {state}")]
    BackpointerRegression { predecessor: u32, state: u32 },

    #[error("no transfer found between stop {from} and stop {to} during path reconstruction")]
    MissingTransfer { from: StopIndex, to: StopIndex },

    #[error("access or egress time missing for stop {0} during path reconstruction")]
    MissingAccessEgressTime(StopIndex),

    #[error("frequency-based boarding is not supported by this scheduled-only core")]
    UnsupportedFrequencyBoarding,
}

pub type Result<T> = std::result::Result<T, Error>;
