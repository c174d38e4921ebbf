//! Error types for the Refectory dining simulation.
//!
//! Two families: [`AdmissionError`] from the table's admission path,
//! and [`ConfigError`] from driver startup. Contract violations
//! (out-of-range seat indices, degenerate tables) are not errors —
//! they panic, per the fail-fast policy of a single-process
//! concurrency core.

use std::error::Error;
use std::fmt;

/// Errors from [`request_admission`] on the table.
///
/// Blocking on a fork is the expected wait discipline, not a failure;
/// the only failure the admission path can report is that the table
/// was closed out from under the caller.
///
/// [`request_admission`]: https://docs.rs/refectory-table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdmissionError {
    /// The table was closed while the caller was hungry or waiting
    /// for its forks. Any fork already granted has been returned.
    Closed,
}

impl fmt::Display for AdmissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "table closed while waiting for admission"),
        }
    }
}

impl Error for AdmissionError {}

/// Errors detected during run-configuration validation, before any
/// diner thread starts.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Fewer than two seats. A one-seat ring makes the diner its own
    /// neighbor and aliases both forks to the same fork.
    TooFewSeats {
        /// The configured seat count.
        configured: usize,
    },
    /// A duration range has `min > max` or a zero `max`.
    EmptyDuration {
        /// Which range was invalid (`"think"` or `"eat"`).
        which: &'static str,
    },
    /// The configured runtime is zero.
    ZeroRuntime,
    /// The trace channel capacity is zero.
    TraceCapacityZero,
    /// A diner thread could not be spawned.
    ThreadSpawnFailed {
        /// The seat whose thread failed to spawn.
        seat: usize,
        /// The OS error message.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewSeats { configured } => {
                write!(f, "at least 2 seats required, got {configured}")
            }
            Self::EmptyDuration { which } => {
                write!(f, "{which} duration range is empty or zero")
            }
            Self::ZeroRuntime => write!(f, "runtime must be non-zero"),
            Self::TraceCapacityZero => write!(f, "trace channel capacity must be non-zero"),
            Self::ThreadSpawnFailed { seat, reason } => {
                write!(f, "could not spawn diner thread for seat {seat}: {reason}")
            }
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_stable() {
        assert_eq!(
            AdmissionError::Closed.to_string(),
            "table closed while waiting for admission"
        );
        assert_eq!(
            ConfigError::TooFewSeats { configured: 1 }.to_string(),
            "at least 2 seats required, got 1"
        );
    }
}
