//! Trace events emitted by the engine's diner threads.

use std::time::Duration;

use crate::activity::Activity;
use crate::id::DinerId;

/// One observed activity transition, as reported by a diner thread.
///
/// Events flow over a bounded channel from the diner threads to
/// whoever holds the receiver (typically the driver, for printing or
/// assertions). Delivery is best-effort: if the channel is full the
/// event is dropped and counted in the final
/// run report rather than blocking the diner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceEvent {
    /// The diner that transitioned.
    pub diner: DinerId,
    /// The activity it transitioned into.
    pub activity: Activity,
    /// The diner's meal count at the time of the transition.
    pub meals: u64,
    /// Time since the run started.
    pub elapsed: Duration,
}
