//! Per-fork grant signal.
//!
//! A fork is a binary resource whose contention is resolved under the
//! table mutex. The signal here only hands the fork over: `grant()`
//! is called while the table mutex is held, `acquire()` blocks outside
//! it until the grant arrives (or the table closes).
//!
//! A fork sits between two seats, and both may be parked on it at
//! once, so every grant carries the seat it was decided for and
//! `acquire` only consumes a grant addressed to the caller. An
//! unaddressed hand-off would let a still-hungry diner swallow the
//! grant its just-admitted neighbor is owed, wedging both.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Condvar, Mutex};

use refectory_core::AdmissionError;

/// Availability signal for one fork, addressed to a single grantee.
///
/// Lock ordering: the table mutex is always taken before a fork's own
/// mutex, never the other way around, so the two domains cannot
/// deadlock against each other.
pub(crate) struct ForkSignal {
    granted: Mutex<Option<usize>>,
    available: Condvar,
}

impl ForkSignal {
    /// A fork with no pending grant. Nothing may take it until the
    /// protocol grants it.
    pub(crate) fn new() -> Self {
        Self {
            granted: Mutex::new(None),
            available: Condvar::new(),
        }
    }

    /// Raise a grant addressed to `seat` and wake the waiters.
    ///
    /// Caller must hold the table mutex; a grant is only ever the
    /// outcome of the admission predicate. Granting a fork that
    /// already has a grant pending would mean two admissions share
    /// it, which the predicate rules out.
    ///
    /// Wakes every waiter: the fork's other neighbor may be parked
    /// here too, and it must re-check and go back to sleep rather
    /// than stay parked past a wakeup meant for the grantee.
    pub(crate) fn grant(&self, seat: usize) {
        let mut granted = self.granted.lock().unwrap();
        debug_assert!(
            granted.is_none(),
            "fork granted while a grant is pending"
        );
        *granted = Some(seat);
        self.available.notify_all();
    }

    /// Clear a pending grant addressed to `seat`, if any. A grant
    /// addressed to the other neighbor is left alone.
    ///
    /// Used when an admission is aborted at close: the grant may have
    /// been raised before the waiter gave up. Caller must hold the
    /// table mutex.
    pub(crate) fn revoke(&self, seat: usize) {
        let mut granted = self.granted.lock().unwrap();
        if *granted == Some(seat) {
            *granted = None;
        }
    }

    /// Block until the fork is granted to `seat`, consuming the grant.
    ///
    /// Returns [`AdmissionError::Closed`] if `closed` is observed
    /// while no grant addressed to `seat` is pending. A grant that was
    /// raised before the close is still consumed normally — the
    /// admission it belongs to already happened.
    pub(crate) fn acquire(&self, seat: usize, closed: &AtomicBool) -> Result<(), AdmissionError> {
        let mut granted = self.granted.lock().unwrap();
        loop {
            if *granted == Some(seat) {
                *granted = None;
                return Ok(());
            }
            if closed.load(Ordering::Acquire) {
                return Err(AdmissionError::Closed);
            }
            granted = self.available.wait(granted).unwrap();
        }
    }

    /// Wake any waiter so it can observe the closed flag.
    ///
    /// Takes the fork mutex briefly: a waiter is then either already
    /// inside `wait()` (and receives the notification) or has not yet
    /// checked the flag (and will see it set). No missed-wakeup
    /// window.
    pub(crate) fn wake_for_close(&self) {
        let _granted = self.granted.lock().unwrap();
        self.available.notify_all();
    }
}
