//! The per-seat diner loop.
//!
//! One `DinerLoop` is moved into each spawned thread (no shared
//! mutable state beyond the `Arc<Table>` and the shutdown flag) and
//! runs until the flag is set or the table closes under it.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use crossbeam_channel::Sender;
use rand_chacha::ChaCha8Rng;

use refectory_core::{Activity, DinerId, TraceEvent};
use refectory_table::Table;

use crate::config::DurationRange;

pub(crate) struct DinerLoop {
    pub id: DinerId,
    pub table: Arc<Table>,
    pub shutdown: Arc<AtomicBool>,
    pub trace: Sender<TraceEvent>,
    pub dropped: Arc<AtomicU64>,
    pub rng: ChaCha8Rng,
    pub think: DurationRange,
    pub eat: DurationRange,
    pub started: Instant,
}

impl DinerLoop {
    /// Cycle think → hungry → eat until shutdown.
    ///
    /// The shutdown flag is checked at the loop boundaries; a diner
    /// blocked waiting for forks is released by the table's `close()`
    /// instead, so teardown never waits on an admission that will not
    /// come.
    pub(crate) fn run(mut self) {
        let mut meals = 0u64;
        loop {
            self.emit(Activity::Thinking, meals);
            thread::sleep(self.think.sample(&mut self.rng));
            if self.shutdown.load(Ordering::Acquire) {
                break;
            }

            self.emit(Activity::Hungry, meals);
            if self.table.request_admission(self.id).is_err() {
                // Table closed while we were hungry.
                break;
            }

            self.emit(Activity::Eating, meals);
            thread::sleep(self.eat.sample(&mut self.rng));
            self.table.release_after_meal(self.id);
            meals += 1;

            if self.shutdown.load(Ordering::Acquire) {
                break;
            }
        }
        log::debug!("diner {} stopping after {meals} meals", self.id);
    }

    /// Best-effort trace emission: a full channel drops the event and
    /// bumps the shared counter rather than stalling the diner.
    fn emit(&self, activity: Activity, meals: u64) {
        let event = TraceEvent {
            diner: self.id,
            activity,
            meals,
            elapsed: self.started.elapsed(),
        };
        if self.trace.try_send(event).is_err() {
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
    }
}
