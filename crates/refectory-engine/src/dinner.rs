//! The running dinner: thread lifecycle, teardown, and the final
//! report.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use refectory_core::{ConfigError, DinerId, TraceEvent};
use refectory_table::Table;

use crate::config::RunConfig;
use crate::diner::DinerLoop;

// ── RunReport ───────────────────────────────────────────────────

/// Summary of a completed run, produced by
/// [`Dinner::shutdown`].
#[derive(Clone, Debug)]
pub struct RunReport {
    /// Meals eaten per seat, read after every diner stopped.
    pub meals: Vec<u64>,
    /// Sum of all meal counters.
    pub total_meals: u64,
    /// Wall-clock time from serve to the end of teardown.
    pub elapsed: Duration,
    /// Diner threads joined cleanly. Anything less than the seat
    /// count means a diner panicked.
    pub diners_joined: usize,
    /// Trace events dropped because the channel was full.
    pub events_dropped: u64,
}

// ── Dinner ──────────────────────────────────────────────────────

/// A dinner in progress: the table plus one running thread per seat.
///
/// Create with [`serve`](Dinner::serve), observe transitions through
/// [`events`](Dinner::events), stop with
/// [`shutdown`](Dinner::shutdown) — or use [`run`](Dinner::run) for
/// the whole serve → wait → shutdown sequence. Dropping a `Dinner`
/// without calling `shutdown` performs the same teardown so diner
/// threads are never leaked.
///
/// # Teardown sequence
///
/// 1. set the shutdown flag (diners stop at their next loop boundary),
/// 2. close the table (diners blocked waiting for forks abort),
/// 3. join every diner thread,
/// 4. read the meal counters — no concurrent writers remain.
pub struct Dinner {
    table: Arc<Table>,
    shutdown: Arc<AtomicBool>,
    dropped: Arc<AtomicU64>,
    trace_rx: Option<Receiver<TraceEvent>>,
    threads: Vec<JoinHandle<()>>,
    started: Instant,
}

impl Dinner {
    /// Validate `config`, set the table, and start one diner thread
    /// per seat.
    ///
    /// On a thread-spawn failure the already-started diners are torn
    /// down before the error is returned; no partial dinner escapes.
    pub fn serve(config: RunConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let table = Arc::new(Table::new(config.seats));
        let shutdown = Arc::new(AtomicBool::new(false));
        let dropped = Arc::new(AtomicU64::new(0));
        let (trace_tx, trace_rx) = crossbeam_channel::bounded(config.trace_capacity);
        let started = Instant::now();

        let mut dinner = Self {
            table: Arc::clone(&table),
            shutdown: Arc::clone(&shutdown),
            dropped: Arc::clone(&dropped),
            trace_rx: Some(trace_rx),
            threads: Vec::with_capacity(config.seats),
            started,
        };

        for seat in 0..config.seats {
            let diner = DinerLoop {
                id: DinerId::from(seat),
                table: Arc::clone(&table),
                shutdown: Arc::clone(&shutdown),
                trace: trace_tx.clone(),
                dropped: Arc::clone(&dropped),
                // Distinct stream per seat, reproducible per config.
                rng: ChaCha8Rng::seed_from_u64(config.seed.wrapping_add(seat as u64)),
                think: config.think,
                eat: config.eat,
                started,
            };
            let handle = thread::Builder::new()
                .name(format!("diner-{seat}"))
                .spawn(move || diner.run())
                .map_err(|err| ConfigError::ThreadSpawnFailed {
                    seat,
                    reason: err.to_string(),
                });
            match handle {
                Ok(handle) => dinner.threads.push(handle),
                Err(err) => {
                    log::warn!("spawn failed for seat {seat}, tearing down partial dinner");
                    dinner.teardown();
                    return Err(err);
                }
            }
        }
        log::debug!("dinner served: {} seats", config.seats);
        Ok(dinner)
    }

    /// Take the trace-event receiver.
    ///
    /// Returns `None` on the second call. Events not drained count
    /// against the channel capacity; once it fills, diners drop
    /// further events rather than block.
    pub fn events(&mut self) -> Option<Receiver<TraceEvent>> {
        self.trace_rx.take()
    }

    /// The shared table, for live snapshot reads during the run.
    pub fn table(&self) -> &Arc<Table> {
        &self.table
    }

    /// Stop every diner, join the threads, and report.
    pub fn shutdown(mut self) -> RunReport {
        self.teardown()
    }

    /// Serve, let the diners run for `config.runtime`, then shut down.
    pub fn run(config: RunConfig) -> Result<RunReport, ConfigError> {
        let runtime = config.runtime;
        let dinner = Self::serve(config)?;
        thread::sleep(runtime);
        Ok(dinner.shutdown())
    }

    fn teardown(&mut self) -> RunReport {
        self.shutdown.store(true, Ordering::Release);
        self.table.close();

        let mut joined = 0;
        for handle in self.threads.drain(..) {
            match handle.join() {
                Ok(()) => joined += 1,
                Err(_) => log::warn!("a diner thread panicked before teardown"),
            }
        }

        let meals = self.table.meal_counts();
        let report = RunReport {
            total_meals: meals.iter().sum(),
            meals,
            elapsed: self.started.elapsed(),
            diners_joined: joined,
            events_dropped: self.dropped.load(Ordering::Relaxed),
        };
        log::debug!(
            "dinner over: {} meals across {} diners",
            report.total_meals,
            report.meals.len()
        );
        report
    }
}

impl Drop for Dinner {
    fn drop(&mut self) {
        if !self.threads.is_empty() {
            let _ = self.teardown();
        }
    }
}
