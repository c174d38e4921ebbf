//! The shared table: activity record, meal counters, and the
//! centralized admission protocol.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use refectory_core::{Activity, AdmissionError, DinerId};

use crate::fork::ForkSignal;

// ── TableState ──────────────────────────────────────────────────

/// Everything guarded by the single table mutex.
///
/// All reads and writes of `activity` and `meals` go through this
/// struct while the mutex is held, so the protocol is linearizable
/// with respect to that one domain.
struct TableState {
    activity: Box<[Activity]>,
    meals: Box<[u64]>,
}

impl TableState {
    fn new(seats: usize) -> Self {
        Self {
            activity: vec![Activity::Thinking; seats].into_boxed_slice(),
            meals: vec![0; seats].into_boxed_slice(),
        }
    }

    fn set_activity(&mut self, k: usize, activity: Activity) {
        self.activity[k] = activity;
    }

    fn record_meal(&mut self, k: usize) {
        self.meals[k] += 1;
    }

    /// The admission predicate: seat `k` wants to eat and neither
    /// neighbor is eating. Evaluated only under the table mutex.
    fn may_eat(&self, k: usize) -> bool {
        let n = self.activity.len();
        self.activity[k] == Activity::Hungry
            && !self.activity[(k + n - 1) % n].is_eating()
            && !self.activity[(k + 1) % n].is_eating()
    }
}

// ── Table ───────────────────────────────────────────────────────

/// A ring of `N` seats with one fork between each adjacent pair.
///
/// The table is the sole admission path into the eating activity. A
/// diner becomes [`Activity::Eating`] only inside
/// [`request_admission`](Table::request_admission) or, asynchronously,
/// when a neighbor's [`release_after_meal`](Table::release_after_meal)
/// re-evaluates it — both under the one table mutex. Fork signals are
/// raised as part of that same decision, so two neighbors can never
/// hold a shared fork at once.
///
/// # Fairness
///
/// The classical predicate re-considers a hungry diner every time a
/// neighbor finishes eating, which bounds waiting in practice but does
/// not guarantee oldest-hungry-first service: a diner can be passed
/// over repeatedly if its neighbors keep alternating. That weakness is
/// inherent to the algorithm and intentionally not papered over here.
///
/// # Contract violations
///
/// Out-of-range seat indices and tables with fewer than two seats are
/// programming errors and panic. The mutex guard is released on
/// unwind, so a panicking caller cannot wedge the table for others.
pub struct Table {
    state: Mutex<TableState>,
    forks: Box<[ForkSignal]>,
    closed: AtomicBool,
    seats: usize,
}

impl Table {
    /// Create a table with `seats` seats, everyone thinking, all meal
    /// counters zero, no fork grants pending.
    ///
    /// # Panics
    ///
    /// If `seats < 2`. A one-seat ring makes the diner its own
    /// neighbor and aliases its left and right fork to the same fork.
    pub fn new(seats: usize) -> Self {
        assert!(seats >= 2, "a table needs at least 2 seats, got {seats}");
        Self {
            state: Mutex::new(TableState::new(seats)),
            forks: (0..seats).map(|_| ForkSignal::new()).collect(),
            closed: AtomicBool::new(false),
            seats,
        }
    }

    /// Number of seats around the table.
    pub fn seats(&self) -> usize {
        self.seats
    }

    /// Whether [`close`](Table::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    // ── Admission protocol ──────────────────────────────────────

    /// Ask for admission to eat and block until both forks are held.
    ///
    /// Marks the diner hungry, evaluates the admission predicate under
    /// the table mutex, and — immediately on success, or later from a
    /// neighbor's [`release_after_meal`](Table::release_after_meal) —
    /// receives both fork grants. The blocking waits outside the mutex
    /// only hand the forks over; the contention was already resolved
    /// when the grant was decided.
    ///
    /// On success the diner is [`Activity::Eating`] and holds forks
    /// `(i-1+N)%N` and `i`. Returns [`AdmissionError::Closed`] if the
    /// table closed before a grant arrived; in that case the diner is
    /// back to [`Activity::Thinking`] and holds nothing.
    ///
    /// # Panics
    ///
    /// If `diner` is out of range.
    pub fn request_admission(&self, diner: DinerId) -> Result<(), AdmissionError> {
        let i = self.seat_index(diner);
        {
            let mut state = self.lock_state();
            if self.closed.load(Ordering::Acquire) {
                return Err(AdmissionError::Closed);
            }
            state.set_activity(i, Activity::Hungry);
            if state.may_eat(i) {
                self.admit(&mut state, i);
            }
        }

        // Physical hand-over, in fixed global order: left fork first,
        // then own. Each grant is addressed to the admitted seat, so a
        // diner parked on a shared fork cannot take a grant meant for
        // its neighbor. Grants always arrive for both forks together,
        // so a Closed return here means no grant was ever decided for
        // us.
        if let Err(err) = self.forks[self.left_fork(i)].acquire(i, &self.closed) {
            self.abort_admission(i);
            return Err(err);
        }
        if let Err(err) = self.forks[i].acquire(i, &self.closed) {
            self.abort_admission(i);
            return Err(err);
        }
        Ok(())
    }

    /// Finish a meal: count it, return to thinking, and re-evaluate
    /// both neighbors.
    ///
    /// Each neighbor is checked against the table state as it is at
    /// that moment — if the left neighbor is admitted first, the right
    /// neighbor's predicate sees it already eating. Runs entirely
    /// under the table mutex; never blocks.
    ///
    /// # Panics
    ///
    /// If `diner` is out of range, or is not currently eating (a
    /// release without a matching admission is a contract violation).
    pub fn release_after_meal(&self, diner: DinerId) {
        let i = self.seat_index(diner);
        let mut state = self.lock_state();
        assert!(
            state.activity[i].is_eating(),
            "diner {diner} released a meal it was never admitted to"
        );
        state.record_meal(i);
        state.set_activity(i, Activity::Thinking);

        // After close no new admissions are decided; a waiter that
        // already gave up must not find a stale grant pending.
        if !self.closed.load(Ordering::Acquire) {
            let n = self.seats;
            let left = (i + n - 1) % n;
            let right = (i + 1) % n;
            if state.may_eat(left) {
                self.admit(&mut state, left);
            }
            if state.may_eat(right) {
                self.admit(&mut state, right);
            }
        }
    }

    /// Close the table: no further admissions are decided and every
    /// pending fork wait is woken so it can abort.
    ///
    /// Diners already admitted (grant decided before the close) still
    /// complete their hand-over and may finish their meal;
    /// [`release_after_meal`](Table::release_after_meal) keeps working
    /// on a closed table. Idempotent.
    pub fn close(&self) {
        {
            // Serialize the flag flip with any in-flight admission
            // decision.
            let _state = self.lock_state();
            self.closed.store(true, Ordering::Release);
        }
        for fork in self.forks.iter() {
            fork.wake_for_close();
        }
    }

    // ── Reporting reads ─────────────────────────────────────────

    /// Meals eaten by one diner, snapshot under the table mutex.
    ///
    /// # Panics
    ///
    /// If `diner` is out of range.
    pub fn meal_count(&self, diner: DinerId) -> u64 {
        let i = self.seat_index(diner);
        self.lock_state().meals[i]
    }

    /// All meal counters, snapshot-consistent across seats.
    pub fn meal_counts(&self) -> Vec<u64> {
        self.lock_state().meals.to_vec()
    }

    /// One diner's current activity, snapshot under the table mutex.
    ///
    /// # Panics
    ///
    /// If `diner` is out of range.
    pub fn activity(&self, diner: DinerId) -> Activity {
        let i = self.seat_index(diner);
        self.lock_state().activity[i]
    }

    /// All activities, snapshot-consistent across seats.
    pub fn activities(&self) -> Vec<Activity> {
        self.lock_state().activity.to_vec()
    }

    // ── Internals ───────────────────────────────────────────────

    fn lock_state(&self) -> MutexGuard<'_, TableState> {
        self.state.lock().unwrap()
    }

    fn seat_index(&self, diner: DinerId) -> usize {
        let i = diner.index();
        assert!(
            i < self.seats,
            "seat {i} out of range for a table of {} seats",
            self.seats
        );
        i
    }

    /// Index of seat `i`'s left fork (shared with seat `(i-1+N)%N`).
    fn left_fork(&self, i: usize) -> usize {
        (i + self.seats - 1) % self.seats
    }

    /// Grant admission to seat `k`: flip it to eating and raise both
    /// fork grants, addressed to `k`. Caller holds the table mutex
    /// and has already checked the predicate.
    fn admit(&self, state: &mut TableState, k: usize) {
        state.set_activity(k, Activity::Eating);
        self.forks[self.left_fork(k)].grant(k);
        self.forks[k].grant(k);
    }

    /// Undo a request that gave up at close: clear any grant
    /// addressed to this seat that raced in before the flag flipped,
    /// and go back to thinking. Grants addressed to a neighbor are
    /// untouched, so an already-admitted neighbor still completes its
    /// hand-over.
    fn abort_admission(&self, i: usize) {
        let mut state = self.lock_state();
        self.forks[self.left_fork(i)].revoke(i);
        self.forks[i].revoke(i);
        state.set_activity(i, Activity::Thinking);
    }
}
