//! Run configuration and validation.

use std::time::Duration;

use rand::Rng;
use refectory_core::ConfigError;

// ── DurationRange ───────────────────────────────────────────────

/// Inclusive bounds for a jittered delay.
///
/// Each diner samples its think and eat delays uniformly from these
/// bounds using its own seeded RNG, so two runs with the same
/// [`RunConfig`] draw the same delay sequences.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DurationRange {
    /// Shortest delay.
    pub min: Duration,
    /// Longest delay.
    pub max: Duration,
}

impl DurationRange {
    /// A range spanning `min..=max`.
    pub fn new(min: Duration, max: Duration) -> Self {
        Self { min, max }
    }

    /// A degenerate range that always yields `d`.
    pub fn fixed(d: Duration) -> Self {
        Self { min: d, max: d }
    }

    /// Range with both bounds in milliseconds.
    pub fn millis(min: u64, max: u64) -> Self {
        Self {
            min: Duration::from_millis(min),
            max: Duration::from_millis(max),
        }
    }

    pub(crate) fn is_valid(&self) -> bool {
        self.min <= self.max && self.max > Duration::ZERO
    }

    pub(crate) fn sample(&self, rng: &mut impl Rng) -> Duration {
        if self.min == self.max {
            self.min
        } else {
            rng.gen_range(self.min..=self.max)
        }
    }
}

// ── RunConfig ───────────────────────────────────────────────────

/// Everything a [`Dinner`](crate::Dinner) needs to run.
///
/// The defaults mirror the classical five-philosopher setup: five
/// seats, think and eat jittered between 5 and 15 ms, a one second
/// runtime.
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// Seats around the table. Minimum 2.
    pub seats: usize,
    /// Think-delay bounds.
    pub think: DurationRange,
    /// Eat-delay bounds.
    pub eat: DurationRange,
    /// How long [`Dinner::run`](crate::Dinner::run) lets the diners
    /// eat before tearing the table down.
    pub runtime: Duration,
    /// Seed for the per-diner delay RNGs.
    pub seed: u64,
    /// Capacity of the bounded trace-event channel. Events beyond
    /// capacity are dropped and counted, never block a diner.
    pub trace_capacity: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seats: 5,
            think: DurationRange::millis(5, 15),
            eat: DurationRange::millis(5, 15),
            runtime: Duration::from_secs(1),
            seed: 42,
            trace_capacity: 256,
        }
    }
}

impl RunConfig {
    /// Check structural invariants before any thread is spawned.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.seats < 2 {
            return Err(ConfigError::TooFewSeats {
                configured: self.seats,
            });
        }
        if !self.think.is_valid() {
            return Err(ConfigError::EmptyDuration { which: "think" });
        }
        if !self.eat.is_valid() {
            return Err(ConfigError::EmptyDuration { which: "eat" });
        }
        if self.runtime == Duration::ZERO {
            return Err(ConfigError::ZeroRuntime);
        }
        if self.trace_capacity == 0 {
            return Err(ConfigError::TraceCapacityZero);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(RunConfig::default().validate(), Ok(()));
    }

    #[test]
    fn validation_catches_each_invariant() {
        let base = RunConfig::default();

        let mut cfg = base.clone();
        cfg.seats = 1;
        assert_eq!(cfg.validate(), Err(ConfigError::TooFewSeats { configured: 1 }));

        let mut cfg = base.clone();
        cfg.think = DurationRange::millis(10, 5);
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::EmptyDuration { which: "think" })
        );

        let mut cfg = base.clone();
        cfg.eat = DurationRange::fixed(Duration::ZERO);
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::EmptyDuration { which: "eat" })
        );

        let mut cfg = base.clone();
        cfg.runtime = Duration::ZERO;
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroRuntime));

        let mut cfg = base;
        cfg.trace_capacity = 0;
        assert_eq!(cfg.validate(), Err(ConfigError::TraceCapacityZero));
    }

    #[test]
    fn sampling_stays_in_bounds() {
        let range = DurationRange::millis(3, 9);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1000 {
            let d = range.sample(&mut rng);
            assert!(d >= range.min && d <= range.max);
        }
    }

    #[test]
    fn fixed_range_always_yields_its_value() {
        let range = DurationRange::fixed(Duration::from_millis(4));
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(range.sample(&mut rng), Duration::from_millis(4));
    }

    #[test]
    fn same_seed_draws_same_sequence() {
        let range = DurationRange::millis(1, 100);
        let mut a = ChaCha8Rng::seed_from_u64(99);
        let mut b = ChaCha8Rng::seed_from_u64(99);
        let seq_a: Vec<_> = (0..32).map(|_| range.sample(&mut a)).collect();
        let seq_b: Vec<_> = (0..32).map(|_| range.sample(&mut b)).collect();
        assert_eq!(seq_a, seq_b);
    }
}
