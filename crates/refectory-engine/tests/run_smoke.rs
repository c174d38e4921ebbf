//! End-to-end run: serve, let everyone eat, shut down, and check
//! that the report hangs together.

use std::time::Duration;

use refectory_core::Activity;
use refectory_engine::{Dinner, DurationRange, RunConfig};

fn smoke_config() -> RunConfig {
    RunConfig {
        seats: 5,
        think: DurationRange::millis(1, 3),
        eat: DurationRange::millis(1, 3),
        runtime: Duration::from_millis(400),
        seed: 42,
        trace_capacity: 4096,
    }
}

#[test]
fn every_diner_eats_during_a_bounded_run() {
    let report = Dinner::run(smoke_config()).unwrap();

    assert_eq!(report.meals.len(), 5);
    assert_eq!(report.diners_joined, 5);
    assert_eq!(report.total_meals, report.meals.iter().sum::<u64>());
    // 400 ms of 1-3 ms cycles: a starved diner here means lost
    // admission, not bad luck.
    for (seat, &meals) in report.meals.iter().enumerate() {
        assert!(meals > 0, "diner {seat} never ate: {:?}", report.meals);
    }
}

#[test]
fn trace_events_are_consistent_with_the_report() {
    let mut dinner = Dinner::serve(smoke_config()).unwrap();
    let events = dinner.events().unwrap();
    std::thread::sleep(Duration::from_millis(400));
    let report = dinner.shutdown();

    let mut eating_seen = vec![0u64; 5];
    let mut last_meals = vec![0u64; 5];
    for event in events.try_iter() {
        let seat = event.diner.index();
        assert!(seat < 5);
        if event.activity == Activity::Eating {
            eating_seen[seat] += 1;
        }
        // Per-diner meal counts in the trace never go backwards.
        assert!(event.meals >= last_meals[seat]);
        last_meals[seat] = event.meals;
    }

    // Dropped events mean the trace undercounts; the counters in the
    // report are the authority.
    for seat in 0..5 {
        assert!(
            eating_seen[seat] + report.events_dropped >= report.meals[seat],
            "trace lost meals for diner {seat} beyond the dropped-event count"
        );
    }
}

#[test]
fn meal_counts_can_be_read_live_and_are_monotonic() {
    let dinner = Dinner::serve(smoke_config()).unwrap();
    let table = dinner.table();

    let mut previous = vec![0u64; 5];
    for _ in 0..20 {
        std::thread::sleep(Duration::from_millis(10));
        let now = table.meal_counts();
        for (seat, (&prev, &cur)) in previous.iter().zip(now.iter()).enumerate() {
            assert!(cur >= prev, "meal counter for diner {seat} went backwards");
        }
        previous = now;
    }

    let report = dinner.shutdown();
    for (seat, (&live, &fin)) in previous.iter().zip(report.meals.iter()).enumerate() {
        assert!(fin >= live, "final count for diner {seat} below a live snapshot");
    }
}
