//! Refectory quickstart — a complete dinner from scratch.
//!
//! Serves a five-seat table, prints activity transitions as they
//! stream in, and summarizes the meal counts at the end.
//!
//! Run with:
//!   cargo run --example quickstart

use std::thread;
use std::time::Duration;

use refectory_engine::{Dinner, DurationRange, RunConfig};

fn main() {
    env_logger::builder().format_target(false).init();

    let config = RunConfig {
        seats: 5,
        think: DurationRange::millis(10, 50),
        eat: DurationRange::millis(10, 50),
        runtime: Duration::from_secs(2),
        seed: 42,
        trace_capacity: 1024,
    };
    let runtime = config.runtime;

    let mut dinner = Dinner::serve(config).expect("config is valid");
    let events = dinner.events().expect("first take of the receiver");

    // Print the trace from its own thread while the diners run.
    let printer = thread::spawn(move || {
        for event in events.iter() {
            println!(
                "[{:>6.1?}] diner {} is {} ({} meals so far)",
                event.elapsed, event.diner, event.activity, event.meals
            );
        }
    });

    thread::sleep(runtime);
    let report = dinner.shutdown();
    printer.join().expect("printer thread");

    println!("\ndinner over in {:.2?}", report.elapsed);
    for (seat, meals) in report.meals.iter().enumerate() {
        println!("diner {seat}: {meals} meals");
    }
    println!(
        "total {} meals, {} trace events dropped",
        report.total_meals, report.events_dropped
    );
}
