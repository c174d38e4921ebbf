//! Run loop, diner threads, and reporting for the Refectory dining
//! simulation.
//!
//! The engine is the external driver around the table protocol: it
//! validates a [`RunConfig`], spawns one thread per seat, lets the
//! diners cycle think → hungry → eat for a bounded runtime, then
//! tears everything down and returns a [`RunReport`] with the meal
//! counters.
//!
//! The table itself never schedules or measures the think and eat
//! delays; those live entirely in this crate's diner loop.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod config;
mod diner;
mod dinner;

pub use config::{DurationRange, RunConfig};
pub use dinner::{Dinner, RunReport};
