//! Refectory: a dining-philosophers simulation with a centralized,
//! deadlock-free admission protocol.
//!
//! N diners sit around a ring table with one fork between each
//! adjacent pair; a diner needs both neighboring forks to eat. A
//! single mutex guards the table state, and the admission predicate —
//! hungry, and neither neighbor eating — is evaluated atomically under
//! it. Forks are handed over through per-fork signals only after the
//! decision is made, so the classical hold-and-wait deadlock cannot
//! occur.
//!
//! # Quick start
//!
//! ```rust
//! use refectory::prelude::*;
//! use std::time::Duration;
//!
//! let config = RunConfig {
//!     seats: 3,
//!     think: DurationRange::millis(1, 2),
//!     eat: DurationRange::millis(1, 2),
//!     runtime: Duration::from_millis(100),
//!     seed: 1,
//!     trace_capacity: 256,
//! };
//! let report = Dinner::run(config).unwrap();
//! assert_eq!(report.meals.len(), 3);
//! assert_eq!(report.diners_joined, 3);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `refectory-core` | IDs, activities, trace events, errors |
//! | [`table`] | `refectory-table` | Shared table state and the admission protocol |
//! | [`engine`] | `refectory-engine` | Run configuration, diner threads, reports |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, IDs, and errors (`refectory-core`).
pub use refectory_core as types;

/// Shared table state and the admission protocol (`refectory-table`).
pub use refectory_table as table;

/// Run loop, diner threads, and reporting (`refectory-engine`).
pub use refectory_engine as engine;

/// The types most programs need, in one import.
pub mod prelude {
    pub use refectory_core::{Activity, AdmissionError, ConfigError, DinerId, TraceEvent};
    pub use refectory_engine::{Dinner, DurationRange, RunConfig, RunReport};
    pub use refectory_table::Table;
}
