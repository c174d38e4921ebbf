//! Core types for the Refectory dining simulation.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental vocabulary shared by the table protocol and the
//! engine: diner identifiers, the activity state machine, trace events,
//! and error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod activity;
pub mod error;
pub mod event;
pub mod id;

pub use activity::Activity;
pub use error::{AdmissionError, ConfigError};
pub use event::TraceEvent;
pub use id::DinerId;
