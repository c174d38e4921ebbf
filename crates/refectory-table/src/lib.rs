//! Shared table state and the admission protocol.
//!
//! This crate is the core of the Refectory simulation: a ring of N
//! seats, one fork between each adjacent pair, and a single mutex
//! guarding every activity and meal-count read and write. The
//! [`Table`] decides admission centrally — a hungry diner starts
//! eating only when the admission predicate holds under that mutex —
//! so forks are never arbitrated by independent per-fork locking and
//! the classical hold-one-wait-for-the-other deadlock cannot arise.
//!
//! Fork hand-over uses a secondary per-fork signal, but the signal is
//! only ever raised as a consequence of a decision already made under
//! the table mutex. It hands the resource over; it never arbitrates
//! it.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod fork;
mod table;

pub use table::Table;
