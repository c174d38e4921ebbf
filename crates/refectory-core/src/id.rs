//! Strongly-typed diner identifier.

use std::fmt;

/// Identifies a seat (and the diner occupying it) around the table.
///
/// Seats are numbered `0..N` clockwise; `DinerId(i)` shares its left
/// fork with seat `(i-1+N) % N` and its right fork with seat
/// `(i+1) % N`. The seat count is fixed at table construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DinerId(pub u32);

impl DinerId {
    /// The seat index as a `usize`, for slice indexing.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for DinerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for DinerId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

impl From<usize> for DinerId {
    fn from(v: usize) -> Self {
        Self(u32::try_from(v).expect("seat index fits in u32"))
    }
}
