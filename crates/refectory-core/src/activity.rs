//! The per-diner activity state machine.

use std::fmt;

/// What a diner is doing right now.
///
/// Each diner cycles `Thinking → Hungry → Eating → Thinking → …`. The
/// transition into [`Eating`](Activity::Eating) happens only inside the
/// table's admission protocol, under the table mutex; the other two
/// transitions are also recorded under that mutex so that any snapshot
/// of the table is internally consistent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Activity {
    /// Private activity; no shared resources held.
    #[default]
    Thinking,
    /// Waiting for admission to eat.
    Hungry,
    /// Holding both adjacent forks.
    Eating,
}

impl Activity {
    /// Whether this diner currently holds its forks.
    pub fn is_eating(self) -> bool {
        matches!(self, Self::Eating)
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Thinking => write!(f, "thinking"),
            Self::Hungry => write!(f, "hungry"),
            Self::Eating => write!(f, "eating"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_thinking() {
        assert_eq!(Activity::default(), Activity::Thinking);
    }

    #[test]
    fn only_eating_is_eating() {
        assert!(Activity::Eating.is_eating());
        assert!(!Activity::Thinking.is_eating());
        assert!(!Activity::Hungry.is_eating());
    }
}
