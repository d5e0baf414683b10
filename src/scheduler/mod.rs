//! Scheduling parameters: queue levels, their quanta, and when new
//! arrivals are admitted.

use std::fmt;
use std::num::NonZeroU64;

use serde::Deserialize;

use crate::core::Ticks;

pub const NUM_LEVELS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Level {
    Zero,
    One,
}

impl Level {
    pub const ALL: [Level; NUM_LEVELS] = [Level::Zero, Level::One];

    pub fn index(self) -> usize {
        match self {
            Level::Zero => 0,
            Level::One => 1,
        }
    }

    /// Where a process goes after using up its full quantum on this level.
    /// Level 1 is the floor; there is no promotion back to level 0.
    pub fn demoted(self) -> Level {
        Level::One
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.index())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quanta {
    pub tq0: NonZeroU64,
    pub tq1: NonZeroU64,
}

impl Quanta {
    pub fn new(tq0: NonZeroU64, tq1: NonZeroU64) -> Self {
        Self { tq0, tq1 }
    }

    pub fn for_level(&self, level: Level) -> Ticks {
        match level {
            Level::Zero => self.tq0.get(),
            Level::One => self.tq1.get(),
        }
    }
}

/// When processes that have arrived are moved into level 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Admission {
    /// Only after level 0 and then level 1 have both been drained.
    #[default]
    CycleBoundary,
    /// After every slice. A non-empty level 0 interrupts a level 1 drain.
    EverySlice,
}

impl fmt::Display for Admission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Admission::CycleBoundary => f.write_str("cycle-boundary"),
            Admission::EverySlice => f.write_str("every-slice"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_levels_demote_to_level_one() {
        assert_eq!(Level::Zero.demoted(), Level::One);
        assert_eq!(Level::One.demoted(), Level::One);
    }

    #[test]
    fn quantum_follows_level() {
        let q = Quanta::new(NonZeroU64::new(2).unwrap(), NonZeroU64::new(5).unwrap());
        assert_eq!(q.for_level(Level::Zero), 2);
        assert_eq!(q.for_level(Level::One), 5);
    }
}
