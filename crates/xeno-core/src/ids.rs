//! Strongly typed alien identifier.
//!
//! `AlienId` doubles as the siege (reservation) and invader (occupancy) token
//! on a city, so it must be `Copy + Eq + Hash` for cheap set membership.  The
//! inner integer is `pub` because the orchestrator mints ids sequentially.

use std::fmt;

/// Identity of one alien for the lifetime of a single invasion run.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct AlienId(pub u32);

impl AlienId {
    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for AlienId {
    /// Bare number — destruction reports read "aliens 3 and 7".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
