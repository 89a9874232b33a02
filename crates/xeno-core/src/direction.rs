//! Compass directions used as edge discriminators on the city graph.
//!
//! The direction set is closed: exactly four values, so every city stores its
//! neighbor links in a fixed `[_; Direction::COUNT]` array indexed by
//! [`Direction::index`].  `opposite()` keeps adjacency symmetric — when the
//! map builder links `A --north--> B` it also links `B --south--> A`.

use std::fmt;
use std::str::FromStr;

/// One of the four fixed compass labels on a city's outgoing links.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Number of directions; the fixed fan-out of every city.
    pub const COUNT: usize = 4;

    /// All directions in canonical (serialization) order.
    pub const ALL: [Direction; Direction::COUNT] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// The involution pairing north↔south and east↔west.
    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East  => Direction::West,
            Direction::West  => Direction::East,
        }
    }

    /// Cast to `usize` for direct use as a neighbor-array index.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Lowercase wire token, as it appears in map files.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East  => "east",
            Direction::West  => "west",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse failure for a direction token in a map file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown direction `{0}`")]
pub struct UnknownDirection(pub String);

impl FromStr for Direction {
    type Err = UnknownDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "north" => Ok(Direction::North),
            "south" => Ok(Direction::South),
            "east"  => Ok(Direction::East),
            "west"  => Ok(Direction::West),
            other   => Err(UnknownDirection(other.to_owned())),
        }
    }
}
