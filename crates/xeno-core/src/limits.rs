//! Fixed simulation limits.
//!
//! Both values are part of the simulation contract, not tunables: the
//! destruction rule is defined as "two invaders", and the move budget is
//! what guarantees every run terminates even on an indestructible map.

/// Invaders a city can hold before it is destroyed; also the cap on
/// outstanding sieges.  The moment a second invader arrives, the city and
/// both invaders are wiped out.
pub const MAX_CITY_INVADERS: usize = 2;

/// Moves an alien may make before it gives up and stops roaming.
pub const MAX_ALIEN_MOVES: u32 = 10_000;
