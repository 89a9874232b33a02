//! `xeno-core` — foundational types for the xeno-invasion simulator.
//!
//! This crate is a dependency of every other `xeno-*` crate.  It intentionally
//! has no `xeno-*` dependencies and minimal external ones (only `thiserror`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`direction`] | `Direction` compass enum with `opposite()`              |
//! | [`ids`]       | `AlienId`                                               |
//! | [`limits`]    | `MAX_CITY_INVADERS`, `MAX_ALIEN_MOVES`                  |

pub mod direction;
pub mod ids;
pub mod limits;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use direction::{Direction, UnknownDirection};
pub use ids::AlienId;
pub use limits::{MAX_ALIEN_MOVES, MAX_CITY_INVADERS};
