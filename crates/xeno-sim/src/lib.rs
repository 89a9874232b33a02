//! `xeno-sim` — concurrent invasion execution.
//!
//! One tokio task per alien, all hammering the shared
//! [`WorldMap`](xeno_world::WorldMap) through each city's locked protocol.
//! The orchestrator seeds the aliens, waits for the run to end (every alien
//! finished, or an external cancellation), and prunes the wreckage only
//! after every task has fully stopped.
//!
//! | Module       | Contents                                        |
//! |--------------|-------------------------------------------------|
//! | [`alien`]    | `Alien` run loop, `AlienDone`, `AlienFate`      |
//! | [`invasion`] | `simulate_invasion`, `InvasionReport`           |

pub mod alien;
pub mod invasion;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use alien::{Alien, AlienDone, AlienFate};
pub use invasion::{simulate_invasion, InvasionReport};
