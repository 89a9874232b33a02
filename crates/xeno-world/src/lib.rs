//! `xeno-world` — the shared, mutating city graph.
//!
//! Cities are the only resource shared across concurrently running aliens.
//! Each [`City`] carries one lock over its entire mutable state (neighbor
//! links, siege set, invader set, destroyed flag), so every occupancy
//! transition on a city is totally ordered and no transition ever needs a
//! second city's lock.
//!
//! # Ownership
//!
//! The [`WorldMap`] table holds the only strong reference to each city
//! (`Arc<City>`); neighbor links between peer cities are `Weak`, so the
//! graph contains no strong cycles and a pruned city is freed as soon as
//! the last roaming alien drops its transient handle.
//!
//! | Module   | Contents                                        |
//! |----------|-------------------------------------------------|
//! | [`city`] | `City`, `CityRef`, the occupancy protocol       |
//! | [`map`]  | `WorldMap` — lookup, linking, sampling, pruning |

pub mod city;
pub mod map;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use city::{City, CityRef};
pub use map::WorldMap;
