//! The world lookup table: name → city, plus linking, sampling, and pruning.
//!
//! # Construction and symmetry
//!
//! [`WorldMap::link`] installs every edge bidirectionally: linking `A` to
//! `B` in direction `d` also links `B` to `A` in `d.opposite()`.  Cities are
//! created lazily the first time they are named, so a map file may reference
//! a neighbor that never gets a line of its own.
//!
//! # Mutation phases
//!
//! The table itself is mutated only while no aliens run: once during build,
//! once during post-run pruning.  During a run, all mutation happens inside
//! individual cities through their locked protocol.  Removing a city leaves
//! any dangling inbound `Weak` links from asymmetric input to simply stop
//! upgrading, which traversal already treats as "no link".

use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashMap;
use tracing::warn;

use xeno_core::Direction;

use crate::city::{City, CityRef};

/// The set of all standing cities, keyed by name.
#[derive(Debug, Default)]
pub struct WorldMap {
    cities: FxHashMap<String, CityRef>,
}

impl WorldMap {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    pub fn get(&self, name: &str) -> Option<CityRef> {
        self.cities.get(name).map(Arc::clone)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cities.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Iterate over all standing cities in table order (unspecified).
    pub fn cities(&self) -> impl Iterator<Item = &CityRef> + '_ {
        self.cities.values()
    }

    // ── Construction ──────────────────────────────────────────────────────

    /// Fetch `name`, creating a link-less city for it on first mention.
    pub fn get_or_insert(&mut self, name: &str) -> CityRef {
        Arc::clone(
            self.cities
                .entry(name.to_owned())
                .or_insert_with(|| City::new(name)),
        )
    }

    /// Install the symmetric edge `from --dir--> to`, creating either city
    /// if it does not exist yet.  An existing link in the same slot is
    /// overwritten.
    pub fn link(&mut self, from: &str, dir: Direction, to: &str) {
        let from = self.get_or_insert(from);
        let to = self.get_or_insert(to);
        from.add_neighbor(dir, &to);
        to.add_neighbor(dir.opposite(), &from);
    }

    // ── Removal ───────────────────────────────────────────────────────────

    /// Remove `name` from the table and strip the matching reverse link
    /// from each of its neighbors.  Logs a warning if no such city exists.
    pub fn remove_city(&mut self, name: &str) {
        let Some(city) = self.cities.remove(name) else {
            warn!("City {name} not found; nothing removed");
            return;
        };
        for (dir, neighbor) in city.neighbor_links() {
            neighbor.remove_neighbor(dir.opposite());
        }
    }

    /// Remove every destroyed city and its reverse links.  Returns how many
    /// were pruned.  Must only run while no aliens are active.
    pub fn prune_destroyed(&mut self) -> usize {
        let doomed: Vec<String> = self
            .cities
            .values()
            .filter(|c| c.is_destroyed())
            .map(|c| c.name().to_owned())
            .collect();
        for name in &doomed {
            self.remove_city(name);
        }
        doomed.len()
    }

    // ── Sampling ──────────────────────────────────────────────────────────

    /// `n` cities drawn uniformly **with replacement** — the same city may
    /// appear multiple times.  Empty world yields an empty vec.
    pub fn random_cities<R: Rng>(&self, n: usize, rng: &mut R) -> Vec<CityRef> {
        let pool: Vec<&CityRef> = self.cities.values().collect();
        let mut picks = Vec::with_capacity(n);
        for _ in 0..n {
            if let Some(&c) = pool.choose(rng) {
                picks.push(Arc::clone(c));
            }
        }
        picks
    }
}
