//! City nodes and the siege/invade/leave occupancy protocol.
//!
//! # Protocol
//!
//! Movement between cities is two-phase.  An alien first **lays siege** to
//! its chosen destination (a pre-commit permit, capped at
//! [`MAX_CITY_INVADERS`] outstanding), then **leaves** its current city, and
//! only then **invades** the destination, converting the siege into
//! residency.  The permit exists so an alien is never stranded: it never
//! vacates a city before it is guaranteed entry somewhere else.
//!
//! The moment a second invader arrives, the city is destroyed — the flag is
//! set under the same lock acquisition that admitted the invader, so no
//! third resident is ever observable and the destruction event fires exactly
//! once.  `destroyed` is monotonic: once set it never clears.
//!
//! # Locking
//!
//! One `RwLock` covers all of a city's mutable state.  No method acquires a
//! second city's lock while holding its own; traversal helpers snapshot the
//! neighbor handles first and inspect them after the guard is released.
//! That keeps lock acquisition depth at one and makes deadlock impossible
//! regardless of how aliens race around cycles in the graph.

use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashSet;
use tracing::info;

use xeno_core::{AlienId, Direction, MAX_CITY_INVADERS};

/// Shared handle to a city.  The [`WorldMap`](crate::WorldMap) table owns the
/// strong reference; aliens hold transient clones while roaming.
pub type CityRef = Arc<City>;

/// A named graph node with four optional neighbor links and bounded
/// occupancy.  All mutation goes through the locked protocol methods.
pub struct City {
    name:  String,
    state: RwLock<CityState>,
}

/// Everything mutable about a city, guarded by a single lock so occupancy
/// transitions and link edits are totally ordered per city.
#[derive(Default)]
struct CityState {
    /// Outgoing links, indexed by `Direction::index()`.  `Weak` because the
    /// lookup table is the sole owner; a link that no longer upgrades
    /// (its target was removed from the table) is treated as absent.
    neighbors: [Option<Weak<City>>; Direction::COUNT],
    /// Aliens holding an entry permit but not yet resident.
    sieges:    FxHashSet<AlienId>,
    /// Aliens physically present.  Never exceeds `MAX_CITY_INVADERS`.
    invaders:  FxHashSet<AlienId>,
    /// Set exactly when the second invader arrives; never reset.
    destroyed: bool,
}

impl City {
    /// Create a detached city.  Links are installed by the map builder.
    pub fn new(name: impl Into<String>) -> CityRef {
        Arc::new(City {
            name:  name.into(),
            state: RwLock::new(CityState::default()),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // ── Occupancy protocol ────────────────────────────────────────────────

    /// Try to claim an entry permit.  Succeeds iff fewer than
    /// [`MAX_CITY_INVADERS`] sieges are outstanding; fails with no side
    /// effect otherwise.
    ///
    /// Deliberately a pure capacity check: it looks at neither `destroyed`
    /// nor the invader set.  A siege on a doomed city is the sieging alien's
    /// problem, discovered when it tries to move in.
    pub fn lay_siege(&self, id: AlienId) -> bool {
        let mut st = self.state.write();
        if st.sieges.len() >= MAX_CITY_INVADERS {
            return false;
        }
        st.sieges.insert(id);
        true
    }

    /// Release a siege without entering (the alien could not vacate its
    /// current city).  No-op if `id` holds no siege here.
    pub fn lift_siege(&self, id: AlienId) {
        self.state.write().sieges.remove(&id);
    }

    /// Convert a held siege into residency.  No-op if `id` holds no siege.
    ///
    /// If the city was destroyed after the siege was laid, the siege is
    /// consumed but no residency is granted: the alien walks into rubble and
    /// will find out when its next `leave` fails.  Otherwise the alien
    /// becomes an invader, and if it is the second one the city is destroyed
    /// in the same critical section, reporting both invaders.
    pub fn invade(&self, id: AlienId) {
        let mut st = self.state.write();
        if !st.sieges.remove(&id) {
            return;
        }
        if st.destroyed {
            return;
        }
        let partner = st.invaders.iter().copied().next();
        st.invaders.insert(id);
        if st.invaders.len() == MAX_CITY_INVADERS {
            st.destroyed = true;
            if let Some(partner) = partner {
                info!(
                    "City {} has been destroyed by aliens {} and {}!",
                    self.name, partner, id
                );
            }
        }
    }

    /// Vacate this city.  Returns `false` without mutation if the city has
    /// been destroyed — an alien cannot walk out of rubble; it died with the
    /// city.  Otherwise removes `id` from both the invader and siege sets.
    pub fn leave(&self, id: AlienId) -> bool {
        let mut st = self.state.write();
        if st.destroyed {
            return false;
        }
        st.invaders.remove(&id);
        st.sieges.remove(&id);
        true
    }

    pub fn is_destroyed(&self) -> bool {
        self.state.read().destroyed
    }

    /// Mark this city destroyed outside the occupancy protocol (operational
    /// removal and test setup).  Does not emit a destruction event.
    pub fn demolish(&self) {
        self.state.write().destroyed = true;
    }

    // ── Traversal ─────────────────────────────────────────────────────────

    /// Whether at least one linked neighbor is still standing.
    ///
    /// Inherently racy against concurrent destruction of that neighbor; the
    /// authoritative check is the `lay_siege` that follows.  This exists so
    /// a fully walled-in alien stops instead of spinning forever.
    pub fn has_open_neighbor(&self) -> bool {
        // Snapshot first; the neighbors' flags are read with no lock held
        // on this city.
        self.neighbor_links()
            .iter()
            .any(|(_, n)| !n.is_destroyed())
    }

    /// The neighbor in `dir`, if linked and still owned by the table.
    pub fn neighbor(&self, dir: Direction) -> Option<CityRef> {
        let st = self.state.read();
        st.neighbors[dir.index()].as_ref().and_then(Weak::upgrade)
    }

    /// Snapshot of all live links in canonical direction order.
    pub fn neighbor_links(&self) -> Vec<(Direction, CityRef)> {
        let st = self.state.read();
        Direction::ALL
            .iter()
            .filter_map(|&d| {
                st.neighbors[d.index()]
                    .as_ref()
                    .and_then(Weak::upgrade)
                    .map(|n| (d, n))
            })
            .collect()
    }

    /// A uniformly random linked neighbor (destroyed or not), or `None` if
    /// no link is present.  Destroyed picks are allowed; the caller's siege
    /// attempt is what settles whether the move happens.
    pub fn random_neighbor<R: Rng>(&self, rng: &mut R) -> Option<CityRef> {
        let links = self.neighbor_links();
        links.choose(rng).map(|(_, n)| Arc::clone(n))
    }

    // ── Structural edits (map builder / pruner only) ──────────────────────

    /// Install or overwrite the link in `dir`.  Holds only this city's lock;
    /// the reverse link is the map's responsibility.
    pub(crate) fn add_neighbor(&self, dir: Direction, to: &CityRef) {
        self.state.write().neighbors[dir.index()] = Some(Arc::downgrade(to));
    }

    /// Drop the link in `dir`, if any.
    pub(crate) fn remove_neighbor(&self, dir: Direction) {
        self.state.write().neighbors[dir.index()] = None;
    }

    // ── Introspection (reporting and tests) ───────────────────────────────

    pub fn invader_count(&self) -> usize {
        self.state.read().invaders.len()
    }

    pub fn siege_count(&self) -> usize {
        self.state.read().sieges.len()
    }

    pub fn has_invader(&self, id: AlienId) -> bool {
        self.state.read().invaders.contains(&id)
    }
}

impl std::fmt::Debug for City {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let st = self.state.read();
        f.debug_struct("City")
            .field("name", &self.name)
            .field("sieges", &st.sieges.len())
            .field("invaders", &st.invaders.len())
            .field("destroyed", &st.destroyed)
            .finish()
    }
}
