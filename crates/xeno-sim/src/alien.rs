//! The alien run loop.
//!
//! Each alien is an independent task that repeatedly tries to move to a
//! random neighbor of its current city using the two-phase protocol: lay a
//! siege on the destination, vacate the source, then convert the siege into
//! residency.  The siege comes first so the alien is never caught outside
//! every city: it gives up its current home only once entry elsewhere is
//! already secured.
//!
//! An alien stops for one of three reasons, and only the first is silent:
//!
//! - **cancellation** — observed at the top of each iteration; no message.
//! - **death** — its city was destroyed under it, it is walled in with no
//!   standing neighbor, or it could not vacate a city that got destroyed
//!   while it was choosing; reported as [`AlienFate::Killed`].
//! - **exhaustion** — the fixed move budget ran out; reported as
//!   [`AlienFate::Exhausted`].

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use xeno_core::{AlienId, MAX_ALIEN_MOVES};
use xeno_world::CityRef;

/// How an alien's run ended, for the orchestrator's bookkeeping.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum AlienFate {
    /// Died with a city, or trapped with nowhere left to go.
    Killed,
    /// Ran out of moves and stopped roaming.
    Exhausted,
}

/// Completion message an alien sends before its task exits.
#[derive(Copy, Clone, Debug)]
pub struct AlienDone {
    pub id:    AlienId,
    pub fate:  AlienFate,
    /// Completed moves.  An alien that dies where it was placed reports 0.
    pub moves: u32,
}

/// A single roaming invader.  Owns its randomness source, seeded once from
/// entropy at creation and never reseeded.
pub struct Alien {
    id:  AlienId,
    rng: SmallRng,
}

impl Alien {
    pub fn new(id: AlienId) -> Self {
        Self {
            id,
            rng: SmallRng::from_entropy(),
        }
    }

    /// Roam from `start` until death, exhaustion, or cancellation.
    ///
    /// Every termination except cancellation sends one [`AlienDone`]; the
    /// send itself races the token so a finished alien never blocks on an
    /// orchestrator that has already moved on.
    pub async fn run(
        mut self,
        start: CityRef,
        cancel: CancellationToken,
        done: mpsc::Sender<AlienDone>,
    ) {
        let mut current = start;
        let mut moves: u32 = 0;

        loop {
            // One suspension point per iteration, so sibling aliens sharing
            // the worker threads always get a turn (a siege retry loop must
            // not starve the very alien holding the contested slot).
            tokio::task::yield_now().await;

            if cancel.is_cancelled() {
                debug!("Alien {} cancelled", self.id);
                return;
            }

            if moves >= MAX_ALIEN_MOVES {
                self.finish(AlienFate::Exhausted, moves, &cancel, &done).await;
                return;
            }

            // Placed in (or walked into) a city that is now rubble: the
            // alien dies with it, crediting no further moves.
            if current.is_destroyed() {
                self.finish(AlienFate::Killed, moves, &cancel, &done).await;
                return;
            }

            if !current.has_open_neighbor() {
                // Walled in: every link absent or leading to rubble.
                self.finish(AlienFate::Killed, moves, &cancel, &done).await;
                return;
            }

            let Some(target) = current.random_neighbor(&mut self.rng) else {
                // Links can vanish between the check above and the pick.
                self.finish(AlienFate::Killed, moves, &cancel, &done).await;
                return;
            };

            if !target.lay_siege(self.id) {
                // Both entry permits taken; pick again.  Not a move.
                continue;
            }

            if !current.leave(self.id) {
                // The current city was destroyed while the siege was being
                // laid.  Hand the permit back and die where it stood.
                target.lift_siege(self.id);
                self.finish(AlienFate::Killed, moves, &cancel, &done).await;
                return;
            }

            target.invade(self.id);
            current = target;
            moves += 1;
        }
    }

    /// Report the final fate, unless cancellation wins the race first.
    async fn finish(
        &self,
        fate: AlienFate,
        moves: u32,
        cancel: &CancellationToken,
        done: &mpsc::Sender<AlienDone>,
    ) {
        let msg = AlienDone {
            id: self.id,
            fate,
            moves,
        };
        tokio::select! {
            _ = cancel.cancelled() => {}
            _ = done.send(msg) => {}
        }
        debug!("Alien {} finished after {moves} moves", self.id);
    }
}
