//! Invasion orchestration.
//!
//! # Run phases
//!
//! 1. **Seed** — sample a starting city per alien (uniformly, with
//!    replacement), claim it through the same siege/invade protocol the
//!    aliens use while roaming, and spawn one task per successfully placed
//!    alien.  An alien whose seed siege fails is discarded, not reassigned.
//! 2. **Wait** — a two-way select between the external cancellation signal
//!    and the aliens' completion channel, until either fires or every alien
//!    has reported in.
//! 3. **Settle** — cancel the workers' child token, await every spawned
//!    task, and only then prune destroyed cities from the table.  Nothing
//!    touches a city after this function returns.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use xeno_core::AlienId;
use xeno_world::WorldMap;

use crate::alien::{Alien, AlienDone, AlienFate};

/// Outcome summary of one invasion run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InvasionReport {
    /// Aliens actually deployed onto the map.
    pub launched:         usize,
    /// Aliens whose seed city had no free entry permit; never deployed.
    pub discarded:        usize,
    /// Deployed aliens that died (destroyed city or walled in).
    pub killed:           usize,
    /// Deployed aliens that ran out their move budget.
    pub exhausted:        usize,
    /// Whether the run was stopped by the external cancellation signal.
    pub cancelled:        bool,
    /// Cities pruned from the map after the run.
    pub cities_destroyed: usize,
}

/// Run a full invasion: seed `num_aliens` aliens, let them roam, and prune
/// the destroyed cities once every task has stopped.
///
/// Cancellation is cooperative: when `cancel` fires, the orchestrator stops
/// waiting, asks the aliens to stop, and still awaits every task before
/// pruning, so the returned map is never mutated afterwards.  Cancellation
/// is a normal termination path, reported via
/// [`InvasionReport::cancelled`], never an error.
pub async fn simulate_invasion(
    world: &mut WorldMap,
    num_aliens: usize,
    cancel: &CancellationToken,
) -> InvasionReport {
    let mut report = InvasionReport::default();

    if world.is_empty() {
        error!("There are no cities for the mad aliens to invade");
        return report;
    }

    // ── Seed ──────────────────────────────────────────────────────────────

    let mut rng = SmallRng::from_entropy();
    let start_cities = world.random_cities(num_aliens, &mut rng);

    let worker_cancel = cancel.child_token();
    let (done_tx, mut done_rx) = mpsc::channel::<AlienDone>(num_aliens.max(1));
    let mut workers = JoinSet::new();
    let mut aliens_left = 0usize;

    for (id, city) in start_cities.into_iter().enumerate() {
        let id = AlienId(id as u32);
        if !city.lay_siege(id) {
            // Already two permits pending on this city; this alien never
            // deploys.  Only the discard tally remembers it.
            report.discarded += 1;
            continue;
        }
        city.invade(id);
        aliens_left += 1;

        let alien = Alien::new(id);
        workers.spawn(alien.run(city, worker_cancel.child_token(), done_tx.clone()));
    }
    report.launched = aliens_left;
    drop(done_tx);

    if aliens_left == 0 {
        info!("No aliens were deployed");
    }

    // ── Wait ──────────────────────────────────────────────────────────────

    while aliens_left > 0 {
        tokio::select! {
            _ = cancel.cancelled() => {
                info!("Shutdown signal caught...");
                report.cancelled = true;
                break;
            }
            msg = done_rx.recv() => {
                let Some(done) = msg else {
                    // Every sender is gone; nothing further can arrive.
                    break;
                };
                match done.fate {
                    AlienFate::Killed    => report.killed += 1,
                    AlienFate::Exhausted => report.exhausted += 1,
                }
                aliens_left -= 1;
                if aliens_left == 0 {
                    info!("The final alien has finished");
                }
            }
        }
    }

    // ── Settle ────────────────────────────────────────────────────────────

    // Stop any alien still roaming, and wait for every task to exit before
    // the table is touched.
    worker_cancel.cancel();
    drain_workers(&mut workers).await;

    report.cities_destroyed = world.prune_destroyed();
    info!("A total of {} cities were destroyed", report.cities_destroyed);

    report
}

/// Await every spawned worker.  A worker that panicked is logged, never
/// propagated; the settle phase still has to reach the prune.
pub(crate) async fn drain_workers(workers: &mut JoinSet<()>) {
    while let Some(joined) = workers.join_next().await {
        if let Err(e) = joined {
            error!("Alien task failed: {e}");
        }
    }
}
