//! Integration tests for the run loop and the orchestrator.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use xeno_core::{AlienId, Direction, MAX_ALIEN_MOVES};
use xeno_world::{CityRef, WorldMap};

use crate::{simulate_invasion, Alien, AlienFate};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// The two-line map from the original problem statement.
const CLASSIC_MAP: &str = "Foo north=Bar west=Baz south=Qu-ux\nBar south=Foo west=Bee\n";

/// Two mutually adjacent cities.
fn pair_world() -> WorldMap {
    let mut world = WorldMap::new();
    world.link("Foo", Direction::North, "Bar");
    world
}

/// One city with no links at all.
fn lone_world() -> WorldMap {
    let mut world = WorldMap::new();
    world.get_or_insert("Solo");
    world
}

/// `n` cities in an east-west chain: C0 ↔ C1 ↔ … ↔ Cn-1.
fn chain_world(n: usize) -> WorldMap {
    let mut world = WorldMap::new();
    for i in 0..n.saturating_sub(1) {
        world.link(&format!("C{i}"), Direction::East, &format!("C{}", i + 1));
    }
    world
}

/// Seed an alien into a city the way the orchestrator does.
fn place(city: &CityRef, id: AlienId) {
    assert!(city.lay_siege(id));
    city.invade(id);
}

// ── Run loop ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_loop {
    use super::*;

    #[tokio::test]
    async fn seeded_on_rubble_dies_with_zero_moves() {
        let mut world = pair_world();
        let foo = world.get_or_insert("Foo");
        foo.demolish();

        let (tx, mut rx) = mpsc::channel(1);
        Alien::new(AlienId(1))
            .run(foo, CancellationToken::new(), tx)
            .await;

        let done = rx.recv().await.unwrap();
        assert_eq!(done.fate, AlienFate::Killed);
        assert_eq!(done.moves, 0);
    }

    #[tokio::test]
    async fn walled_in_alien_dies_without_moving() {
        let mut world = lone_world();
        let solo = world.get_or_insert("Solo");
        place(&solo, AlienId(1));

        let (tx, mut rx) = mpsc::channel(1);
        Alien::new(AlienId(1))
            .run(solo.clone(), CancellationToken::new(), tx)
            .await;

        let done = rx.recv().await.unwrap();
        assert_eq!(done.fate, AlienFate::Killed);
        assert_eq!(done.moves, 0);
        // The corpse keeps its spot; the city itself still stands.
        assert!(solo.has_invader(AlienId(1)));
        assert!(!solo.is_destroyed());
    }

    #[tokio::test]
    async fn lone_alien_on_a_pair_exhausts_its_budget() {
        let mut world = pair_world();
        let foo = world.get_or_insert("Foo");
        let bar = world.get_or_insert("Bar");
        place(&foo, AlienId(1));

        let (tx, mut rx) = mpsc::channel(1);
        Alien::new(AlienId(1))
            .run(foo.clone(), CancellationToken::new(), tx)
            .await;

        let done = rx.recv().await.unwrap();
        assert_eq!(done.fate, AlienFate::Exhausted);
        assert_eq!(done.moves, MAX_ALIEN_MOVES);
        // One alien alone can never trip the two-invader threshold.
        assert!(!foo.is_destroyed());
        assert!(!bar.is_destroyed());
    }

    #[tokio::test]
    async fn cancelled_alien_exits_silently() {
        let mut world = pair_world();
        let foo = world.get_or_insert("Foo");
        place(&foo, AlienId(1));

        let cancel = CancellationToken::new();
        cancel.cancel();

        let (tx, mut rx) = mpsc::channel(1);
        Alien::new(AlienId(1)).run(foo, cancel, tx).await;

        // No completion message of any kind.
        assert!(matches!(
            rx.try_recv(),
            Err(mpsc::error::TryRecvError::Disconnected)
        ));
    }
}

// ── Orchestrator ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod invasion {
    use super::*;
    use crate::InvasionReport;

    #[tokio::test]
    async fn empty_world_returns_immediately() {
        let mut world = WorldMap::new();
        let cancel = CancellationToken::new();
        let report = simulate_invasion(&mut world, 1_000, &cancel).await;
        assert_eq!(report, InvasionReport::default());
        assert!(world.is_empty());
    }

    #[tokio::test]
    async fn zero_aliens_is_a_no_op() {
        let mut world = pair_world();
        let cancel = CancellationToken::new();
        let report = simulate_invasion(&mut world, 0, &cancel).await;
        assert_eq!(report, InvasionReport::default());
        assert_eq!(world.len(), 2);
    }

    #[tokio::test]
    async fn single_trapped_alien_leaves_the_city_standing() {
        let mut world = lone_world();
        let cancel = CancellationToken::new();
        let report = simulate_invasion(&mut world, 1, &cancel).await;
        assert_eq!(report.launched, 1);
        assert_eq!(report.killed, 1);
        assert_eq!(report.cities_destroyed, 0);
        assert_eq!(world.len(), 1);
    }

    #[tokio::test]
    async fn two_seeds_on_one_city_destroy_it_at_seed_time() {
        let mut world = lone_world();
        let cancel = CancellationToken::new();
        let report = simulate_invasion(&mut world, 2, &cancel).await;
        assert_eq!(report.launched, 2);
        assert_eq!(report.killed, 2);
        assert_eq!(report.exhausted, 0);
        assert_eq!(report.cities_destroyed, 1);
        assert!(world.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn pair_duel_destroys_exactly_one_city() {
        let mut world = pair_world();
        let cancel = CancellationToken::new();
        let report = simulate_invasion(&mut world, 2, &cancel).await;
        assert_eq!(report.launched, 2);
        assert_eq!(report.killed, 2);
        assert_eq!(report.cities_destroyed, 1);
        assert_eq!(world.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn crowd_razes_the_pair() {
        let mut world = pair_world();
        let cancel = CancellationToken::new();
        let report = simulate_invasion(&mut world, 30, &cancel).await;
        assert_eq!(report.launched + report.discarded, 30);
        assert_eq!(report.killed, report.launched);
        assert_eq!(report.cities_destroyed, 2);
        assert!(world.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn immediate_cancellation_settles_before_return() {
        let mut world = chain_world(40);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let report = simulate_invasion(&mut world, 50, &cancel).await;
        assert!(report.cancelled);
        assert_eq!(report.launched + report.discarded, 50);
        // Cancelled aliens exit without reporting a fate.
        assert_eq!(report.killed, 0);
        assert_eq!(report.exhausted, 0);
        // Pruning already happened; the table and the report agree.
        assert_eq!(world.len() + report.cities_destroyed, 40);

        // Every task has exited before the call returns, so the surviving
        // cities are fully settled: no permit is left hanging and nothing
        // mutates them afterwards.
        let snapshot: Vec<(String, bool, usize)> = world
            .cities()
            .map(|c| (c.name().to_owned(), c.is_destroyed(), c.invader_count()))
            .collect();
        for city in world.cities() {
            assert_eq!(city.siege_count(), 0, "dangling siege on {}", city.name());
        }
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        let later: Vec<(String, bool, usize)> = world
            .cities()
            .map(|c| (c.name().to_owned(), c.is_destroyed(), c.invader_count()))
            .collect();
        assert_eq!(snapshot, later);
    }

    #[tokio::test]
    async fn settle_drains_a_panicked_worker() {
        let mut workers = tokio::task::JoinSet::new();
        workers.spawn(async {});
        workers.spawn(async { panic!("alien task blew up") });
        workers.spawn(async {});
        crate::invasion::drain_workers(&mut workers).await;
        assert!(workers.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn full_pipeline_round_trip() {
        let mut world = xeno_stream::read_map(std::io::Cursor::new(CLASSIC_MAP)).unwrap();
        let cancel = CancellationToken::new();
        let report = simulate_invasion(&mut world, 10, &cancel).await;

        assert_eq!(report.launched + report.discarded, 10);
        assert_eq!(report.killed + report.exhausted, report.launched);
        assert!(world.cities().all(|c| !c.is_destroyed()));
        assert_eq!(world.len() + report.cities_destroyed, 5);

        // Whatever survived still serializes to a parseable map.
        let mut out = Vec::new();
        xeno_stream::write_map(&world, &mut out).unwrap();
        let reloaded = xeno_stream::read_map(std::io::Cursor::new(out)).unwrap();
        assert_eq!(reloaded.len(), world.len());
    }
}
