//! Spawner cadence and difficulty-curve tests

use proptest::prelude::*;
use wellbeing_sim_core_rs::arcade::spawner::{difficulty, spawn_interval_ms, Spawner};
use wellbeing_sim_core_rs::{ArcadeConfig, GameRng, Surface};

fn surface() -> Surface {
    Surface {
        width: 800.0,
        height: 600.0,
    }
}

#[test]
fn test_interval_shrinks_with_difficulty() {
    let config = ArcadeConfig::default();

    let early = spawn_interval_ms(difficulty(0, config.difficulty_ramp_per_minute), &config);
    let late = spawn_interval_ms(difficulty(60_000, config.difficulty_ramp_per_minute), &config);

    assert_eq!(early, 900.0); // difficulty 1.0
    assert_eq!(late, 750.0); // difficulty 2.5
}

#[test]
fn test_spawn_cadence_over_a_session() {
    let config = ArcadeConfig::default();
    let mut spawner = Spawner::new(&config);
    let mut rng = GameRng::new(42);
    let surface = surface();

    // Drive two simulated minutes at 16ms frames
    let mut spawn_times = Vec::new();
    let mut elapsed = 0u64;
    while elapsed <= 120_000 {
        if spawner
            .maybe_spawn(&config, &surface, elapsed, &mut rng)
            .is_some()
        {
            spawn_times.push(elapsed);
        }
        elapsed += 16;
    }

    assert!(!spawn_times.is_empty());

    // Gaps between consecutive spawns never drop below the floor
    for window in spawn_times.windows(2) {
        let gap = window[1] - window[0];
        assert!(
            gap as f64 >= config.min_spawn_interval_ms,
            "spawn gap {}ms dipped below the floor",
            gap
        );
    }

    // The cadence accelerates: the last gap is tighter than the first
    let first_gap = spawn_times[1] - spawn_times[0];
    let last_gap = spawn_times[spawn_times.len() - 1] - spawn_times[spawn_times.len() - 2];
    assert!(last_gap < first_gap);
}

#[test]
fn test_spawner_is_deterministic() {
    let config = ArcadeConfig::default();
    let surface = surface();

    let run = |seed: u64| {
        let mut spawner = Spawner::new(&config);
        let mut rng = GameRng::new(seed);
        let mut entities = Vec::new();
        let mut elapsed = 0u64;
        while elapsed <= 30_000 {
            if let Some(entity) = spawner.maybe_spawn(&config, &surface, elapsed, &mut rng) {
                entities.push((entity.kind, entity.x.to_bits(), entity.spawned_at_ms));
            }
            elapsed += 16;
        }
        entities
    };

    assert_eq!(run(1234), run(1234));
    assert_ne!(run(1234), run(4321));
}

proptest! {
    /// Property 1: for t1 < t2, spawn_interval(t2) <= spawn_interval(t1),
    /// bounded below by the configured floor.
    #[test]
    fn prop_spawn_interval_monotone_nonincreasing(
        t1 in 0u64..3_600_000,
        t2 in 0u64..3_600_000,
    ) {
        let config = ArcadeConfig::default();
        let (early, late) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };

        let early_interval =
            spawn_interval_ms(difficulty(early, config.difficulty_ramp_per_minute), &config);
        let late_interval =
            spawn_interval_ms(difficulty(late, config.difficulty_ramp_per_minute), &config);

        prop_assert!(late_interval <= early_interval);
        prop_assert!(late_interval >= config.min_spawn_interval_ms);
        prop_assert!(early_interval <= config.initial_spawn_interval_ms);
    }
}
