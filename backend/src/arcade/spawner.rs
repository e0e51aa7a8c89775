//! Entity spawning with difficulty-scaled cadence.
//!
//! New objects appear whenever the time since the last spawn exceeds the
//! current spawn interval. The interval shrinks as difficulty rises with
//! elapsed time, but never drops below a configured floor so the instrument
//! stays playable. Category selection is a weighted draw through the
//! injected seeded RNG: same seed, same spawn sequence.

use crate::arcade::engine::{ArcadeConfig, Surface};
use crate::models::entity::{EntityKind, SimEntity};
use crate::rng::GameRng;

/// Horizontal margin kept free on each side of the playfield when placing
/// spawns.
const SPAWN_EDGE_MARGIN: f64 = 20.0;

/// Difficulty factor for a given elapsed session time.
///
/// Grows linearly: `1 + elapsed_minutes * ramp`. Monotonically increasing,
/// which makes the spawn interval monotonically non-increasing.
pub fn difficulty(elapsed_ms: u64, ramp_per_minute: f64) -> f64 {
    1.0 + (elapsed_ms as f64 / 60_000.0) * ramp_per_minute
}

/// Spawn interval for a given difficulty, clamped to the configured floor.
pub fn spawn_interval_ms(difficulty: f64, config: &ArcadeConfig) -> f64 {
    (config.initial_spawn_interval_ms - difficulty * config.spawn_interval_shrink_ms)
        .max(config.min_spawn_interval_ms)
}

/// Creates new entities on a difficulty-scaled cadence.
#[derive(Debug, Clone)]
pub struct Spawner {
    next_entity_id: u64,
    last_spawn_ms: u64,
    current_interval_ms: f64,
}

impl Spawner {
    pub fn new(config: &ArcadeConfig) -> Self {
        Self {
            next_entity_id: 0,
            last_spawn_ms: 0,
            current_interval_ms: config.initial_spawn_interval_ms,
        }
    }

    /// Spawn at most one entity if the cadence allows it.
    ///
    /// On a spawn the interval is re-derived from the current difficulty, so
    /// later spawns come faster (down to the floor).
    pub fn maybe_spawn(
        &mut self,
        config: &ArcadeConfig,
        surface: &Surface,
        elapsed_ms: u64,
        rng: &mut GameRng,
    ) -> Option<SimEntity> {
        if (elapsed_ms - self.last_spawn_ms) as f64 <= self.current_interval_ms {
            return None;
        }

        let difficulty = difficulty(elapsed_ms, config.difficulty_ramp_per_minute);
        self.last_spawn_ms = elapsed_ms;
        self.current_interval_ms = spawn_interval_ms(difficulty, config);

        Some(self.spawn(config, surface, elapsed_ms, difficulty, rng))
    }

    fn spawn(
        &mut self,
        config: &ArcadeConfig,
        surface: &Surface,
        elapsed_ms: u64,
        difficulty: f64,
        rng: &mut GameRng,
    ) -> SimEntity {
        let kind = draw_kind(config, rng);
        let radius = kind.radius();

        let min_x = SPAWN_EDGE_MARGIN + radius;
        let max_x = (surface.width - SPAWN_EDGE_MARGIN - radius).max(min_x + 1.0);
        let x = rng.range_f64(min_x, max_x);

        let id = self.next_entity_id;
        self.next_entity_id += 1;

        SimEntity {
            id,
            x,
            // Spawn just above the visible playfield
            y: -radius,
            speed: fall_speed(kind, difficulty),
            radius,
            kind,
            value: kind.base_value(),
            spawned_at_ms: elapsed_ms,
        }
    }

    /// Number of entities spawned so far.
    pub fn spawned_count(&self) -> u64 {
        self.next_entity_id
    }

    /// Current spawn interval in milliseconds.
    pub fn current_interval_ms(&self) -> f64 {
        self.current_interval_ms
    }
}

/// Weighted category draw: a minority of high-value collectibles, a
/// significant minority of hazards, the rest common collectibles.
pub fn draw_kind(config: &ArcadeConfig, rng: &mut GameRng) -> EntityKind {
    let roll = rng.unit_f64();
    if roll > 1.0 - config.bonus_weight {
        EntityKind::Bonus
    } else if roll > 1.0 - config.bonus_weight - config.hazard_weight {
        EntityKind::Hazard
    } else {
        EntityKind::Collectible
    }
}

/// Fall speed scales with difficulty; hazards ramp hardest.
pub fn fall_speed(kind: EntityKind, difficulty: f64) -> f64 {
    match kind {
        EntityKind::Collectible => 2.0 + difficulty * 0.5,
        EntityKind::Bonus => 2.5 + difficulty * 0.5,
        EntityKind::Hazard => 3.0 + difficulty * 0.8,
    }
}
