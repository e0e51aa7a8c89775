//! Arcade instrument engine.
//!
//! Owns the complete per-session simulation context (clock, actor, entity
//! list, particles, RNG, scoreboard, recorder) and runs the tick loop:
//!
//! ```text
//! For each tick:
//! 1. Advance the clock; finish the session when the countdown expires
//! 2. Steer the actor (damped pursuit of the input target)
//! 3. Spawn at most one entity (difficulty-scaled cadence)
//! 4. Advance entities, resolve collisions, cull fallen objects
//! 5. Score collision outcomes and record telemetry
//! 6. Advance cosmetic particles
//! ```
//!
//! The host invokes [`ArcadeInstrument::tick`] once per rendering frame with
//! its own clock; nothing here reads wall-clock time, so tests drive the
//! loop with synthetic timestamps.

use crate::arcade::motion::{self, Actor};
use crate::arcade::particles;
use crate::arcade::scoring::ScoreBoard;
use crate::arcade::spawner::{self, Spawner};
use crate::core::clock::SessionClock;
use crate::models::entity::{Particle, SimEntity};
use crate::models::session::SessionOutcome;
use crate::models::telemetry::{EventKind, TelemetryRecorder};
use crate::rng::GameRng;
use crate::session::{AssessmentInstrument, InstrumentKind, SessionReport};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

// ============================================================================
// Configuration
// ============================================================================

/// Rendering surface dimensions, supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
}

/// Player input sampled for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputState {
    /// Left key held
    pub left: bool,
    /// Right key held
    pub right: bool,
    /// Pointer/touch x position, when present it overrides the keys' base
    pub pointer_x: Option<f64>,
}

/// Complete arcade instrument configuration.
///
/// Defaults reproduce the production tuning; the RNG seed makes a session's
/// spawn sequence reproducible from its record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArcadeConfig {
    /// Countdown budget for one session (ms)
    pub countdown_ms: u64,

    /// Seed for the deterministic spawn RNG
    pub rng_seed: u64,

    /// Spawn interval at difficulty 1 (ms)
    pub initial_spawn_interval_ms: f64,

    /// Floor the spawn interval never shrinks below (ms)
    pub min_spawn_interval_ms: f64,

    /// Interval reduction per difficulty level (ms)
    pub spawn_interval_shrink_ms: f64,

    /// Difficulty growth per elapsed minute
    pub difficulty_ramp_per_minute: f64,

    /// Probability of a high-value collectible per spawn
    pub bonus_weight: f64,

    /// Probability of a hazard per spawn
    pub hazard_weight: f64,

    /// Exponential damping factor for actor movement, in (0, 1]
    pub damping: f64,

    /// Collision tolerance: overlap registers at
    /// `distance <= combined_radii * tolerance`
    pub collision_tolerance: f64,

    /// Combo bonus factor: `reward = base + floor(base * combo * factor)`
    pub combo_bonus_factor: f64,

    /// Idle window after which an unextended combo expires (ms)
    pub combo_idle_window_ms: u64,

    /// Actor collision radius
    pub actor_radius: f64,

    /// Actor target displacement per tick while a key is held
    pub actor_keyboard_speed: f64,

    /// Nearby-hazard neighborhood, horizontal half-extent
    pub near_miss_dx: f64,

    /// Nearby-hazard neighborhood, vertical half-extent
    pub near_miss_dy: f64,

    /// Entities this far past the bottom edge are culled
    pub cull_margin: f64,

    /// Hard cap on the live particle pool
    pub max_particles: usize,
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            countdown_ms: 120_000,
            rng_seed: 0x5EED_CAFE,
            initial_spawn_interval_ms: 1_000.0,
            min_spawn_interval_ms: 400.0,
            spawn_interval_shrink_ms: 100.0,
            difficulty_ramp_per_minute: 1.5,
            bonus_weight: 0.08,
            hazard_weight: 0.22,
            damping: 0.2,
            collision_tolerance: 0.8,
            combo_bonus_factor: 0.15,
            combo_idle_window_ms: 3_000,
            actor_radius: 30.0,
            actor_keyboard_speed: 8.0,
            near_miss_dx: 120.0,
            near_miss_dy: 150.0,
            cull_margin: 50.0,
            max_particles: 512,
        }
    }
}

impl ArcadeConfig {
    /// Validate tuning parameters.
    pub fn validate(&self) -> Result<(), ArcadeError> {
        if self.countdown_ms == 0 {
            return Err(ArcadeError::InvalidConfig("countdown_ms must be > 0".to_string()));
        }
        if self.min_spawn_interval_ms <= 0.0
            || self.min_spawn_interval_ms > self.initial_spawn_interval_ms
        {
            return Err(ArcadeError::InvalidConfig(
                "spawn interval floor must be positive and <= initial interval".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.bonus_weight)
            || !(0.0..=1.0).contains(&self.hazard_weight)
            || self.bonus_weight + self.hazard_weight >= 1.0
        {
            return Err(ArcadeError::InvalidConfig(
                "category weights must leave room for common collectibles".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.damping) || self.damping == 0.0 {
            return Err(ArcadeError::InvalidConfig("damping must be in (0, 1]".to_string()));
        }
        if self.collision_tolerance <= 0.0 || self.collision_tolerance > 1.0 {
            return Err(ArcadeError::InvalidConfig(
                "collision_tolerance must be in (0, 1]".to_string(),
            ));
        }
        if self.actor_radius <= 0.0 {
            return Err(ArcadeError::InvalidConfig("actor_radius must be > 0".to_string()));
        }
        Ok(())
    }
}

// ============================================================================
// Errors and tick result
// ============================================================================

/// Arcade instrument error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArcadeError {
    /// No rendering surface at init: abort before any session exists
    #[error("rendering surface unavailable")]
    SurfaceUnavailable,

    /// Configuration validation error
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// tick() called outside the running state
    #[error("instrument is not running")]
    NotRunning,
}

/// Result of a single tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickSummary {
    /// Delta since the previous tick (ms)
    pub dt_ms: u64,

    /// Elapsed session time (ms)
    pub elapsed_ms: u64,

    /// Countdown remaining (ms)
    pub remaining_ms: u64,

    /// Entities spawned this tick
    pub spawned: usize,

    /// Collectibles picked up this tick
    pub collected: usize,

    /// Hazards struck this tick
    pub hazards_struck: usize,

    /// Running score after this tick
    pub score: i64,

    /// Combo streak after this tick
    pub combo: u32,

    /// True when the countdown expired on this tick
    pub completed: bool,
}

// ============================================================================
// Instrument
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunPhase {
    Ready,
    Running,
    Complete,
    Cancelled,
}

/// The arcade assessment instrument.
///
/// Construction requires a rendering surface; a missing surface aborts
/// initialization before any session record is created. All per-session
/// state is owned here and passed explicitly into the update functions.
#[derive(Debug)]
pub struct ArcadeInstrument {
    config: ArcadeConfig,
    surface: Surface,
    phase: RunPhase,
    clock: Option<SessionClock>,
    actor: Actor,
    entities: Vec<SimEntity>,
    particles: Vec<Particle>,
    rng: GameRng,
    spawner: Spawner,
    board: ScoreBoard,
    recorder: Option<TelemetryRecorder>,
}

impl ArcadeInstrument {
    /// Create a new instrument over the given surface.
    ///
    /// # Errors
    ///
    /// * [`ArcadeError::SurfaceUnavailable`] when `surface` is `None`
    /// * [`ArcadeError::InvalidConfig`] when the tuning fails validation
    pub fn new(config: ArcadeConfig, surface: Option<Surface>) -> Result<Self, ArcadeError> {
        let surface = surface.ok_or(ArcadeError::SurfaceUnavailable)?;
        config.validate()?;

        let actor = Actor::new(&surface, config.actor_radius, config.actor_keyboard_speed);
        let rng = GameRng::new(config.rng_seed);
        let spawner = Spawner::new(&config);

        Ok(Self {
            config,
            surface,
            phase: RunPhase::Ready,
            clock: None,
            actor,
            entities: Vec::new(),
            particles: Vec::new(),
            rng,
            spawner,
            board: ScoreBoard::new(),
            recorder: None,
        })
    }

    /// Execute one simulation tick.
    ///
    /// Steps run in fixed order (clock, actor, spawner, motion, scoring,
    /// particles). After the countdown expires the first call records the
    /// completion event and returns `completed = true`; further calls fail
    /// with [`ArcadeError::NotRunning`].
    pub fn tick(&mut self, now_ms: u64, input: &InputState) -> Result<TickSummary, ArcadeError> {
        if self.phase != RunPhase::Running {
            return Err(ArcadeError::NotRunning);
        }
        let clock = match &mut self.clock {
            Some(clock) => clock,
            None => return Err(ArcadeError::NotRunning),
        };
        let recorder = match &mut self.recorder {
            Some(recorder) => recorder,
            None => return Err(ArcadeError::NotRunning),
        };

        // STEP 1: CLOCK
        let dt_ms = clock.tick(now_ms);
        let elapsed_ms = clock.elapsed_ms();

        if clock.is_expired() {
            let capped = clock.budget_ms();
            recorder.record(
                EventKind::GameCompleted,
                capped,
                json!({
                    "raw_score": self.board.score(),
                    "collected": self.board.collected(),
                    "max_combo": self.board.max_combo(),
                    "hazard_hits": self.board.hazard_hits(),
                    "risky_collections": self.board.risky_collections(),
                    "duration_seconds": capped / 1000,
                }),
                None,
                None,
            );
            self.phase = RunPhase::Complete;

            return Ok(TickSummary {
                dt_ms,
                elapsed_ms,
                remaining_ms: 0,
                spawned: 0,
                collected: 0,
                hazards_struck: 0,
                score: self.board.score(),
                combo: self.board.combo(),
                completed: true,
            });
        }

        // STEP 2: ACTOR STEERING
        self.actor.steer(input, &self.surface, self.config.damping);

        // STEP 3: SPAWN
        let mut spawned = 0;
        if let Some(entity) =
            self.spawner
                .maybe_spawn(&self.config, &self.surface, elapsed_ms, &mut self.rng)
        {
            self.entities.push(entity);
            spawned = 1;
        }

        // STEP 4: MOTION & COLLISION
        let collided = motion::advance_entities(
            &mut self.entities,
            &self.actor,
            &self.surface,
            self.config.collision_tolerance,
            self.config.cull_margin,
        );

        // STEP 5: SCORING
        let difficulty = spawner::difficulty(elapsed_ms, self.config.difficulty_ramp_per_minute);
        let mut collected = 0;
        let mut hazards_struck = 0;

        for entity in collided {
            if entity.kind.is_hazard() {
                self.board.on_hazard();
                hazards_struck += 1;

                particles::burst(
                    &mut self.particles,
                    entity.x,
                    entity.y,
                    15,
                    self.config.max_particles,
                    &mut self.rng,
                );

                recorder.record(
                    EventKind::HazardStruck,
                    elapsed_ms,
                    json!({
                        "position": { "x": entity.x, "y": entity.y },
                        "difficulty": difficulty,
                    }),
                    None,
                    None,
                );
            } else {
                let nearby_hazards = motion::count_nearby_hazards(
                    &self.entities,
                    entity.x,
                    entity.y,
                    self.config.near_miss_dx,
                    self.config.near_miss_dy,
                );
                if nearby_hazards > 0 {
                    self.board.note_risky_collection();
                }

                let reward =
                    self.board
                        .on_collect(entity.value, elapsed_ms, self.config.combo_bonus_factor);
                collected += 1;

                particles::burst(
                    &mut self.particles,
                    entity.x,
                    entity.y,
                    20,
                    self.config.max_particles,
                    &mut self.rng,
                );

                recorder.record(
                    EventKind::ObjectCollected,
                    elapsed_ms,
                    json!({
                        "entity_kind": entity.kind.as_str(),
                        "reward": reward,
                        "combo": self.board.combo(),
                        "nearby_hazards": nearby_hazards,
                        "difficulty": difficulty,
                    }),
                    None,
                    None,
                );
            }
        }

        self.board
            .expire_idle_combo(elapsed_ms, self.config.combo_idle_window_ms);

        // STEP 6: PARTICLES (cosmetic only, never feeds scoring)
        particles::step(&mut self.particles);

        Ok(TickSummary {
            dt_ms,
            elapsed_ms,
            remaining_ms: clock_remaining(&self.clock),
            spawned,
            collected,
            hazards_struck,
            score: self.board.score(),
            combo: self.board.combo(),
            completed: false,
        })
    }

    /// Adopt new surface dimensions mid-run, reclamping the actor into the
    /// new bounds.
    pub fn resize(&mut self, surface: Surface) {
        self.surface = surface;
        self.actor.reclamp(&self.surface);
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn board(&self) -> &ScoreBoard {
        &self.board
    }

    pub fn entities(&self) -> &[SimEntity] {
        &self.entities
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    /// Recorded telemetry so far (empty before `begin`).
    pub fn telemetry_len(&self) -> usize {
        self.recorder.as_ref().map_or(0, TelemetryRecorder::len)
    }
}

fn clock_remaining(clock: &Option<SessionClock>) -> u64 {
    clock.as_ref().map_or(0, SessionClock::remaining_ms)
}

impl AssessmentInstrument for ArcadeInstrument {
    fn kind(&self) -> InstrumentKind {
        InstrumentKind::Arcade
    }

    fn begin(&mut self, session_id: &str, now_ms: u64) {
        if self.phase != RunPhase::Ready {
            return;
        }
        self.clock = Some(SessionClock::start(now_ms, self.config.countdown_ms));
        let mut recorder = TelemetryRecorder::new(session_id.to_string());
        recorder.record(
            EventKind::GameStarted,
            0,
            json!({
                "countdown_ms": self.config.countdown_ms,
                "surface": { "width": self.surface.width, "height": self.surface.height },
            }),
            None,
            None,
        );
        self.recorder = Some(recorder);
        self.phase = RunPhase::Running;
    }

    fn is_complete(&self) -> bool {
        self.phase == RunPhase::Complete
    }

    fn cancel(&mut self, now_ms: u64) {
        if self.phase != RunPhase::Running {
            return;
        }
        if let Some(clock) = &mut self.clock {
            clock.tick(now_ms);
        }
        self.phase = RunPhase::Cancelled;
    }

    fn report(&mut self, _now_ms: u64) -> SessionReport {
        let completion_rate = match (&self.phase, &self.clock) {
            (RunPhase::Complete, _) => 100.0,
            (_, Some(clock)) => clock.completion_pct(),
            (_, None) => 0.0,
        };

        let (telemetry, batch_digest) = match self.recorder.take() {
            Some(recorder) => {
                let digest = recorder.batch_digest();
                (recorder.into_batch(), digest)
            }
            None => (Vec::new(), String::new()),
        };

        SessionReport {
            completion_rate,
            outcome: SessionOutcome::RawScore {
                score: self.board.score(),
            },
            telemetry,
            batch_digest,
        }
    }
}
