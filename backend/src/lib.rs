//! Wellbeing Assessment Core - Simulation Engine
//!
//! Deterministic behavioral-assessment engine producing session records and
//! an ordered telemetry log for downstream risk scoring.
//!
//! # Architecture
//!
//! - **core**: Session clock (countdown budget, frame delta derivation)
//! - **models**: Domain types (Session, TelemetryEvent, SimEntity, Scenario)
//! - **arcade**: Real-time arcade instrument (spawner, motion, scoring)
//! - **decision**: Branching decision-scenario instrument
//! - **risk**: Behavioral risk aggregation (pure functions)
//! - **session**: Lifecycle controller and external-collaborator ports
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. Telemetry sequence numbers are gapless and strictly increasing per session
//! 2. All randomness is deterministic (seeded RNG)
//! 3. The behavioral risk index is always within [0, 100]
//! 4. A closed session is never mutated again

// Module declarations
pub mod arcade;
pub mod core;
pub mod decision;
pub mod models;
pub mod risk;
pub mod rng;
pub mod session;

// Re-exports for convenience
pub use crate::core::clock::SessionClock;
pub use arcade::{ArcadeConfig, ArcadeError, ArcadeInstrument, InputState, Surface, TickSummary};
pub use decision::{default_deck, DecisionError, DecisionInstrument, DecisionStatus};
pub use models::{
    entity::{EntityKind, Particle, SimEntity},
    scenario::{Scenario, ScenarioCategory, ScenarioOption},
    session::{Invitation, InvitationStatus, Session, SessionOutcome},
    telemetry::{EventKind, RiskTier, TelemetryEvent, TelemetryRecorder},
};
pub use risk::{aggregate, RiskBreakdown, RiskTally};
pub use rng::GameRng;
pub use session::{
    AssessmentInstrument, InMemoryPersistence, InstrumentKind, LifecyclePhase, ManualScheduler,
    NotifyError, PersistenceClient, PersistenceError, RecordingNotifier, RiskNotifier, Scheduler,
    SessionController, SessionError, SessionReport,
};
