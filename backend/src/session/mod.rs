//! Session lifecycle orchestration.
//!
//! The controller is the sole interface to the external persistence and
//! risk-scoring collaborators, and the only code that mutates a Session
//! record. Both instruments plug in behind [`AssessmentInstrument`], keeping
//! the controller instrument-agnostic.

pub mod controller;
pub mod ports;
pub mod scheduler;

use crate::models::session::SessionOutcome;
use crate::models::telemetry::TelemetryEvent;

pub use controller::{LifecyclePhase, SessionController, SessionError};
pub use ports::{
    InMemoryPersistence, NotifyError, PersistenceClient, PersistenceError, RecordingNotifier,
    RiskNotifier,
};
pub use scheduler::{ManualScheduler, Scheduler};

/// Which instrument produced a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstrumentKind {
    Arcade,
    Decision,
}

impl InstrumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstrumentKind::Arcade => "arcade",
            InstrumentKind::Decision => "decision",
        }
    }
}

/// Everything an instrument hands back at finalize time.
#[derive(Debug, Clone)]
pub struct SessionReport {
    /// Completion-rate percentage; 100 only for a fully exhausted run
    pub completion_rate: f64,

    /// Instrument-specific scoring outcome
    pub outcome: SessionOutcome,

    /// The ordered telemetry batch (taken from the recorder)
    pub telemetry: Vec<TelemetryEvent>,

    /// SHA-256 digest of the batch, for audit
    pub batch_digest: String,
}

/// Capability shared by both assessment instruments.
///
/// The lifecycle controller only needs start/completion/cancel/report;
/// frame-by-frame driving (ticks, choices) stays on the concrete type.
pub trait AssessmentInstrument {
    /// Which instrument this is.
    fn kind(&self) -> InstrumentKind;

    /// Enter the playing state and start recording against `session_id`.
    fn begin(&mut self, session_id: &str, now_ms: u64);

    /// True once the instrument reached natural completion.
    fn is_complete(&self) -> bool;

    /// Stop mid-run. Must cancel any pending delayed transition; no further
    /// telemetry may be emitted afterwards.
    fn cancel(&mut self, now_ms: u64);

    /// Produce the final report, surrendering the telemetry batch.
    fn report(&mut self, now_ms: u64) -> SessionReport;
}
