//! Session and invitation records.
//!
//! A [`Session`] is the durable record of one assessment run. It is created
//! by the lifecycle controller at start, mutated only by that controller,
//! and becomes immutable once closed (completed or abandoned).

use crate::risk::RiskBreakdown;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by illegal session-record transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionRecordError {
    /// close() called on an already-closed session
    #[error("session {0} is already closed")]
    AlreadyClosed(String),
}

/// Final scoring outcome of a session, by instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionOutcome {
    /// Arcade instrument: raw score accumulated over the countdown
    RawScore { score: i64 },

    /// Decision instrument: aggregated behavioral risk breakdown
    RiskIndex { breakdown: RiskBreakdown },
}

/// One assessment run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier (UUIDv4)
    id: String,

    /// Owning player reference
    player_id: String,

    /// Invitation that gated this session, if any
    invitation_id: Option<String>,

    /// Host timestamp the session started at (ms)
    started_at_ms: u64,

    /// Host timestamp the session closed at (ms); None while active
    completed_at_ms: Option<u64>,

    /// Elapsed duration in whole seconds; None while active
    duration_seconds: Option<u64>,

    /// Completion-rate percentage in [0, 100]; 100 only for a fully
    /// exhausted run, never extrapolated from a partial one
    completion_rate: Option<f64>,

    /// Scoring outcome; None while active
    outcome: Option<SessionOutcome>,

    /// True if the session was closed before natural completion
    abandoned: bool,
}

impl Session {
    /// Open a new session record.
    pub fn new(player_id: String, invitation_id: Option<String>, started_at_ms: u64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            player_id,
            invitation_id,
            started_at_ms,
            completed_at_ms: None,
            duration_seconds: None,
            completion_rate: None,
            outcome: None,
            abandoned: false,
        }
    }

    /// Close the record. A closed session is immutable; closing twice is a
    /// programming error and is rejected.
    pub fn close(
        &mut self,
        completed_at_ms: u64,
        completion_rate: f64,
        outcome: SessionOutcome,
        abandoned: bool,
    ) -> Result<(), SessionRecordError> {
        if self.is_closed() {
            return Err(SessionRecordError::AlreadyClosed(self.id.clone()));
        }
        let elapsed_ms = completed_at_ms.saturating_sub(self.started_at_ms);
        self.completed_at_ms = Some(completed_at_ms);
        self.duration_seconds = Some(elapsed_ms / 1000);
        self.completion_rate = Some(completion_rate.clamp(0.0, 100.0));
        self.outcome = Some(outcome);
        self.abandoned = abandoned;
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    pub fn invitation_id(&self) -> Option<&str> {
        self.invitation_id.as_deref()
    }

    pub fn started_at_ms(&self) -> u64 {
        self.started_at_ms
    }

    pub fn completed_at_ms(&self) -> Option<u64> {
        self.completed_at_ms
    }

    pub fn duration_seconds(&self) -> Option<u64> {
        self.duration_seconds
    }

    pub fn completion_rate(&self) -> Option<f64> {
        self.completion_rate
    }

    pub fn outcome(&self) -> Option<&SessionOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_closed(&self) -> bool {
        self.completed_at_ms.is_some()
    }

    pub fn is_abandoned(&self) -> bool {
        self.abandoned
    }
}

/// Invitation lifecycle states visible to this engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvitationStatus {
    Pending,
    Completed,
}

/// An invitation record consumed from the surrounding product.
///
/// The engine only reads it to gate session creation, and asks the
/// persistence collaborator to mark it completed at finalize. No other
/// lifecycle transitions happen here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invitation {
    pub id: String,
    pub player_id: String,
    pub status: InvitationStatus,
}

impl Invitation {
    pub fn new(id: String, player_id: String) -> Self {
        Self {
            id,
            player_id,
            status: InvitationStatus::Pending,
        }
    }

    /// Whether a session may still be created from this invitation.
    pub fn is_open(&self) -> bool {
        self.status == InvitationStatus::Pending
    }
}
