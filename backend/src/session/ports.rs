//! External-collaborator ports.
//!
//! The engine never talks to a database or network directly; the lifecycle
//! controller goes through these traits. In-memory implementations live
//! here, available in all builds, so integration tests can assert on
//! exactly what was flushed.

use crate::models::session::Session;
use crate::models::telemetry::TelemetryEvent;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Persistence-boundary failures. Best-effort at every call site: the
/// controller logs these and carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// The collaborator refused the write (constraint violation)
    #[error("persistence rejected the write: {0}")]
    Rejected(String),

    /// The collaborator could not be reached
    #[error("persistence unavailable: {0}")]
    Unavailable(String),
}

/// Risk-notification failures. Never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifyError {
    #[error("risk calculator unreachable: {0}")]
    Unreachable(String),
}

/// Writes session and telemetry records to the surrounding product.
pub trait PersistenceClient {
    /// Insert a freshly opened session record.
    fn create_session(&mut self, session: &Session) -> Result<(), PersistenceError>;

    /// Overwrite a session record with its closed state.
    fn complete_session(&mut self, session: &Session) -> Result<(), PersistenceError>;

    /// Append one session's ordered telemetry batch.
    fn append_telemetry(&mut self, batch: &[TelemetryEvent]) -> Result<(), PersistenceError>;

    /// Mark an invitation completed. The only invitation transition this
    /// engine performs.
    fn complete_invitation(&mut self, invitation_id: &str) -> Result<(), PersistenceError>;
}

/// Fire-and-forget invocation of the external risk calculator.
///
/// Contract: at-most-once delivery, best-effort. The engine neither waits
/// for nor processes a response; the calculator writes its score back
/// through the persistence layer on its own time. A failed notification is
/// logged and lost.
pub trait RiskNotifier {
    fn notify(&mut self, session_id: &str) -> Result<(), NotifyError>;
}

// ============================================================================
// In-memory implementations
// ============================================================================

/// In-memory persistence for tests and demo mode.
///
/// Enforces the one-active-session-per-invitation invariant the way the
/// production store does, and exposes everything it swallowed for
/// assertions. The `fail_*` switches simulate network failures.
#[derive(Debug, Default)]
pub struct InMemoryPersistence {
    sessions: HashMap<String, Session>,
    telemetry: HashMap<String, Vec<TelemetryEvent>>,
    completed_invitations: Vec<String>,
    active_invitations: HashSet<String>,

    /// Simulate an unreachable store for session writes
    pub fail_sessions: bool,
    /// Simulate an unreachable store for telemetry writes
    pub fail_telemetry: bool,
}

impl InMemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self, id: &str) -> Option<&Session> {
        self.sessions.get(id)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn telemetry_for(&self, session_id: &str) -> &[TelemetryEvent] {
        self.telemetry
            .get(session_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn invitation_completed(&self, invitation_id: &str) -> bool {
        self.completed_invitations
            .iter()
            .any(|id| id == invitation_id)
    }
}

impl PersistenceClient for InMemoryPersistence {
    fn create_session(&mut self, session: &Session) -> Result<(), PersistenceError> {
        if self.fail_sessions {
            return Err(PersistenceError::Unavailable("session store down".to_string()));
        }
        if let Some(invitation_id) = session.invitation_id() {
            if !self.active_invitations.insert(invitation_id.to_string()) {
                return Err(PersistenceError::Rejected(format!(
                    "invitation {} already has an active session",
                    invitation_id
                )));
            }
        }
        self.sessions.insert(session.id().to_string(), session.clone());
        Ok(())
    }

    fn complete_session(&mut self, session: &Session) -> Result<(), PersistenceError> {
        if self.fail_sessions {
            return Err(PersistenceError::Unavailable("session store down".to_string()));
        }
        if let Some(invitation_id) = session.invitation_id() {
            self.active_invitations.remove(invitation_id);
        }
        self.sessions.insert(session.id().to_string(), session.clone());
        Ok(())
    }

    fn append_telemetry(&mut self, batch: &[TelemetryEvent]) -> Result<(), PersistenceError> {
        if self.fail_telemetry {
            return Err(PersistenceError::Unavailable("telemetry store down".to_string()));
        }
        for event in batch {
            self.telemetry
                .entry(event.session_id.clone())
                .or_default()
                .push(event.clone());
        }
        Ok(())
    }

    fn complete_invitation(&mut self, invitation_id: &str) -> Result<(), PersistenceError> {
        if self.fail_sessions {
            return Err(PersistenceError::Unavailable("session store down".to_string()));
        }
        self.completed_invitations.push(invitation_id.to_string());
        Ok(())
    }
}

/// Records every notification instead of sending one.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub notified: Vec<String>,
    /// Simulate an unreachable calculator
    pub fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RiskNotifier for RecordingNotifier {
    fn notify(&mut self, session_id: &str) -> Result<(), NotifyError> {
        if self.fail {
            return Err(NotifyError::Unreachable("calculator down".to_string()));
        }
        self.notified.push(session_id.to_string());
        Ok(())
    }
}
