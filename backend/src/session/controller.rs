//! Session lifecycle controller.
//!
//! ```text
//! Idle -> Active -> Finalizing -> Closed
//! ```
//!
//! The controller owns the Session record for its whole life: it creates the
//! record at start, is the only code that mutates it, and closes it exactly
//! once. Boundary failures (session creation, telemetry flush, the risk
//! invocation) are logged and never retried; the session still closes
//! locally, accepting silent data loss for that one session as the
//! documented worst case.

use crate::models::session::{Invitation, Session, SessionRecordError};
use crate::session::ports::{PersistenceClient, RiskNotifier};
use crate::session::scheduler::Scheduler;
use crate::session::{AssessmentInstrument, SessionReport};
use thiserror::Error;

/// Lifecycle states of one controller (one session).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    Idle,
    Active,
    Finalizing,
    Closed,
}

/// Lifecycle errors. Boundary failures are not here; those are logged and
/// swallowed per the best-effort contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// start() called twice
    #[error("session already started")]
    AlreadyStarted,

    /// cancel() without an active session
    #[error("no active session")]
    NotActive,

    /// The invitation was already used up
    #[error("invitation {0} is not open")]
    InvitationClosed(String),

    /// Illegal record transition (double close)
    #[error(transparent)]
    Record(#[from] SessionRecordError),
}

/// Orchestrates start -> run -> complete for one assessment session.
pub struct SessionController<I, P, R, S>
where
    I: AssessmentInstrument,
    P: PersistenceClient,
    R: RiskNotifier,
    S: Scheduler,
{
    instrument: I,
    persistence: P,
    notifier: R,
    scheduler: S,
    session: Option<Session>,
    invitation_id: Option<String>,
    phase: LifecyclePhase,
}

impl<I, P, R, S> SessionController<I, P, R, S>
where
    I: AssessmentInstrument,
    P: PersistenceClient,
    R: RiskNotifier,
    S: Scheduler,
{
    pub fn new(instrument: I, persistence: P, notifier: R, scheduler: S) -> Self {
        Self {
            instrument,
            persistence,
            notifier,
            scheduler,
            session: None,
            invitation_id: None,
            phase: LifecyclePhase::Idle,
        }
    }

    /// Start a session: create the record, begin the instrument, schedule
    /// ticks.
    ///
    /// The invitation gate is checked first: a consumed invitation refuses
    /// a new session. A failing persistence write is logged and the session
    /// continues (best-effort contract).
    pub fn start(
        &mut self,
        player_id: &str,
        invitation: Option<&Invitation>,
        now_ms: u64,
    ) -> Result<&Session, SessionError> {
        if self.phase != LifecyclePhase::Idle {
            return Err(SessionError::AlreadyStarted);
        }
        if let Some(invitation) = invitation {
            if !invitation.is_open() {
                return Err(SessionError::InvitationClosed(invitation.id.clone()));
            }
        }

        let session = Session::new(
            player_id.to_string(),
            invitation.map(|inv| inv.id.clone()),
            now_ms,
        );

        if let Err(error) = self.persistence.create_session(&session) {
            log::warn!(
                "session {} creation not persisted (continuing best-effort): {}",
                session.id(),
                error
            );
        }

        self.instrument.begin(session.id(), now_ms);
        self.scheduler.schedule();
        self.invitation_id = invitation.map(|inv| inv.id.clone());
        self.phase = LifecyclePhase::Active;

        Ok(self.session.insert(session))
    }

    /// The wrapped instrument, for frame-by-frame driving.
    pub fn instrument(&self) -> &I {
        &self.instrument
    }

    /// Mutable access to the instrument (ticks, choices).
    pub fn instrument_mut(&mut self) -> &mut I {
        &mut self.instrument
    }

    /// Check for natural completion; finalizes when the instrument is done.
    pub fn poll(&mut self, now_ms: u64) -> Result<LifecyclePhase, SessionError> {
        if self.phase == LifecyclePhase::Active && self.instrument.is_complete() {
            self.finalize(now_ms, false)?;
        }
        Ok(self.phase)
    }

    /// Stop a running session (navigation away, host shutdown). Cancels the
    /// scheduler and any pending instrument transition, then closes the
    /// record as abandoned. No risk notification is issued for an
    /// incomplete session.
    pub fn cancel(&mut self, now_ms: u64) -> Result<(), SessionError> {
        if self.phase != LifecyclePhase::Active {
            return Err(SessionError::NotActive);
        }
        self.instrument.cancel(now_ms);
        self.finalize(now_ms, true)
    }

    fn finalize(&mut self, now_ms: u64, abandoned: bool) -> Result<(), SessionError> {
        self.phase = LifecyclePhase::Finalizing;
        self.scheduler.cancel();

        let report = self.instrument.report(now_ms);
        let session = match &mut self.session {
            Some(session) => session,
            None => return Err(SessionError::NotActive),
        };

        session.close(now_ms, report.completion_rate, report.outcome.clone(), abandoned)?;
        let session_id = session.id().to_string();

        self.flush(&report);

        if !abandoned {
            // Fire-and-forget: at-most-once, no retry
            if let Err(error) = self.notifier.notify(&session_id) {
                log::warn!("risk notification for session {} lost: {}", session_id, error);
            }
        }

        self.phase = LifecyclePhase::Closed;
        Ok(())
    }

    /// Flush the telemetry batch and the closed session record, best-effort.
    fn flush(&mut self, report: &SessionReport) {
        let session = match &self.session {
            Some(session) => session,
            None => return,
        };

        if !report.telemetry.is_empty() {
            if let Err(error) = self.persistence.append_telemetry(&report.telemetry) {
                log::warn!(
                    "telemetry batch for session {} lost ({} events, digest {}): {}",
                    session.id(),
                    report.telemetry.len(),
                    report.batch_digest,
                    error
                );
            }
        }

        if let Err(error) = self.persistence.complete_session(session) {
            log::warn!("session {} completion not persisted: {}", session.id(), error);
        }

        if let Some(invitation_id) = &self.invitation_id {
            if let Err(error) = self.persistence.complete_invitation(invitation_id) {
                log::warn!("invitation {} not marked completed: {}", invitation_id, error);
            }
        }
    }

    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    pub fn notifier(&self) -> &R {
        &self.notifier
    }
}
