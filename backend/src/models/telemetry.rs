//! Telemetry recording for audit and downstream risk scoring.
//!
//! Every in-session occurrence worth scoring is captured as a
//! [`TelemetryEvent`] in a per-session append-only log. Events enable:
//! - Risk scoring (the external calculator replays choice/timing signals)
//! - Auditing (verify what a player actually did, in order)
//! - Debugging (reconstruct a session tick by tick)
//!
//! # Ordering Guarantee
//!
//! Each event receives the next per-session sequence number at record time.
//! Sequence numbers start at 0, are gapless and strictly increasing, and are
//! never reused or reordered. Cross-session ordering is not guaranteed.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Risk tier attached to a recorded choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Medium,
    High,
    None,
}

impl RiskTier {
    /// Short tag used in payloads and persistence rows.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
            RiskTier::None => "none",
        }
    }
}

/// Kind of observed occurrence.
///
/// Both instruments share this vocabulary; not every kind is emitted by
/// every instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Session entered its playing state
    GameStarted,
    /// Arcade: a collectible was picked up
    ObjectCollected,
    /// Arcade: the actor overlapped a hazard
    HazardStruck,
    /// Decision: an option was chosen for the current scenario
    DecisionMade,
    /// Session reached natural completion
    GameCompleted,
}

impl EventKind {
    /// Stable tag for persistence and queries.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::GameStarted => "game_started",
            EventKind::ObjectCollected => "object_collected",
            EventKind::HazardStruck => "hazard_struck",
            EventKind::DecisionMade => "decision_made",
            EventKind::GameCompleted => "game_completed",
        }
    }
}

/// One observed occurrence within a session.
///
/// Timestamps are milliseconds relative to session start, so a batch is
/// self-contained regardless of the host clock it was captured against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryEvent {
    /// Owning session id
    pub session_id: String,

    /// Event kind tag
    pub kind: EventKind,

    /// Milliseconds since session start
    pub timestamp_ms: u64,

    /// Per-session sequence number (gapless, strictly increasing from 0)
    pub sequence: u64,

    /// Time taken to make the recorded decision, when applicable
    pub decision_latency_ms: Option<u64>,

    /// Risk tier of the recorded choice, when applicable
    pub risk_tier: Option<RiskTier>,

    /// Kind-specific structured detail
    pub payload: serde_json::Value,
}

/// Append-only per-session event log.
///
/// The recorder buffers events in memory until session completion, at which
/// point the whole ordered batch is taken by the lifecycle controller and
/// handed to the persistence collaborator.
///
/// # Example
/// ```
/// use wellbeing_sim_core_rs::{EventKind, TelemetryRecorder};
/// use serde_json::json;
///
/// let mut recorder = TelemetryRecorder::new("session-1".to_string());
/// recorder.record(EventKind::GameStarted, 0, json!({}), None, None);
/// assert_eq!(recorder.len(), 1);
/// assert_eq!(recorder.events()[0].sequence, 0);
/// ```
#[derive(Debug, Clone)]
pub struct TelemetryRecorder {
    session_id: String,
    next_sequence: u64,
    events: Vec<TelemetryEvent>,
}

impl TelemetryRecorder {
    /// Create an empty recorder bound to a session.
    pub fn new(session_id: String) -> Self {
        Self {
            session_id,
            next_sequence: 0,
            events: Vec::new(),
        }
    }

    /// Append an event, assigning it the next sequence number.
    ///
    /// Returns the sequence number the event received.
    pub fn record(
        &mut self,
        kind: EventKind,
        timestamp_ms: u64,
        payload: serde_json::Value,
        decision_latency_ms: Option<u64>,
        risk_tier: Option<RiskTier>,
    ) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.events.push(TelemetryEvent {
            session_id: self.session_id.clone(),
            kind,
            timestamp_ms,
            sequence,
            decision_latency_ms,
            risk_tier,
            payload,
        });
        sequence
    }

    /// Number of events recorded so far.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the log is empty.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The session this recorder belongs to.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// All recorded events, in sequence order.
    pub fn events(&self) -> &[TelemetryEvent] {
        &self.events
    }

    /// Events of a specific kind, in sequence order.
    pub fn events_of_kind(&self, kind: EventKind) -> Vec<&TelemetryEvent> {
        self.events.iter().filter(|e| e.kind == kind).collect()
    }

    /// SHA-256 digest over the ordered (sequence, kind, timestamp) triples,
    /// hex-encoded. Attached to the flushed batch so auditors can detect
    /// reordering or truncation after the fact.
    pub fn batch_digest(&self) -> String {
        let mut hasher = Sha256::new();
        for event in &self.events {
            hasher.update(event.sequence.to_be_bytes());
            hasher.update(event.kind.as_str().as_bytes());
            hasher.update(event.timestamp_ms.to_be_bytes());
        }
        let digest = hasher.finalize();
        digest.iter().map(|b| format!("{:02x}", b)).collect()
    }

    /// Consume the recorder, yielding the ordered batch.
    pub fn into_batch(self) -> Vec<TelemetryEvent> {
        self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sequences_start_at_zero_and_increment() {
        let mut recorder = TelemetryRecorder::new("s".to_string());
        assert_eq!(recorder.record(EventKind::GameStarted, 0, json!({}), None, None), 0);
        assert_eq!(
            recorder.record(EventKind::ObjectCollected, 100, json!({}), None, None),
            1
        );
        assert_eq!(recorder.record(EventKind::GameCompleted, 200, json!({}), None, None), 2);
    }

    #[test]
    fn test_events_of_kind() {
        let mut recorder = TelemetryRecorder::new("s".to_string());
        recorder.record(EventKind::GameStarted, 0, json!({}), None, None);
        recorder.record(EventKind::ObjectCollected, 50, json!({}), None, None);
        recorder.record(EventKind::ObjectCollected, 90, json!({}), None, None);

        assert_eq!(recorder.events_of_kind(EventKind::ObjectCollected).len(), 2);
        assert_eq!(recorder.events_of_kind(EventKind::HazardStruck).len(), 0);
    }

    #[test]
    fn test_batch_digest_changes_with_order() {
        let mut a = TelemetryRecorder::new("s".to_string());
        a.record(EventKind::GameStarted, 0, json!({}), None, None);
        a.record(EventKind::GameCompleted, 10, json!({}), None, None);

        let mut b = TelemetryRecorder::new("s".to_string());
        b.record(EventKind::GameCompleted, 10, json!({}), None, None);
        b.record(EventKind::GameStarted, 0, json!({}), None, None);

        assert_ne!(a.batch_digest(), b.batch_digest());
    }

    #[test]
    fn test_risk_tier_tags() {
        assert_eq!(RiskTier::Low.as_str(), "low");
        assert_eq!(RiskTier::None.as_str(), "none");
        assert_eq!(EventKind::HazardStruck.as_str(), "hazard_struck");
    }
}
