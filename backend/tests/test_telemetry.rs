//! Telemetry recorder ordering tests

use proptest::prelude::*;
use serde_json::json;
use wellbeing_sim_core_rs::{EventKind, RiskTier, TelemetryRecorder};

const KINDS: [EventKind; 5] = [
    EventKind::GameStarted,
    EventKind::ObjectCollected,
    EventKind::HazardStruck,
    EventKind::DecisionMade,
    EventKind::GameCompleted,
];

#[test]
fn test_events_keep_insertion_order() {
    let mut recorder = TelemetryRecorder::new("session-1".to_string());

    recorder.record(EventKind::GameStarted, 0, json!({}), None, None);
    recorder.record(
        EventKind::DecisionMade,
        1_200,
        json!({ "scenario_id": 1 }),
        Some(1_200),
        Some(RiskTier::High),
    );
    recorder.record(EventKind::GameCompleted, 20_000, json!({}), None, None);

    let events = recorder.events();
    assert_eq!(events[0].kind, EventKind::GameStarted);
    assert_eq!(events[1].kind, EventKind::DecisionMade);
    assert_eq!(events[1].decision_latency_ms, Some(1_200));
    assert_eq!(events[1].risk_tier, Some(RiskTier::High));
    assert_eq!(events[2].kind, EventKind::GameCompleted);
}

#[test]
fn test_batch_carries_session_id() {
    let mut recorder = TelemetryRecorder::new("session-xyz".to_string());
    recorder.record(EventKind::GameStarted, 0, json!({}), None, None);

    let batch = recorder.into_batch();
    assert!(batch.iter().all(|e| e.session_id == "session-xyz"));
}

#[test]
fn test_digest_stable_for_identical_batches() {
    let build = || {
        let mut recorder = TelemetryRecorder::new("s".to_string());
        recorder.record(EventKind::GameStarted, 0, json!({}), None, None);
        recorder.record(EventKind::ObjectCollected, 350, json!({"reward": 10}), None, None);
        recorder
    };

    assert_eq!(build().batch_digest(), build().batch_digest());
}

proptest! {
    /// Property 4: sequence numbers for a single session are strictly
    /// increasing with no gaps from 0 upward, whatever mix of events lands
    /// in the log.
    #[test]
    fn prop_sequences_gapless_from_zero(kind_indices in proptest::collection::vec(0usize..5, 0..120)) {
        let mut recorder = TelemetryRecorder::new("session-prop".to_string());

        for (i, kind_index) in kind_indices.iter().enumerate() {
            recorder.record(KINDS[*kind_index], i as u64 * 7, json!({}), None, None);
        }

        for (i, event) in recorder.events().iter().enumerate() {
            prop_assert_eq!(event.sequence, i as u64);
        }
        if let [.., last] = recorder.events() {
            prop_assert_eq!(last.sequence, kind_indices.len() as u64 - 1);
        }
    }
}
