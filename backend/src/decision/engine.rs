//! Decision instrument engine.
//!
//! A strictly linear, non-restartable state machine:
//!
//! ```text
//! Instructions -> Playing -> Completed
//! ```
//!
//! One scenario is live at a time. A choice records its decision latency and
//! tier, then arms a fixed-duration feedback window; the next scenario only
//! appears once the window elapses (via [`DecisionInstrument::poll`]). The
//! pending advance is a single cancellable transition: a new choice can never
//! overlap it, and cancellation clears it so nothing fires afterwards.

use crate::models::scenario::Scenario;
use crate::models::session::SessionOutcome;
use crate::models::telemetry::{EventKind, RiskTier, TelemetryRecorder};
use crate::risk::{aggregate, RiskTally};
use crate::session::{AssessmentInstrument, InstrumentKind, SessionReport};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

/// Decision instrument tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionConfig {
    /// How long the consequence panel stays up before auto-advance (ms)
    pub feedback_duration_ms: u64,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            feedback_duration_ms: 2_500,
        }
    }
}

/// Decision instrument error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecisionError {
    /// Construction with no scenarios
    #[error("scenario deck is empty")]
    EmptyDeck,

    /// choose() outside the playing state
    #[error("instrument is not accepting choices")]
    NotPlaying,

    /// choose() while the feedback panel is still up
    #[error("feedback pending, next scenario not live yet")]
    FeedbackPending,

    /// Option index out of range for the live scenario
    #[error("scenario {scenario_id} has no option {index}")]
    InvalidOption { scenario_id: u32, index: usize },
}

/// Externally visible machine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionStatus {
    Instructions,
    Playing,
    Completed,
}

/// What a successful choice produced, for the host's feedback panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceReceipt {
    pub scenario_id: u32,
    pub decision_time_ms: u64,
    pub risk: RiskTier,
    pub expected_return_pct: i32,
    pub consequence: String,
    /// When the feedback window elapses and the engine may advance
    pub feedback_until_ms: u64,
}

/// The decision-scenario assessment instrument.
#[derive(Debug)]
pub struct DecisionInstrument {
    config: DecisionConfig,
    deck: Vec<Scenario>,
    status: DecisionStatus,
    cancelled: bool,
    current_index: usize,
    started_at_ms: u64,
    decision_started_at_ms: u64,
    /// The single pending auto-advance, if armed
    feedback_until_ms: Option<u64>,
    tally: RiskTally,
    total_return_pct: i64,
    decision_times_ms: Vec<u64>,
    recorder: Option<TelemetryRecorder>,
}

impl DecisionInstrument {
    /// Create an instrument over a fixed deck.
    pub fn new(config: DecisionConfig, deck: Vec<Scenario>) -> Result<Self, DecisionError> {
        if deck.is_empty() {
            return Err(DecisionError::EmptyDeck);
        }
        Ok(Self {
            config,
            deck,
            status: DecisionStatus::Instructions,
            cancelled: false,
            current_index: 0,
            started_at_ms: 0,
            decision_started_at_ms: 0,
            feedback_until_ms: None,
            tally: RiskTally::default(),
            total_return_pct: 0,
            decision_times_ms: Vec::new(),
            recorder: None,
        })
    }

    /// Convenience constructor over the production deck.
    pub fn with_default_deck() -> Self {
        // The default deck is non-empty by construction
        match Self::new(DecisionConfig::default(), crate::decision::deck::default_deck()) {
            Ok(instrument) => instrument,
            Err(_) => unreachable!("default deck is non-empty"),
        }
    }

    /// The scenario currently live, if playing.
    pub fn current_scenario(&self) -> Option<&Scenario> {
        if self.status != DecisionStatus::Playing {
            return None;
        }
        self.deck.get(self.current_index)
    }

    /// Number of scenarios answered so far.
    pub fn answered(&self) -> usize {
        self.decision_times_ms.len()
    }

    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    pub fn status(&self) -> DecisionStatus {
        self.status
    }

    pub fn tally(&self) -> &RiskTally {
        &self.tally
    }

    pub fn total_return_pct(&self) -> i64 {
        self.total_return_pct
    }

    /// True while a feedback window is pending.
    pub fn feedback_pending(&self) -> bool {
        self.feedback_until_ms.is_some()
    }

    /// Record a choice for the live scenario.
    ///
    /// Rejected while the feedback window is up: the auto-advance is a
    /// single transition that never overlaps a new manual choice.
    pub fn choose(&mut self, option_index: usize, now_ms: u64) -> Result<ChoiceReceipt, DecisionError> {
        if self.cancelled || self.status != DecisionStatus::Playing {
            return Err(DecisionError::NotPlaying);
        }
        if self.feedback_until_ms.is_some() {
            return Err(DecisionError::FeedbackPending);
        }

        let scenario = &self.deck[self.current_index];
        let option = scenario
            .option(option_index)
            .ok_or(DecisionError::InvalidOption {
                scenario_id: scenario.id,
                index: option_index,
            })?;

        let decision_time_ms = now_ms.saturating_sub(self.decision_started_at_ms);
        let receipt = ChoiceReceipt {
            scenario_id: scenario.id,
            decision_time_ms,
            risk: option.risk,
            expected_return_pct: option.expected_return_pct,
            consequence: option.consequence.clone(),
            feedback_until_ms: now_ms + self.config.feedback_duration_ms,
        };
        let payload = json!({
            "scenario_id": scenario.id,
            "scenario_category": scenario.category.as_str(),
            "decision_time_ms": decision_time_ms,
            "risk_level": option.risk.as_str(),
            "expected_return": option.expected_return_pct,
            "choice_label": option.label,
        });
        let risk = option.risk;

        self.decision_times_ms.push(decision_time_ms);
        self.total_return_pct += i64::from(receipt.expected_return_pct);
        match risk {
            RiskTier::Low => self.tally.low += 1,
            RiskTier::Medium => self.tally.medium += 1,
            RiskTier::High => self.tally.high += 1,
            RiskTier::None => {}
        }

        if let Some(recorder) = &mut self.recorder {
            recorder.record(
                EventKind::DecisionMade,
                now_ms.saturating_sub(self.started_at_ms),
                payload,
                Some(decision_time_ms),
                Some(risk),
            );
        }

        self.feedback_until_ms = Some(receipt.feedback_until_ms);
        Ok(receipt)
    }

    /// Consume an elapsed feedback window: advance to the next scenario, or
    /// complete after the final one. Safe to call every frame; does nothing
    /// while the window is still open.
    pub fn poll(&mut self, now_ms: u64) -> DecisionStatus {
        if self.cancelled || self.status != DecisionStatus::Playing {
            return self.status;
        }
        match self.feedback_until_ms {
            Some(until) if now_ms >= until => {}
            _ => return self.status,
        }

        self.feedback_until_ms = None;
        if self.current_index + 1 < self.deck.len() {
            self.current_index += 1;
            self.decision_started_at_ms = now_ms;
        } else {
            self.complete(now_ms);
        }
        self.status
    }

    fn complete(&mut self, now_ms: u64) {
        self.status = DecisionStatus::Completed;

        let breakdown = aggregate(&self.tally, &self.decision_times_ms);
        let elapsed_ms = now_ms.saturating_sub(self.started_at_ms);

        if let Some(recorder) = &mut self.recorder {
            recorder.record(
                EventKind::GameCompleted,
                elapsed_ms,
                json!({
                    "duration_seconds": elapsed_ms / 1000,
                    "completion_rate": 100.0,
                    "total_decisions": self.tally.total(),
                    "avg_decision_time_ms": breakdown.avg_decision_time_ms,
                    "risk_distribution": {
                        "low": self.tally.low,
                        "medium": self.tally.medium,
                        "high": self.tally.high,
                    },
                    "risk_score": breakdown.risk_score,
                    "impulsivity_score": breakdown.impulsivity_score,
                    "rapid_decision_rate": breakdown.rapid_decision_rate,
                    "behavioral_risk_index": breakdown.behavioral_risk_index,
                    "total_return": self.total_return_pct,
                }),
                None,
                None,
            );
        }
    }

    /// Completion rate: 100 only when the whole deck was answered.
    fn completion_rate(&self) -> f64 {
        (self.answered() as f64 / self.deck.len() as f64) * 100.0
    }
}

impl AssessmentInstrument for DecisionInstrument {
    fn kind(&self) -> InstrumentKind {
        InstrumentKind::Decision
    }

    fn begin(&mut self, session_id: &str, now_ms: u64) {
        if self.status != DecisionStatus::Instructions {
            return;
        }
        self.started_at_ms = now_ms;
        self.decision_started_at_ms = now_ms;
        self.status = DecisionStatus::Playing;

        let mut recorder = TelemetryRecorder::new(session_id.to_string());
        recorder.record(
            EventKind::GameStarted,
            0,
            json!({ "total_scenarios": self.deck.len() }),
            None,
            None,
        );
        self.recorder = Some(recorder);
    }

    fn is_complete(&self) -> bool {
        self.status == DecisionStatus::Completed
    }

    /// Stop mid-run: clears the pending auto-advance so no delayed
    /// transition fires afterwards, and no further telemetry is emitted.
    fn cancel(&mut self, _now_ms: u64) {
        self.cancelled = true;
        self.feedback_until_ms = None;
    }

    fn report(&mut self, _now_ms: u64) -> SessionReport {
        let breakdown = aggregate(&self.tally, &self.decision_times_ms);

        let (telemetry, batch_digest) = match self.recorder.take() {
            Some(recorder) => {
                let digest = recorder.batch_digest();
                (recorder.into_batch(), digest)
            }
            None => (Vec::new(), String::new()),
        };

        SessionReport {
            completion_rate: self.completion_rate(),
            outcome: SessionOutcome::RiskIndex { breakdown },
            telemetry,
            batch_digest,
        }
    }
}
