//! Behavioral risk aggregation.
//!
//! Pure functions reducing a completed decision session's tallies into a
//! bounded risk index. Nothing here touches instrument state; the lifecycle
//! controller calls [`aggregate`] once, at finalize time.
//!
//! # Bounds
//!
//! Every component score is in [0, 100] by construction, and the composite
//! index is a convex combination of them, so it is also in [0, 100]. The
//! final value is clamped anyway so the invariant survives future edits to
//! the component formulas.

use serde::{Deserialize, Serialize};

/// Decisions faster than this count toward the rapid-decision rate.
pub const RAPID_DECISION_THRESHOLD_MS: u64 = 3_000;

/// Weight of the choice-risk distribution in the composite index.
const RISK_WEIGHT: f64 = 0.40;
/// Weight of decision impulsivity in the composite index.
const IMPULSIVITY_WEIGHT: f64 = 0.30;
/// Weight of the rapid-decision rate in the composite index.
const RAPID_WEIGHT: f64 = 0.30;

/// Running tally of choices by risk tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskTally {
    pub low: u32,
    pub medium: u32,
    pub high: u32,
}

impl RiskTally {
    pub fn total(&self) -> u32 {
        self.low + self.medium + self.high
    }
}

/// Aggregated behavioral scores for one completed session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskBreakdown {
    /// Choice-risk distribution score in [0, 100]
    pub risk_score: f64,

    /// Impulsivity score in [0, 100] (saturates for sub-second averages)
    pub impulsivity_score: f64,

    /// Share of decisions made under the rapid threshold, in [0, 100]
    pub rapid_decision_rate: f64,

    /// Composite behavioral risk index in [0, 100]
    pub behavioral_risk_index: f64,

    /// Mean decision time in milliseconds (0 for an empty session)
    pub avg_decision_time_ms: f64,

    /// Raw tier tallies the scores were computed from
    pub tally: RiskTally,
}

/// Reduce a session's tallies and decision timings into a risk breakdown.
///
/// Total for every input: zero decisions produce an all-zero breakdown
/// rather than a division by zero.
///
/// # Example
/// ```
/// use wellbeing_sim_core_rs::{aggregate, RiskTally};
///
/// // 8 low-risk choices, all under a second
/// let tally = RiskTally { low: 8, medium: 0, high: 0 };
/// let times: Vec<u64> = vec![700; 8];
/// let breakdown = aggregate(&tally, &times);
///
/// assert_eq!(breakdown.risk_score, 0.0);
/// assert_eq!(breakdown.impulsivity_score, 100.0);
/// assert_eq!(breakdown.rapid_decision_rate, 100.0);
/// assert_eq!(breakdown.behavioral_risk_index, 60.0);
/// ```
pub fn aggregate(tally: &RiskTally, decision_times_ms: &[u64]) -> RiskBreakdown {
    let total = tally.total();
    if total == 0 || decision_times_ms.is_empty() {
        return RiskBreakdown {
            risk_score: 0.0,
            impulsivity_score: 0.0,
            rapid_decision_rate: 0.0,
            behavioral_risk_index: 0.0,
            avg_decision_time_ms: 0.0,
            tally: *tally,
        };
    }

    let risk_score = risk_score(tally);
    let avg_decision_time_ms =
        decision_times_ms.iter().sum::<u64>() as f64 / decision_times_ms.len() as f64;
    let impulsivity_score = impulsivity_score(avg_decision_time_ms);
    let rapid_decision_rate = rapid_decision_rate(decision_times_ms);

    let behavioral_risk_index = (risk_score * RISK_WEIGHT
        + impulsivity_score * IMPULSIVITY_WEIGHT
        + rapid_decision_rate * RAPID_WEIGHT)
        .clamp(0.0, 100.0);

    RiskBreakdown {
        risk_score,
        impulsivity_score,
        rapid_decision_rate,
        behavioral_risk_index,
        avg_decision_time_ms,
        tally: *tally,
    }
}

/// Choice-risk distribution: high choices weigh 100, medium 50, low 0.
///
/// Requires `tally.total() > 0`; callers guard via [`aggregate`].
fn risk_score(tally: &RiskTally) -> f64 {
    (tally.high as f64 * 100.0 + tally.medium as f64 * 50.0) / tally.total() as f64
}

/// Impulsivity from the mean decision time: `min(100, 1000/avg * 100)`.
///
/// A zero average (unreachable from real input) saturates at 100, the limit
/// of the formula as avg approaches zero.
fn impulsivity_score(avg_decision_time_ms: f64) -> f64 {
    if avg_decision_time_ms <= 0.0 {
        return 100.0;
    }
    ((1000.0 / avg_decision_time_ms) * 100.0).min(100.0)
}

/// Percentage of decisions made under [`RAPID_DECISION_THRESHOLD_MS`].
fn rapid_decision_rate(decision_times_ms: &[u64]) -> f64 {
    let rapid = decision_times_ms
        .iter()
        .filter(|t| **t < RAPID_DECISION_THRESHOLD_MS)
        .count();
    (rapid as f64 / decision_times_ms.len() as f64) * 100.0
}
