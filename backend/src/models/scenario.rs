//! Decision-scenario reference data.
//!
//! Scenarios are immutable configuration: each one is presented exactly once,
//! in deck order, and is never mutated by the engine.

use crate::models::telemetry::RiskTier;
use serde::{Deserialize, Serialize};

/// Thematic category of a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioCategory {
    Lending,
    Investment,
    Spending,
    Fraud,
}

impl ScenarioCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioCategory::Lending => "lending",
            ScenarioCategory::Investment => "investment",
            ScenarioCategory::Spending => "spending",
            ScenarioCategory::Fraud => "fraud",
        }
    }
}

/// One selectable option within a scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOption {
    /// Button label shown to the player
    pub label: String,

    /// Risk tier this choice represents
    pub risk: RiskTier,

    /// Signed expected-return percentage
    pub expected_return_pct: i32,

    /// Consequence text shown in the feedback panel
    pub consequence: String,
}

/// One fixed financial decision prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Ordered id within the deck (1-based, matches presentation order)
    pub id: u32,
    pub category: ScenarioCategory,
    pub title: String,
    pub description: String,
    /// Supporting facts line (credit score, balances, history)
    pub context: String,
    pub options: Vec<ScenarioOption>,
}

impl Scenario {
    /// Look up an option by index.
    pub fn option(&self, index: usize) -> Option<&ScenarioOption> {
        self.options.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_lookup() {
        let scenario = Scenario {
            id: 1,
            category: ScenarioCategory::Lending,
            title: "t".to_string(),
            description: "d".to_string(),
            context: "c".to_string(),
            options: vec![ScenarioOption {
                label: "only".to_string(),
                risk: RiskTier::Low,
                expected_return_pct: 0,
                consequence: "none".to_string(),
            }],
        };

        assert!(scenario.option(0).is_some());
        assert!(scenario.option(1).is_none());
    }
}
