//! Decision-scenario assessment instrument.
//!
//! A strictly linear walkthrough of fixed financial scenarios. Every timed
//! choice feeds the risk-tier tally and the decision-time series that the
//! behavioral risk aggregator reduces at completion.

pub mod deck;
pub mod engine;

pub use deck::default_deck;
pub use engine::{ChoiceReceipt, DecisionConfig, DecisionError, DecisionInstrument, DecisionStatus};
