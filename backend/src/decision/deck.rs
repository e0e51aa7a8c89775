//! The production scenario deck.
//!
//! Eight fixed scenarios across the four categories, presented in this
//! order, each with exactly three risk-tiered options. The deck is
//! reference data: consumed read-only, never shuffled, never repeated.

use crate::models::scenario::{Scenario, ScenarioCategory, ScenarioOption};
use crate::models::telemetry::RiskTier;

fn option(label: &str, risk: RiskTier, expected_return_pct: i32, consequence: &str) -> ScenarioOption {
    ScenarioOption {
        label: label.to_string(),
        risk,
        expected_return_pct,
        consequence: consequence.to_string(),
    }
}

/// Build the default eight-scenario deck.
pub fn default_deck() -> Vec<Scenario> {
    vec![
        Scenario {
            id: 1,
            category: ScenarioCategory::Lending,
            title: "Personal Loan Application".to_string(),
            description: "Customer requesting $15,000 personal loan".to_string(),
            context: "Credit score: 680 | Income: $45K/year | Debt ratio: 35%".to_string(),
            options: vec![
                option(
                    "Approve Full Amount",
                    RiskTier::High,
                    8,
                    "Higher default risk, maximum interest revenue",
                ),
                option(
                    "Approve $10,000",
                    RiskTier::Medium,
                    5,
                    "Moderate risk, customer may seek elsewhere",
                ),
                option(
                    "Decline Application",
                    RiskTier::Low,
                    0,
                    "Zero risk, lose customer relationship",
                ),
            ],
        },
        Scenario {
            id: 2,
            category: ScenarioCategory::Investment,
            title: "Investment Portfolio Rebalance".to_string(),
            description: "Market volatility detected, portfolio down 12%".to_string(),
            context: "Customer has $250K portfolio | Retirement in 10 years".to_string(),
            options: vec![
                option(
                    "Sell All Equities Now",
                    RiskTier::High,
                    -12,
                    "Lock in losses, miss recovery",
                ),
                option(
                    "Hold Current Position",
                    RiskTier::Medium,
                    -5,
                    "May recover, or drop further",
                ),
                option(
                    "Buy More Equities",
                    RiskTier::High,
                    15,
                    "Average down, higher exposure",
                ),
            ],
        },
        Scenario {
            id: 3,
            category: ScenarioCategory::Spending,
            title: "Credit Card Limit Increase".to_string(),
            description: "Customer requests limit increase from $5K to $15K".to_string(),
            context: "Current usage: 85% | Payment history: Excellent | Recent purchases trending up"
                .to_string(),
            options: vec![
                option(
                    "Approve $15K Limit",
                    RiskTier::High,
                    12,
                    "More revenue potential, higher exposure",
                ),
                option(
                    "Approve $8K Limit",
                    RiskTier::Medium,
                    6,
                    "Balanced approach, customer may be unsatisfied",
                ),
                option(
                    "Decline Increase",
                    RiskTier::Low,
                    2,
                    "Maintain safety, risk losing customer",
                ),
            ],
        },
        Scenario {
            id: 4,
            category: ScenarioCategory::Fraud,
            title: "Suspicious Transaction Alert".to_string(),
            description: "Large wire transfer to new international account".to_string(),
            context: "Amount: $45,000 | Customer normally transfers < $2,000 | New beneficiary in high-risk country"
                .to_string(),
            options: vec![
                option(
                    "Block Transaction",
                    RiskTier::Low,
                    0,
                    "Prevent potential fraud, may inconvenience customer",
                ),
                option(
                    "Request Verification",
                    RiskTier::Medium,
                    3,
                    "Delayed transaction, customer friction",
                ),
                option(
                    "Allow Transaction",
                    RiskTier::High,
                    -50,
                    "Fast service, massive loss if fraudulent",
                ),
            ],
        },
        Scenario {
            id: 5,
            category: ScenarioCategory::Lending,
            title: "Business Line of Credit".to_string(),
            description: "Small business requesting $100K revolving credit".to_string(),
            context: "Business age: 2 years | Revenue: $500K/year | Cashflow: Variable".to_string(),
            options: vec![
                option(
                    "Approve $100K Unsecured",
                    RiskTier::High,
                    18,
                    "High revenue, significant exposure",
                ),
                option(
                    "Approve $50K Secured",
                    RiskTier::Medium,
                    10,
                    "Collateral protection, lower revenue",
                ),
                option(
                    "Refer to SBA Loan",
                    RiskTier::Low,
                    4,
                    "Government backing, slower process",
                ),
            ],
        },
        Scenario {
            id: 6,
            category: ScenarioCategory::Investment,
            title: "High-Yield Bond Opportunity".to_string(),
            description: "Customer considering 9% corporate bond".to_string(),
            context: "Bond rating: BB | Issuer: Tech startup | Customer risk tolerance: Moderate"
                .to_string(),
            options: vec![
                option(
                    "Recommend 50% Allocation",
                    RiskTier::High,
                    9,
                    "High yield, speculative grade",
                ),
                option(
                    "Recommend 10% Allocation",
                    RiskTier::Medium,
                    5,
                    "Diversification, limited exposure",
                ),
                option(
                    "Recommend Government Bonds",
                    RiskTier::Low,
                    2,
                    "Safe but low return",
                ),
            ],
        },
        Scenario {
            id: 7,
            category: ScenarioCategory::Spending,
            title: "Overdraft Protection Decision".to_string(),
            description: "Customer overdrawn by $300".to_string(),
            context: "Account history: 5 years | Previous overdrafts: 2 in past year | Current balance: -$300"
                .to_string(),
            options: vec![
                option(
                    "Auto-Approve Overdraft",
                    RiskTier::High,
                    8,
                    "$35 fee per occurrence, customer dependency risk",
                ),
                option(
                    "Approve with Warning",
                    RiskTier::Medium,
                    5,
                    "Fee revenue, financial health concern",
                ),
                option(
                    "Decline & Block",
                    RiskTier::Low,
                    0,
                    "Protect customer, may cause bounced payments",
                ),
            ],
        },
        Scenario {
            id: 8,
            category: ScenarioCategory::Fraud,
            title: "Multiple Failed Login Attempts".to_string(),
            description: "Account shows 8 failed logins from foreign IP".to_string(),
            context: "Customer abroad: Unknown | Account balance: $125K | No recent travel notifications"
                .to_string(),
            options: vec![
                option(
                    "Lock Account Immediately",
                    RiskTier::Low,
                    0,
                    "Prevent breach, customer lockout inconvenience",
                ),
                option(
                    "Send 2FA Challenge",
                    RiskTier::Medium,
                    2,
                    "Security layer, delayed access",
                ),
                option(
                    "Monitor Only",
                    RiskTier::High,
                    -80,
                    "No friction, potential account takeover",
                ),
            ],
        },
    ]
}
