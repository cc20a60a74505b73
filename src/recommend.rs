use serde::{Deserialize, Serialize};
use std::fmt;

use crate::aggregate::ScenarioResult;
use crate::decimal::Money;
use crate::types::Scenario;

/// portfolio-level verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    /// the named scenario has the greater portfolio present value;
    /// `advantage` is the absolute XNPV difference
    Scenario {
        scenario: Scenario,
        advantage: Money,
    },
    /// no borrowers available, no numeric verdict
    NoData,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::Scenario { scenario, advantage } => write!(
                f,
                "{} recommended (XNPV advantage: {})",
                scenario.label(),
                advantage.to_display_string()
            ),
            Recommendation::NoData => f.write_str("no borrower data available"),
        }
    }
}

/// portfolio rollup: total present value per scenario plus the verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total_xnpv_1: Money,
    pub total_xnpv_2: Money,
    pub recommendation: Recommendation,
}

impl PortfolioSummary {
    /// the recommendation as display text
    pub fn recommendation_text(&self) -> String {
        self.recommendation.to_string()
    }
}

/// sum all per-borrower results and pick the scenario with the greater
/// portfolio present value; exact ties resolve to scenario 1
pub fn summarize(results: &[ScenarioResult]) -> PortfolioSummary {
    if results.is_empty() {
        return PortfolioSummary {
            total_xnpv_1: Money::ZERO,
            total_xnpv_2: Money::ZERO,
            recommendation: Recommendation::NoData,
        };
    }

    let total_xnpv_1: Money = results.iter().map(|r| r.xnpv_1).sum();
    let total_xnpv_2: Money = results.iter().map(|r| r.xnpv_2).sum();

    let scenario = if total_xnpv_1 >= total_xnpv_2 {
        Scenario::One
    } else {
        Scenario::Two
    };

    PortfolioSummary {
        total_xnpv_1,
        total_xnpv_2,
        recommendation: Recommendation::Scenario {
            scenario,
            advantage: (total_xnpv_1 - total_xnpv_2).abs(),
        },
    }
}
