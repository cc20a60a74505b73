use chrono::{Duration, NaiveDate};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::Rate;
use crate::errors::{ComparisonError, Result};
use crate::types::Scenario;

/// external valuation assumption for the cash-flow synthesis path
///
/// when a loan has only a committed-capital figure, the outflow lands on
/// `effective_date` and the recovery inflow (`capital × recovery_rate`)
/// lands on `recovery_date`. both are explicit, inspectable inputs; the
/// discount rate alone expresses time value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryAssumption {
    pub effective_date: NaiveDate,
    pub recovery_date: NaiveDate,
    pub recovery_rate: Rate,
}

impl RecoveryAssumption {
    /// default assumption: recovery one year after the effective date,
    /// inflow equal to the committed capital
    pub fn standard(effective_date: NaiveDate) -> Self {
        Self {
            effective_date,
            recovery_date: effective_date + Duration::days(365),
            recovery_rate: Rate::ONE,
        }
    }

    fn validate(&self, scenario: Scenario) -> Result<()> {
        if self.recovery_date < self.effective_date {
            return Err(ComparisonError::InvalidConfiguration {
                message: format!(
                    "{}: recovery date {} precedes effective date {}",
                    scenario.label(),
                    self.recovery_date,
                    self.effective_date
                ),
            });
        }
        if self.recovery_rate < Rate::ZERO {
            return Err(ComparisonError::InvalidConfiguration {
                message: format!("{}: negative recovery rate", scenario.label()),
            });
        }
        Ok(())
    }
}

/// configuration for one comparison run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuationConfig {
    /// annual nominal discount rate, must be > -1
    pub discount_rate: Rate,
    pub scenario_1: RecoveryAssumption,
    pub scenario_2: RecoveryAssumption,
}

impl ValuationConfig {
    /// default configuration anchored at the given valuation date:
    /// 8% discount rate, standard recovery assumptions for both scenarios
    pub fn new(valuation_date: NaiveDate) -> Self {
        Self {
            discount_rate: Rate::from_decimal(dec!(0.08)),
            scenario_1: RecoveryAssumption::standard(valuation_date),
            scenario_2: RecoveryAssumption::standard(valuation_date),
        }
    }

    /// replace the discount rate
    pub fn with_discount_rate(mut self, rate: Rate) -> Self {
        self.discount_rate = rate;
        self
    }

    /// recovery assumption for the given scenario
    pub fn assumption(&self, scenario: Scenario) -> &RecoveryAssumption {
        match scenario {
            Scenario::One => &self.scenario_1,
            Scenario::Two => &self.scenario_2,
        }
    }

    /// reject configurations the calculator cannot value
    pub fn validate(&self) -> Result<()> {
        if self.discount_rate <= Rate::from_decimal(dec!(-1)) {
            return Err(ComparisonError::InvalidInput {
                message: format!(
                    "discount rate {} must be greater than -1",
                    self.discount_rate
                ),
            });
        }
        self.scenario_1.validate(Scenario::One)?;
        self.scenario_2.validate(Scenario::Two)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = ValuationConfig::new(d(2025, 1, 1));
        assert_eq!(config.discount_rate, Rate::from_percentage(8));
        assert_eq!(config.scenario_1.recovery_date, d(2026, 1, 1));
        assert_eq!(config.scenario_1.recovery_rate, Rate::ONE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_recovery_before_effective() {
        let mut config = ValuationConfig::new(d(2025, 1, 1));
        config.scenario_2.recovery_date = d(2024, 12, 1);
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ComparisonError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_rejects_discount_rate_at_or_below_minus_one() {
        let config =
            ValuationConfig::new(d(2025, 1, 1)).with_discount_rate(Rate::from_decimal(dec!(-1)));
        assert!(matches!(
            config.validate().unwrap_err(),
            ComparisonError::InvalidInput { .. }
        ));
    }

    #[test]
    fn test_assumptions_settable_per_scenario() {
        let mut config = ValuationConfig::new(d(2025, 1, 1));
        config.scenario_2.recovery_rate = Rate::from_decimal(dec!(0.85));
        assert_eq!(config.assumption(Scenario::One).recovery_rate, Rate::ONE);
        assert_eq!(
            config.assumption(Scenario::Two).recovery_rate,
            Rate::from_decimal(dec!(0.85))
        );
    }
}
