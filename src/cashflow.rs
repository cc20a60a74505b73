use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::RecoveryAssumption;
use crate::decimal::Money;
use crate::types::{Loan, Scenario};

/// a dated, signed cash flow
///
/// negative = outflow at the restructuring effective date,
/// positive = recovery inflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlowEntry {
    pub date: NaiveDate,
    pub amount: Money,
}

impl CashFlowEntry {
    pub fn new(date: NaiveDate, amount: Money) -> Self {
        Self { date, amount }
    }
}

/// a normalized, date-ordered cash-flow series
///
/// construction always normalizes: entries are stable-sorted by date and
/// duplicate dates are summed, not rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CashFlowSeries {
    entries: Vec<CashFlowEntry>,
}

impl CashFlowSeries {
    /// build a normalized series from arbitrary entries
    pub fn new(entries: Vec<CashFlowEntry>) -> Self {
        Self {
            entries: normalize(entries),
        }
    }

    /// synthesize the two-point series for a single committed-capital amount:
    /// an outflow of `capital` at the effective date and an inflow of
    /// `capital × recovery_rate` at the assumed recovery date
    ///
    /// the recovery assumption is caller-supplied configuration; nothing
    /// here is a hard-coded haircut. time value is expressed solely by the
    /// discount rate at valuation.
    pub fn from_capital(capital: Money, assumption: &RecoveryAssumption) -> Self {
        Self::new(vec![
            CashFlowEntry::new(assumption.effective_date, -capital),
            CashFlowEntry::new(
                assumption.recovery_date,
                capital * assumption.recovery_rate.as_decimal(),
            ),
        ])
    }

    /// resolve a loan's series for one scenario
    ///
    /// an explicit schedule takes precedence over synthesis from the
    /// committed capital. a loan with neither contributes nothing.
    pub fn for_loan(
        loan: &Loan,
        scenario: Scenario,
        assumption: &RecoveryAssumption,
    ) -> Option<Self> {
        if let Some(schedule) = loan.schedule(scenario) {
            return Some(Self::new(schedule.to_vec()));
        }
        loan.capital(scenario)
            .map(|capital| Self::from_capital(capital, assumption))
    }

    pub fn entries(&self) -> &[CashFlowEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// valuation anchor: the date of the first entry
    pub fn anchor(&self) -> Option<NaiveDate> {
        self.entries.first().map(|e| e.date)
    }

    /// sum of all flows, undiscounted
    pub fn net_total(&self) -> Money {
        self.entries.iter().map(|e| e.amount).sum()
    }

    /// concatenate two series into one normalized series
    pub fn merged(&self, other: &CashFlowSeries) -> Self {
        let mut entries = self.entries.clone();
        entries.extend_from_slice(&other.entries);
        Self::new(entries)
    }
}

/// stable sort by date, then sum entries sharing a date
fn normalize(mut entries: Vec<CashFlowEntry>) -> Vec<CashFlowEntry> {
    entries.sort_by_key(|e| e.date);
    let mut merged: Vec<CashFlowEntry> = Vec::with_capacity(entries.len());
    for entry in entries {
        match merged.last_mut() {
            Some(last) if last.date == entry.date => last.amount += entry.amount,
            _ => merged.push(entry),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn assumption() -> RecoveryAssumption {
        RecoveryAssumption {
            effective_date: d(2025, 1, 1),
            recovery_date: d(2026, 1, 1),
            recovery_rate: Rate::ONE,
        }
    }

    #[test]
    fn test_normalize_orders_by_date() {
        let series = CashFlowSeries::new(vec![
            CashFlowEntry::new(d(2025, 6, 1), Money::from_major(300)),
            CashFlowEntry::new(d(2025, 1, 1), -Money::from_major(1_000)),
            CashFlowEntry::new(d(2025, 3, 1), Money::from_major(200)),
        ]);
        let dates: Vec<_> = series.entries().iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![d(2025, 1, 1), d(2025, 3, 1), d(2025, 6, 1)]);
        assert_eq!(series.anchor(), Some(d(2025, 1, 1)));
    }

    #[test]
    fn test_duplicate_dates_are_summed() {
        let series = CashFlowSeries::new(vec![
            CashFlowEntry::new(d(2025, 1, 1), -Money::from_major(500)),
            CashFlowEntry::new(d(2025, 1, 1), -Money::from_major(250)),
            CashFlowEntry::new(d(2025, 7, 1), Money::from_major(900)),
        ]);
        assert_eq!(series.len(), 2);
        assert_eq!(series.entries()[0].amount, -Money::from_major(750));
    }

    #[test]
    fn test_synthesis_two_point_series() {
        let series = CashFlowSeries::from_capital(Money::from_major(900_000), &assumption());
        assert_eq!(series.len(), 2);
        assert_eq!(series.entries()[0].date, d(2025, 1, 1));
        assert_eq!(series.entries()[0].amount, -Money::from_major(900_000));
        assert_eq!(series.entries()[1].date, d(2026, 1, 1));
        assert_eq!(series.entries()[1].amount, Money::from_major(900_000));
    }

    #[test]
    fn test_synthesis_applies_recovery_rate() {
        let partial = RecoveryAssumption {
            recovery_rate: Rate::from_decimal(dec!(0.85)),
            ..assumption()
        };
        let series = CashFlowSeries::from_capital(Money::from_major(1_000_000), &partial);
        assert_eq!(series.entries()[1].amount, Money::from_major(850_000));
    }

    #[test]
    fn test_explicit_schedule_takes_precedence() {
        let loan = Loan {
            id: Uuid::new_v4(),
            borrower_id: Uuid::new_v4(),
            capital_scenario_1: Some(Money::from_major(900_000)),
            capital_scenario_2: None,
            schedule_scenario_1: Some(vec![
                CashFlowEntry::new(d(2025, 2, 1), -Money::from_major(400_000)),
                CashFlowEntry::new(d(2025, 8, 1), Money::from_major(450_000)),
            ]),
            schedule_scenario_2: None,
        };
        let series = CashFlowSeries::for_loan(&loan, Scenario::One, &assumption()).unwrap();
        // schedule wins over the 900k capital figure
        assert_eq!(series.entries()[0].amount, -Money::from_major(400_000));
    }

    #[test]
    fn test_loan_without_data_yields_no_series() {
        let loan = Loan {
            id: Uuid::new_v4(),
            borrower_id: Uuid::new_v4(),
            capital_scenario_1: Some(Money::from_major(900_000)),
            capital_scenario_2: None,
            schedule_scenario_1: None,
            schedule_scenario_2: None,
        };
        assert!(CashFlowSeries::for_loan(&loan, Scenario::Two, &assumption()).is_none());
    }

    #[test]
    fn test_merged_series_normalizes() {
        let a = CashFlowSeries::new(vec![CashFlowEntry::new(d(2025, 1, 1), -Money::from_major(100))]);
        let b = CashFlowSeries::new(vec![
            CashFlowEntry::new(d(2024, 12, 1), -Money::from_major(50)),
            CashFlowEntry::new(d(2025, 1, 1), Money::from_major(30)),
        ]);
        let merged = a.merged(&b);
        assert_eq!(merged.anchor(), Some(d(2024, 12, 1)));
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.entries()[1].amount, -Money::from_major(70));
    }
}
