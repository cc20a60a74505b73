use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cashflow::CashFlowEntry;
use crate::decimal::Money;

/// unique identifier for a borrower
pub type BorrowerId = Uuid;

/// unique identifier for a loan
pub type LoanId = Uuid;

/// one of the two restructuring plans under comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scenario {
    One,
    Two,
}

impl Scenario {
    /// display label used in recommendations and export rows
    pub fn label(&self) -> &'static str {
        match self {
            Scenario::One => "Scenario 1",
            Scenario::Two => "Scenario 2",
        }
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// borrower record supplied by the external borrower provider
///
/// immutable once fetched for a comparison run; refreshed only by
/// re-fetching from the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Borrower {
    pub id: BorrowerId,
    /// display number (e.g. "B-0001")
    pub number: String,
    pub name: String,
    /// count of collateral properties backing this borrower
    pub property_count: u32,
    /// outstanding principal balance, non-negative
    pub opb: Money,
    /// restructuring-track membership flag
    pub is_restructuring: bool,
}

/// loan record supplied by the external loan provider
///
/// carries the per-scenario committed capital and, optionally, an explicit
/// per-scenario cash-flow schedule. an explicit schedule takes precedence
/// over the synthesized two-point series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    pub id: LoanId,
    /// non-owning back-reference; a loan belongs to exactly one borrower
    pub borrower_id: BorrowerId,
    pub capital_scenario_1: Option<Money>,
    pub capital_scenario_2: Option<Money>,
    pub schedule_scenario_1: Option<Vec<CashFlowEntry>>,
    pub schedule_scenario_2: Option<Vec<CashFlowEntry>>,
}

impl Loan {
    /// committed capital for the given scenario, if any
    pub fn capital(&self, scenario: Scenario) -> Option<Money> {
        match scenario {
            Scenario::One => self.capital_scenario_1,
            Scenario::Two => self.capital_scenario_2,
        }
    }

    /// explicit cash-flow schedule for the given scenario, if any
    pub fn schedule(&self, scenario: Scenario) -> Option<&[CashFlowEntry]> {
        match scenario {
            Scenario::One => self.schedule_scenario_1.as_deref(),
            Scenario::Two => self.schedule_scenario_2.as_deref(),
        }
    }
}

/// comparison engine lifecycle
///
/// there is no error terminal state: a failed load returns to `Idle` with
/// the previous `Ready` snapshot retained for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineStatus {
    /// no computation requested or last load failed
    Idle,
    /// a refresh is in flight
    Loading,
    /// a snapshot is available and current
    Ready,
    /// the snapshot is outdated (rate change or data refresh)
    Stale,
}
