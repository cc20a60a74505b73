use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::aggregate::ScenarioResult;
use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::recommend::PortfolioSummary;

/// column order mandated by the export contract
pub const EXPORT_COLUMNS: [&str; 12] = [
    "Borrower No.",
    "Borrower Name",
    "Properties",
    "OPB",
    "Capital (Scenario 1)",
    "Capital (Scenario 2)",
    "XNPV (Scenario 1)",
    "XNPV (Scenario 2)",
    "Ratio (Scenario 1)",
    "Ratio (Scenario 2)",
    "Difference",
    "Better Scenario",
];

/// one export row; field order mirrors `EXPORT_COLUMNS`
///
/// monetary values are rounded to the currency minor unit here: the export
/// table is a presentation boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRow {
    pub borrower_number: String,
    pub borrower_name: String,
    pub property_count: u32,
    pub opb: Money,
    pub capital_1: Money,
    pub capital_2: Money,
    pub xnpv_1: Money,
    pub xnpv_2: Money,
    pub ratio_1: Rate,
    pub ratio_2: Rate,
    pub difference: Money,
    pub better_scenario: String,
}

impl From<&ScenarioResult> for ExportRow {
    fn from(result: &ScenarioResult) -> Self {
        Self {
            borrower_number: result.borrower_number.clone(),
            borrower_name: result.borrower_name.clone(),
            property_count: result.property_count,
            opb: result.opb.round_dp(2),
            capital_1: result.capital_1.round_dp(2),
            capital_2: result.capital_2.round_dp(2),
            xnpv_1: result.xnpv_1.round_dp(2),
            xnpv_2: result.xnpv_2.round_dp(2),
            ratio_1: result.ratio_1,
            ratio_2: result.ratio_2,
            difference: result.difference.round_dp(2),
            better_scenario: result.better_scenario.label().to_string(),
        }
    }
}

/// the structured table handed to an external reporting collaborator
///
/// the engine performs no file I/O; writing xlsx/csv/whatever is the
/// exporter's concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonTable {
    pub columns: Vec<String>,
    pub rows: Vec<ExportRow>,
    pub summary: PortfolioSummary,
}

impl ComparisonTable {
    pub fn new(results: &[ScenarioResult], summary: PortfolioSummary) -> Self {
        Self {
            columns: EXPORT_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: results.iter().map(ExportRow::from).collect(),
            summary,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// external file-export collaborator seam
#[async_trait]
pub trait ReportExporter: Send + Sync {
    async fn export(&self, table: &ComparisonTable) -> Result<()>;
}
