pub mod aggregate;
pub mod cashflow;
pub mod config;
pub mod daycount;
pub mod decimal;
pub mod engine;
pub mod errors;
pub mod events;
pub mod export;
pub mod providers;
pub mod recommend;
pub mod types;
pub mod xnpv;

// re-export key types
pub use aggregate::{aggregate_portfolio, valuate_borrower, PortfolioRecord, ScenarioResult};
pub use cashflow::{CashFlowEntry, CashFlowSeries};
pub use config::{RecoveryAssumption, ValuationConfig};
pub use decimal::{Money, Rate};
pub use engine::{ComparisonEngine, ComparisonSnapshot, RefreshRequest};
pub use errors::{ComparisonError, Result};
pub use events::{EngineEvent, EventLog};
pub use export::{ComparisonTable, ExportRow, ReportExporter, EXPORT_COLUMNS};
pub use providers::{BorrowerProvider, InMemoryPortfolio, LoanProvider};
pub use recommend::{summarize, PortfolioSummary, Recommendation};
pub use types::{Borrower, BorrowerId, EngineStatus, Loan, LoanId, Scenario};
pub use xnpv::{sensitivity, xirr, xnpv};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
