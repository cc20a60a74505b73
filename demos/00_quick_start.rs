/// quick start - compare two restructuring scenarios for a small portfolio
use std::sync::Arc;

use npl_restructure_rs::chrono::NaiveDate;
use npl_restructure_rs::{
    Borrower, ComparisonEngine, ComparisonTable, InMemoryPortfolio, Loan, Money, SafeTimeProvider,
    TimeSource, Uuid, ValuationConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut portfolio = InMemoryPortfolio::new();

    // borrower with 1,000,000 outstanding; scenario 1 commits 900,000,
    // scenario 2 commits 850,000
    let borrower = Borrower {
        id: Uuid::new_v4(),
        number: "B-0001".into(),
        name: "Hanseong Trading".into(),
        property_count: 2,
        opb: Money::from_major(1_000_000),
        is_restructuring: true,
    };
    let loan = Loan {
        id: Uuid::new_v4(),
        borrower_id: borrower.id,
        capital_scenario_1: Some(Money::from_major(900_000)),
        capital_scenario_2: Some(Money::from_major(850_000)),
        schedule_scenario_1: None,
        schedule_scenario_2: None,
    };
    portfolio.insert(borrower, vec![loan]);

    // default config: 8% discount, recovery one year out at full capital
    let valuation_date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let config = ValuationConfig::new(valuation_date);

    let provider = Arc::new(portfolio);
    let mut engine = ComparisonEngine::new(provider.clone(), provider, config)?;

    let time = SafeTimeProvider::new(TimeSource::System);
    engine.refresh(&time).await;

    let snapshot = engine.snapshot().expect("refresh just completed");
    for row in &snapshot.results {
        println!(
            "{} {}: XNPV1 {} / XNPV2 {} -> {}",
            row.borrower_number,
            row.borrower_name,
            row.xnpv_1.to_display_string(),
            row.xnpv_2.to_display_string(),
            row.better_scenario.label()
        );
    }
    println!("{}", snapshot.summary.recommendation_text());

    // hand the structured table to an external exporter
    let table = ComparisonTable::new(&snapshot.results, snapshot.summary.clone());
    println!("{}", serde_json::to_string_pretty(&table)?);

    Ok(())
}
