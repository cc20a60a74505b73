/// engine lifecycle - stale marking, automatic recompute, event log
use std::sync::Arc;

use npl_restructure_rs::chrono::NaiveDate;
use npl_restructure_rs::{
    Borrower, ComparisonEngine, InMemoryPortfolio, Loan, Money, Rate, SafeTimeProvider,
    TimeSource, Uuid, ValuationConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let mut portfolio = InMemoryPortfolio::new();
    for (number, name, opb, cap1, cap2) in [
        ("B-0001", "Hanseong Trading", 1_000_000, 900_000, 850_000),
        ("B-0002", "Daeil Logistics", 600_000, 500_000, 520_000),
    ] {
        let borrower = Borrower {
            id: Uuid::new_v4(),
            number: number.into(),
            name: name.into(),
            property_count: 1,
            opb: Money::from_major(opb),
            is_restructuring: false,
        };
        let loan = Loan {
            id: Uuid::new_v4(),
            borrower_id: borrower.id,
            capital_scenario_1: Some(Money::from_major(cap1)),
            capital_scenario_2: Some(Money::from_major(cap2)),
            schedule_scenario_1: None,
            schedule_scenario_2: None,
        };
        portfolio.insert(borrower, vec![loan]);
    }

    let valuation_date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let provider = Arc::new(portfolio);
    let mut engine =
        ComparisonEngine::new(provider.clone(), provider, ValuationConfig::new(valuation_date))?;

    let time = SafeTimeProvider::new(TimeSource::System);

    engine.refresh(&time).await;
    println!("at 8%:  {}", engine.snapshot().unwrap().summary.recommendation_text());

    // a rate change marks the snapshot stale and recomputes immediately
    engine.set_discount_rate(Rate::from_percentage(12), &time).await?;
    println!("at 12%: {}", engine.snapshot().unwrap().summary.recommendation_text());

    for event in engine.take_events() {
        println!("event: {event:?}");
    }

    Ok(())
}
