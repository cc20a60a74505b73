/// rate sensitivity - how a restructuring plan's XNPV moves with the discount rate
use npl_restructure_rs::chrono::NaiveDate;
use npl_restructure_rs::{sensitivity, xirr, CashFlowEntry, CashFlowSeries, Money, Rate};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();

    // 900,000 out at the effective date, staged recoveries over two years
    let series = CashFlowSeries::new(vec![
        CashFlowEntry::new(d(2025, 1, 1), -Money::from_major(900_000)),
        CashFlowEntry::new(d(2025, 10, 1), Money::from_major(300_000)),
        CashFlowEntry::new(d(2026, 6, 1), Money::from_major(400_000)),
        CashFlowEntry::new(d(2027, 1, 1), Money::from_major(350_000)),
    ]);

    // sweep 2% .. 14% in 2% steps
    let points = sensitivity(
        &series,
        Rate::from_decimal(dec!(0.02)),
        Rate::from_decimal(dec!(0.14)),
        Rate::from_decimal(dec!(0.02)),
    )?;
    for (rate, value) in &points {
        println!("{:>8}  XNPV {}", rate.to_string(), value.to_display_string());
    }

    // the break-even discount rate for this plan
    let breakeven = xirr(&series, Rate::from_decimal(dec!(0.1)))?;
    println!("break-even rate: {breakeven}");

    Ok(())
}
