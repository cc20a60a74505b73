use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use crate::cashflow::CashFlowSeries;
use crate::daycount::year_fraction;
use crate::decimal::{Money, Rate};
use crate::errors::{ComparisonError, Result};

/// present value of an irregular, dated cash-flow series
///
/// `XNPV = Σ CF_i / (1 + r)^((date_i − date_0) / 365)` where `date_0` is the
/// first entry of the normalized series. pure: same inputs, same output.
///
/// the discount factor uses an f64 power for the fractional exponent and is
/// converted back to decimal before it touches any amount; monetary values
/// never live in binary floats. entries with coincident dates discount at
/// factor 1 relative to each other.
pub fn xnpv(rate: Rate, series: &CashFlowSeries) -> Result<Money> {
    let anchor = series.anchor().ok_or_else(|| ComparisonError::InvalidInput {
        message: "empty cash flow series".into(),
    })?;
    if rate.as_decimal() <= Decimal::NEGATIVE_ONE {
        return Err(ComparisonError::InvalidInput {
            message: format!("discount rate {rate} must be greater than -1"),
        });
    }

    let base = 1.0 + rate.to_f64();
    let mut total = Money::ZERO;
    for entry in series.entries() {
        let exponent = -year_fraction(anchor, entry.date);
        let factor = base.powf(exponent);
        let factor = Decimal::from_f64(factor).ok_or_else(|| ComparisonError::Calculation {
            message: format!("discount factor {factor} not representable"),
        })?;
        total += entry.amount * factor;
    }
    Ok(total)
}

/// internal rate of return of an irregular series, by Newton-Raphson
///
/// the rate solve runs entirely in f64 (it is an approximation target, not a
/// monetary value). requires at least two flows with both signs present;
/// tries a ladder of starting guesses before giving up.
pub fn xirr(series: &CashFlowSeries, guess: Rate) -> Result<Rate> {
    const TOLERANCE: f64 = 1e-7;
    const MAX_ITERATIONS: u32 = 100;
    const MIN_RATE: f64 = -0.99;
    const MAX_RATE: f64 = 100.0;

    if series.len() < 2 {
        return Err(ComparisonError::InvalidInput {
            message: "rate solve needs at least two cash flows".into(),
        });
    }
    let has_outflow = series.entries().iter().any(|e| e.amount.is_negative());
    let has_inflow = series.entries().iter().any(|e| e.amount.is_positive());
    if !has_outflow || !has_inflow {
        return Err(ComparisonError::InvalidInput {
            message: "rate solve needs both inflows and outflows".into(),
        });
    }

    let starts = [guess.to_f64(), -0.5, 0.0, 0.5, 1.0, 2.0];
    for start in starts {
        let mut rate = start;
        for _ in 0..MAX_ITERATIONS {
            let (value, derivative) = npv_and_derivative(series, rate);
            if derivative.abs() < 1e-10 {
                break;
            }
            let next = (rate - value / derivative).clamp(MIN_RATE, MAX_RATE);
            if (next - rate).abs() < TOLERANCE {
                return Rate::from_f64(next).ok_or_else(|| ComparisonError::Calculation {
                    message: format!("rate {next} not representable"),
                });
            }
            rate = next;
        }
    }

    Err(ComparisonError::Calculation {
        message: "rate solve did not converge".into(),
    })
}

/// f64 npv and its derivative with respect to the rate, for the solver
fn npv_and_derivative(series: &CashFlowSeries, rate: f64) -> (f64, f64) {
    // anchor exists: callers check for non-empty series
    let anchor = match series.anchor() {
        Some(date) => date,
        None => return (0.0, 0.0),
    };
    let base = 1.0 + rate;
    let mut value = 0.0;
    let mut derivative = 0.0;
    for entry in series.entries() {
        let yf = year_fraction(anchor, entry.date);
        let amount = entry.amount.to_f64();
        value += amount * base.powf(-yf);
        derivative += amount * -yf * base.powf(-yf - 1.0);
    }
    (value, derivative)
}

/// XNPV across an inclusive rate range at a fixed step
///
/// steps in exact decimal increments so the sweep never drifts.
pub fn sensitivity(
    series: &CashFlowSeries,
    min_rate: Rate,
    max_rate: Rate,
    step: Rate,
) -> Result<Vec<(Rate, Money)>> {
    if step.as_decimal() <= Decimal::ZERO {
        return Err(ComparisonError::InvalidInput {
            message: "sensitivity step must be positive".into(),
        });
    }
    let mut points = Vec::new();
    let mut rate = min_rate;
    while rate <= max_rate {
        points.push((rate, xnpv(rate, series)?));
        rate = rate + step;
    }
    Ok(points)
}
