use chrono::NaiveDate;

/// days in the discounting year basis (actual/365 fixed)
pub const DAYS_PER_YEAR: f64 = 365.0;

/// signed actual calendar days from `start` to `end`
///
/// restructuring schedules are irregular, so day counts are always actual
/// calendar days, never a 30/360 convention.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

/// year fraction from `anchor` to `date` as actual days / 365
///
/// returned as f64 because it feeds the fractional discount exponent;
/// monetary amounts never pass through this bridge.
pub fn year_fraction(anchor: NaiveDate, date: NaiveDate) -> f64 {
    days_between(anchor, date) as f64 / DAYS_PER_YEAR
}
