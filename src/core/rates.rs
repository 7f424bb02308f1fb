/// Converts an annual percentage (e.g. `9.5`) into the monthly compounding rate.
pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / 12.0
}

/// Monthly rates this close to zero are treated as zero; `(1 + r)^n - 1` loses
/// all precision below it.
pub const FLAT_RATE_EPSILON: f64 = 1e-9;

/// True when the annuity formulas would divide by a vanishing `(1 + r)^n - 1`.
pub fn is_flat(monthly_rate: f64) -> bool {
    monthly_rate.abs() < FLAT_RATE_EPSILON
}

/// `(1 + r)^n`, the growth of one unit over `months` compounding periods.
pub fn growth_factor(monthly_rate: f64, months: u32) -> f64 {
    (1.0 + monthly_rate).powf(months as f64)
}

/// Display rounding to the currency's minor unit.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
