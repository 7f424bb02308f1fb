use tracing::debug;

use super::rates::{monthly_rate, round_to_cents};
use super::types::{InvestmentParameters, InvestmentProjection, YearlySnapshot};

const MONTHS_PER_YEAR: u32 = 12;

/// Month-by-month compounding with a contribution credited at the end of each month.
///
/// The series holds one point per completed year (plus month 0 and the final month).
/// Points are rounded to cents on their own; the running balance is never rounded.
pub fn project(params: &InvestmentParameters) -> InvestmentProjection {
    let rate = monthly_rate(params.annual_rate_percent);
    let months = params.period_years.saturating_mul(MONTHS_PER_YEAR);

    let mut total = params.initial_amount;
    let mut invested = params.initial_amount;
    let mut series = Vec::with_capacity(params.period_years as usize + 1);

    for month in 0..=months {
        if month > 0 {
            total = total * (1.0 + rate) + params.monthly_contribution;
            invested += params.monthly_contribution;
        }

        if month % MONTHS_PER_YEAR == 0 || month == months {
            series.push(snapshot(month, total, invested));
        }
    }

    debug!(
        months,
        monthly_rate = rate,
        final_balance = total,
        points = series.len(),
        "projected compound growth"
    );

    InvestmentProjection {
        final_balance: total,
        total_invested: invested,
        total_interest: total - invested,
        series,
    }
}

fn snapshot(month: u32, total: f64, invested: f64) -> YearlySnapshot {
    YearlySnapshot {
        year_index: month / MONTHS_PER_YEAR,
        cumulative_total: round_to_cents(total),
        cumulative_invested: round_to_cents(invested),
        cumulative_interest: round_to_cents(total - invested),
    }
}
