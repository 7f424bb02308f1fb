use tracing::debug;

use super::rates::{growth_factor, is_flat, monthly_rate};
use super::types::{GoalParameters, GoalSolution};

/// Solves the ordinary-annuity future-value equation for the monthly deposit.
///
/// The current balance compounds on its own; deposits only need to cover the gap.
/// A negative solve means growth alone already reaches the target and is clamped to zero.
pub fn solve(params: &GoalParameters) -> GoalSolution {
    let rate = monthly_rate(params.annual_rate_percent);
    let months = params.timeframe_months;

    let (required, projected_savings) = if is_flat(rate) {
        (
            (params.target_amount - params.current_savings) / months as f64,
            params.current_savings,
        )
    } else {
        let growth = growth_factor(rate, months);
        let projected = params.current_savings * growth;
        (
            (params.target_amount - projected) * rate / (growth - 1.0),
            projected,
        )
    };

    debug!(
        target = params.target_amount,
        monthly_rate = rate,
        months,
        required,
        "solved goal contribution"
    );

    GoalSolution {
        required_monthly_contribution: required.max(0.0),
        is_possible: required > 0.0,
        projected_savings,
    }
}
