use tracing::debug;

use super::rates::{growth_factor, is_flat, monthly_rate};
use super::types::{LoanParameters, LoanSummary};

/// Fixed-installment (Price table) repayment of a fully amortizing loan.
pub fn amortize(params: &LoanParameters) -> LoanSummary {
    let rate = monthly_rate(params.annual_rate_percent);
    let months = params.term_months;
    let monthly_payment = level_payment(params.principal, rate, months);
    let total_payment = monthly_payment * months as f64;

    debug!(
        principal = params.principal,
        monthly_rate = rate,
        months,
        monthly_payment,
        "amortized loan"
    );

    LoanSummary {
        monthly_payment,
        total_payment,
        total_interest: total_payment - params.principal,
    }
}

fn level_payment(principal: f64, rate: f64, months: u32) -> f64 {
    if is_flat(rate) {
        return principal / months as f64;
    }
    let growth = growth_factor(rate, months);
    principal * rate * growth / (growth - 1.0)
}
