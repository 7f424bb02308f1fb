use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
    #[error("{field} must be >= 0")]
    Negative { field: &'static str },
    #[error("{field} must be > 0")]
    NotPositive { field: &'static str },
    #[error("{field} must be <= {max}")]
    TooLarge { field: &'static str, max: u32 },
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
    },
}

/// Longest accepted investment horizon.
pub const MAX_PERIOD_YEARS: u32 = 100;
/// Longest accepted loan term or goal timeframe.
pub const MAX_MONTHS: u32 = 1_200;
/// Bound on the absolute annual rate; keeps `(1 + r)^n` finite over [`MAX_MONTHS`].
pub const MAX_ANNUAL_RATE_PERCENT: f64 = 500.0;

fn finite(field: &'static str, value: f64) -> Result<f64, InputError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InputError::NotFinite { field })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), InputError> {
    if finite(field, value)? < 0.0 {
        return Err(InputError::Negative { field });
    }
    Ok(())
}

fn annual_rate(field: &'static str, value: f64) -> Result<(), InputError> {
    if finite(field, value)?.abs() > MAX_ANNUAL_RATE_PERCENT {
        return Err(InputError::OutOfRange {
            field,
            min: -MAX_ANNUAL_RATE_PERCENT,
            max: MAX_ANNUAL_RATE_PERCENT,
        });
    }
    Ok(())
}

fn months(field: &'static str, value: u32, max: u32) -> Result<(), InputError> {
    if value == 0 {
        return Err(InputError::NotPositive { field });
    }
    at_most(field, value, max)
}

fn at_most(field: &'static str, value: u32, max: u32) -> Result<(), InputError> {
    if value > max {
        return Err(InputError::TooLarge { field, max });
    }
    Ok(())
}

fn positive(field: &'static str, value: f64) -> Result<(), InputError> {
    if finite(field, value)? <= 0.0 {
        return Err(InputError::NotPositive { field });
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentParameters {
    pub initial_amount: f64,
    pub monthly_contribution: f64,
    pub annual_rate_percent: f64,
    pub period_years: u32,
}

impl Default for InvestmentParameters {
    fn default() -> Self {
        Self {
            initial_amount: 5_000.0,
            monthly_contribution: 500.0,
            annual_rate_percent: 10.0,
            period_years: 10,
        }
    }
}

impl InvestmentParameters {
    /// A zero-year period is allowed and yields a single snapshot.
    pub fn validate(&self) -> Result<(), InputError> {
        non_negative("initialAmount", self.initial_amount)?;
        non_negative("monthlyContribution", self.monthly_contribution)?;
        annual_rate("annualRatePercent", self.annual_rate_percent)?;
        at_most("periodYears", self.period_years, MAX_PERIOD_YEARS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlySnapshot {
    pub year_index: u32,
    pub cumulative_total: f64,
    pub cumulative_invested: f64,
    pub cumulative_interest: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentProjection {
    pub final_balance: f64,
    pub total_invested: f64,
    pub total_interest: f64,
    pub series: Vec<YearlySnapshot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanParameters {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub term_months: u32,
}

impl Default for LoanParameters {
    fn default() -> Self {
        Self {
            principal: 250_000.0,
            annual_rate_percent: 9.5,
            term_months: 360,
        }
    }
}

impl LoanParameters {
    pub fn validate(&self) -> Result<(), InputError> {
        positive("principal", self.principal)?;
        annual_rate("annualRatePercent", self.annual_rate_percent)?;
        months("termMonths", self.term_months, MAX_MONTHS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanSummary {
    pub monthly_payment: f64,
    pub total_payment: f64,
    pub total_interest: f64,
}

/// Principal versus interest split of everything paid over the loan term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanComposition {
    pub principal: f64,
    pub interest: f64,
    pub interest_share: f64,
}

impl LoanSummary {
    pub fn composition(&self) -> LoanComposition {
        let principal = self.total_payment - self.total_interest;
        let interest_share = if self.total_payment.abs() > 0.0 {
            self.total_interest / self.total_payment
        } else {
            0.0
        };
        LoanComposition {
            principal,
            interest: self.total_interest,
            interest_share,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalParameters {
    pub target_amount: f64,
    pub current_savings: f64,
    pub annual_rate_percent: f64,
    pub timeframe_months: u32,
}

impl Default for GoalParameters {
    fn default() -> Self {
        Self {
            target_amount: 50_000.0,
            current_savings: 2_000.0,
            annual_rate_percent: 8.0,
            timeframe_months: 24,
        }
    }
}

impl GoalParameters {
    pub fn validate(&self) -> Result<(), InputError> {
        positive("targetAmount", self.target_amount)?;
        non_negative("currentSavings", self.current_savings)?;
        annual_rate("annualRatePercent", self.annual_rate_percent)?;
        months("timeframeMonths", self.timeframe_months, MAX_MONTHS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalSolution {
    pub required_monthly_contribution: f64,
    /// True while a positive monthly contribution is still needed.
    pub is_possible: bool,
    /// Balance reached by the current savings alone at the end of the timeframe.
    pub projected_savings: f64,
}
