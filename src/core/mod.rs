mod amortization;
mod goal;
mod growth;
mod rates;
pub mod summary;
mod types;

pub use amortization::amortize;
pub use goal::solve;
pub use growth::project;
pub use types::{
    GoalParameters, GoalSolution, InputError, InvestmentParameters, InvestmentProjection,
    LoanComposition, LoanParameters, LoanSummary, MAX_ANNUAL_RATE_PERCENT, MAX_MONTHS,
    MAX_PERIOD_YEARS, YearlySnapshot,
};
