use clap::{Args, Parser, Subcommand};
use std::net::IpAddr;

use crate::advisor::{AdvisorConfig, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use crate::core::{GoalParameters, InvestmentParameters, LoanParameters};

#[derive(Parser, Debug)]
#[command(
    name = "finansmart",
    about = "Compound interest, loan amortization and savings goal calculators"
)]
pub struct Cli {
    #[arg(short, long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[command(flatten)]
    pub advisor: AdvisorArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the web calculators and JSON API
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,
        #[arg(long, default_value = "0.0.0.0")]
        bind: IpAddr,
    },
    /// Project monthly-compounded growth with recurring contributions
    Compound {
        #[command(flatten)]
        params: CompoundArgs,
        #[arg(long, help = "Ask the advisory service for commentary")]
        insights: bool,
    },
    /// Fixed monthly payment for a fully amortizing loan
    Loan {
        #[command(flatten)]
        params: LoanArgs,
        #[arg(long, help = "Ask the advisory service for commentary")]
        insights: bool,
    },
    /// Monthly deposit needed to reach a savings goal
    Goal {
        #[command(flatten)]
        params: GoalArgs,
        #[arg(long, help = "Ask the advisory service for commentary")]
        insights: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct AdvisorArgs {
    #[arg(long, env = "API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,
    #[arg(long, env = "ADVISOR_MODEL", default_value = DEFAULT_MODEL, global = true)]
    pub advisor_model: String,
    #[arg(long, env = "ADVISOR_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub advisor_base_url: String,
}

impl From<AdvisorArgs> for AdvisorConfig {
    fn from(value: AdvisorArgs) -> Self {
        AdvisorConfig {
            api_key: value.api_key,
            model: value.advisor_model,
            base_url: value.advisor_base_url,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

#[derive(Args, Debug, Clone, Copy)]
pub struct CompoundArgs {
    #[arg(long, default_value_t = 5000.0)]
    pub initial_amount: f64,
    #[arg(long, default_value_t = 500.0)]
    pub monthly_contribution: f64,
    #[arg(
        long,
        default_value_t = 10.0,
        allow_negative_numbers = true,
        help = "Annual return in percent, e.g. 10"
    )]
    pub annual_rate: f64,
    #[arg(long, default_value_t = 10)]
    pub period_years: u32,
}

impl From<CompoundArgs> for InvestmentParameters {
    fn from(value: CompoundArgs) -> Self {
        InvestmentParameters {
            initial_amount: value.initial_amount,
            monthly_contribution: value.monthly_contribution,
            annual_rate_percent: value.annual_rate,
            period_years: value.period_years,
        }
    }
}

#[derive(Args, Debug, Clone, Copy)]
pub struct LoanArgs {
    #[arg(long, default_value_t = 250000.0)]
    pub principal: f64,
    #[arg(
        long,
        default_value_t = 9.5,
        allow_negative_numbers = true,
        help = "Annual interest rate in percent"
    )]
    pub annual_rate: f64,
    #[arg(long, default_value_t = 360)]
    pub term_months: u32,
}

impl From<LoanArgs> for LoanParameters {
    fn from(value: LoanArgs) -> Self {
        LoanParameters {
            principal: value.principal,
            annual_rate_percent: value.annual_rate,
            term_months: value.term_months,
        }
    }
}

#[derive(Args, Debug, Clone, Copy)]
pub struct GoalArgs {
    #[arg(long, default_value_t = 50000.0)]
    pub target_amount: f64,
    #[arg(long, default_value_t = 2000.0)]
    pub current_savings: f64,
    #[arg(
        long,
        default_value_t = 8.0,
        allow_negative_numbers = true,
        help = "Expected annual return in percent"
    )]
    pub annual_rate: f64,
    #[arg(long, default_value_t = 24)]
    pub timeframe_months: u32,
}

impl From<GoalArgs> for GoalParameters {
    fn from(value: GoalArgs) -> Self {
        GoalParameters {
            target_amount: value.target_amount,
            current_savings: value.current_savings,
            annual_rate_percent: value.annual_rate,
            timeframe_months: value.timeframe_months,
        }
    }
}
