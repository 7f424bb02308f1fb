use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use std::net::SocketAddr;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use finansmart::advisor::Advisor;
use finansmart::api::cli::{Cli, Command};
use finansmart::api::{
    CalculationResponse, compound_response, goal_response, loan_response, run_http_server,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    let advisor = Advisor::from_config(cli.advisor.into());

    match cli.command {
        Command::Serve { port, bind } => {
            run_http_server(SocketAddr::new(bind, port), advisor).await?;
        }
        Command::Compound { params, insights } => {
            let response = compound_response(params.into())?;
            print_response(response, insights.then_some(&advisor)).await?;
        }
        Command::Loan { params, insights } => {
            let response = loan_response(params.into())?;
            print_response(response, insights.then_some(&advisor)).await?;
        }
        Command::Goal { params, insights } => {
            let response = goal_response(params.into())?;
            print_response(response, insights.then_some(&advisor)).await?;
        }
    }

    Ok(())
}

async fn print_response<P: Serialize, R: Serialize>(
    mut response: CalculationResponse<P, R>,
    advisor: Option<&Advisor>,
) -> Result<()> {
    if let Some(advisor) = advisor {
        response.insight = Some(advisor.insights(&response.context).await);
    }
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
