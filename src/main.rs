mod cli;
mod client;
mod config;
mod logging;
mod planner;
mod prompt;
mod search;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = cli::Cli::parse();
    cli.run().await
}
