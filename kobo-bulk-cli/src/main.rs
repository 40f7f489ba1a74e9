//! kobo-bulk: upload Excel rows to KoBoToolbox as XML submissions.

mod api;
mod cli;
mod config;
mod error;
mod excel;
mod join;
mod report;
mod submission;
#[cfg(test)]
mod testutil;

use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = cli::Cli::parse();
    cli::run(cli).await
}
