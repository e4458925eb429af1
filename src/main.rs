use crate::generator::workflow::launch;
use anyhow::Result;
use clap::Parser;

mod cli;
mod config;
mod error;
mod generator;
mod llm;
mod logging;
mod parser;
mod render;
mod types;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Args::parse();
    let (config, command) = args.into_parts()?;
    logging::init(config.verbose);

    launch(&config, command).await
}
