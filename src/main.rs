use anyhow::Result;
use clap::Parser;
use orgstats::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.execute()
}
