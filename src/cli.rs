use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "orgstats")]
#[command(about = "Per-contributor commit statistics for a GitHub organization")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, help = "GitHub organization name")]
    pub org: String,

    #[arg(
        long,
        env = "GITHUB_TOKEN",
        hide_env_values = true,
        help = "GitHub API token"
    )]
    pub token: String,

    #[arg(
        long,
        default_value_t = 100,
        help = "Page size for listing endpoints (API maximum is 100)"
    )]
    pub page_size: u32,

    #[arg(
        long,
        default_value_t = crate::rate::RateGate::DEFAULT_THRESHOLD,
        help = "Remaining-quota threshold below which the crawl pauses"
    )]
    pub rate_threshold: u64,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Crawl per-contributor commit statistics across two branches
    Crawl {
        #[arg(help = "Roster file of 'login,display name' lines")]
        roster: PathBuf,

        #[arg(long, default_value = "main", help = "Base branch to scan")]
        base_branch: String,

        #[arg(long, help = "Feature branch to scan alongside the base branch")]
        feature_branch: String,

        #[arg(long, help = "Window start, inclusive (RFC3339 or YYYY-MM-DD)")]
        since: String,

        #[arg(long, help = "Window end, exclusive (RFC3339 or YYYY-MM-DD)")]
        until: String,

        #[arg(
            long,
            default_value = "commit_cache.json",
            help = "Path to the commit-detail cache snapshot"
        )]
        cache: PathBuf,

        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,

        #[arg(long, help = "Print a line per repository with commits")]
        verbose: bool,
    },
    /// List the organization's repositories
    Repos {
        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// List the organization's members with their display names
    Members {
        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Crawl {
                roster,
                base_branch,
                feature_branch,
                since,
                until,
                cache,
                json,
                ndjson,
                verbose,
            } => crate::crawl::exec(
                self.common,
                roster,
                base_branch,
                feature_branch,
                since,
                until,
                cache,
                json,
                ndjson,
                verbose,
            ),
            Commands::Repos { json } => crate::repos::exec(self.common, json),
            Commands::Members { json } => crate::members::exec(self.common, json),
        }
    }
}
