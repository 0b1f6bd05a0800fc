use crate::cache::CommitCache;
use crate::cli::CommonArgs;
use crate::fetch::paged;
use crate::github::{GitHubApi, RestClient};
use crate::model::{DateRange, Repository, UserStat};
use crate::rate::RateGate;
use crate::roster::{self, Contributor};
use anyhow::Context;
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

use super::{accumulate, output_json, output_ndjson, output_table, unique_commits};

#[allow(clippy::too_many_arguments)]
pub fn exec(
    common: CommonArgs,
    roster_path: PathBuf,
    base_branch: String,
    feature_branch: String,
    since: String,
    until: String,
    cache_path: PathBuf,
    json: bool,
    ndjson: bool,
    verbose: bool,
) -> anyhow::Result<()> {
    let started = Utc::now();

    let contributors = roster::read_roster(&roster_path).context("Failed to read roster")?;
    let range = crate::util::resolve_range(&since, &until).context("Failed to resolve date range")?;
    let api = RestClient::new(&common.token, common.page_size)
        .context("Failed to create API client")?;
    let gate = RateGate::new(common.rate_threshold);
    let mut cache = CommitCache::load(&cache_path).context("Failed to load commit cache")?;

    let table = !json && !ndjson;
    let report = run(
        &api,
        &gate,
        &mut cache,
        &common.org,
        &contributors,
        &base_branch,
        &feature_branch,
        &range,
        table && verbose,
        table,
    );

    cache.save().context("Failed to persist commit cache")?;

    if json {
        output_json(&report, &common.org, &base_branch, &feature_branch, &since, &until)?;
    } else if ndjson {
        output_ndjson(&report)?;
    } else {
        output_table(&report, Utc::now() - started)?;
    }

    Ok(())
}

/// Drives the full crawl: discover repositories once, then walk every
/// (user, repository) pair through the branch resolver and the aggregator.
/// The caller owns the cache lifecycle around this call.
#[allow(clippy::too_many_arguments)]
pub fn run(
    api: &dyn GitHubApi,
    gate: &RateGate,
    cache: &mut CommitCache,
    org: &str,
    contributors: &[Contributor],
    base_branch: &str,
    feature_branch: &str,
    range: &DateRange,
    verbose: bool,
    progress: bool,
) -> Vec<UserStat> {
    let pb = if progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    pb.set_message(format!("Discovering repositories in {org}..."));
    let repos: Vec<Repository> = paged(|page| {
        gate.acquire(api);
        api.list_repositories(org, page)
    })
    .collect();
    pb.println(format!("Found {} repositories", repos.len()));

    let mut report = Vec::with_capacity(contributors.len());
    for (index, contributor) in contributors.iter().enumerate() {
        pb.set_message(format!(
            "Crawling {} ({}/{})",
            contributor.login,
            index + 1,
            contributors.len()
        ));

        let mut stat = UserStat::new(&contributor.login, &contributor.display_name);
        for repo in &repos {
            let commits = unique_commits(
                api,
                gate,
                org,
                &repo.name,
                base_branch,
                feature_branch,
                &contributor.login,
                range,
            );
            pb.inc(1);
            if commits.is_empty() {
                continue;
            }
            if verbose {
                pb.println(format!(
                    "  {}: {} unique commits by {}",
                    repo.name,
                    commits.len(),
                    contributor.login
                ));
            }
            let totals = accumulate(
                api,
                gate,
                cache,
                org,
                &repo.name,
                commits.keys().map(String::as_str),
            );
            stat.add(totals);
        }
        report.push(stat);
    }

    pb.finish_and_clear();
    report
}
