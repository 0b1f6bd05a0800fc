use crate::cli::CommonArgs;
use crate::fetch::paged;
use crate::github::{GitHubApi, RestClient};
use crate::model::{RepoListOutput, Repository, SCHEMA_VERSION};
use crate::rate::RateGate;
use anyhow::Context;
use chrono::Utc;
use console::style;

pub fn exec(common: CommonArgs, json: bool) -> anyhow::Result<()> {
    let api = RestClient::new(&common.token, common.page_size)
        .context("Failed to create API client")?;
    let gate = RateGate::new(common.rate_threshold);

    let repos: Vec<Repository> = paged(|page| {
        gate.acquire(&api);
        api.list_repositories(&common.org, page)
    })
    .collect();

    if json {
        let output = RepoListOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            org: common.org.clone(),
            repositories: repos.into_iter().map(|r| r.name).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!(
            "{} repositories in {}",
            style(repos.len()).bold(),
            style(&common.org).bold()
        );
        for repo in &repos {
            println!("{}", repo.name);
        }
    }

    Ok(())
}
