use crate::cli::CommonArgs;
use crate::fetch::paged;
use crate::github::{GitHubApi, RestClient};
use crate::model::{Member, MemberEntry, MemberListOutput, SCHEMA_VERSION};
use crate::rate::RateGate;
use anyhow::Context;
use chrono::Utc;
use console::style;

pub fn exec(common: CommonArgs, json: bool) -> anyhow::Result<()> {
    let api = RestClient::new(&common.token, common.page_size)
        .context("Failed to create API client")?;
    let gate = RateGate::new(common.rate_threshold);

    let members: Vec<Member> = paged(|page| {
        gate.acquire(&api);
        api.list_members(&common.org, page)
    })
    .collect();

    let mut entries = Vec::with_capacity(members.len());
    for member in members {
        gate.acquire(&api);
        let name = match api.user(&member.login) {
            Ok(info) => info.name,
            Err(e) => {
                eprintln!(
                    "{} could not fetch details for {}: {e}",
                    style("warning:").yellow().bold(),
                    member.login
                );
                None
            }
        };
        entries.push(MemberEntry {
            login: member.login,
            name,
        });
    }

    if json {
        let output = MemberListOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            org: common.org.clone(),
            members: entries,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!(
            "{} members in {}",
            style(entries.len()).bold(),
            style(&common.org).bold()
        );
        for entry in &entries {
            println!(
                "{:<20} {}",
                entry.login,
                entry.name.as_deref().unwrap_or("(no name)")
            );
        }
    }

    Ok(())
}
