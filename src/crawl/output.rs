use crate::model::{CrawlOutput, UserStat, SCHEMA_VERSION};
use chrono::Utc;
use console::style;

pub fn output_json(
    report: &[UserStat],
    org: &str,
    base_branch: &str,
    feature_branch: &str,
    since: &str,
    until: &str,
) -> anyhow::Result<()> {
    let output = CrawlOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        org: org.to_string(),
        base_branch: base_branch.to_string(),
        feature_branch: feature_branch.to_string(),
        since: since.to_string(),
        until: until.to_string(),
        users: report.to_vec(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn output_ndjson(report: &[UserStat]) -> anyhow::Result<()> {
    for stat in report {
        println!("{}", serde_json::to_string(stat)?);
    }
    Ok(())
}

pub fn output_table(report: &[UserStat], elapsed: chrono::Duration) -> anyhow::Result<()> {
    println!(
        "{:<30} {:<20} {:>8} {:>10} {:>10}",
        style("Name").bold(),
        style("Login").bold(),
        style("Commits").bold(),
        style("Additions").bold(),
        style("Deletions").bold()
    );
    println!("{}", "─".repeat(82));
    for stat in report {
        println!(
            "{:<30} {:<20} {:>8} {:>10} {:>10}",
            stat.display_name, stat.login, stat.commits, stat.additions, stat.deletions
        );
    }
    println!("\nCrawl finished in {}s", elapsed.num_seconds());
    Ok(())
}
