use crate::fetch::paged;
use crate::github::GitHubApi;
use crate::model::{CommitRef, DateRange};
use crate::rate::RateGate;
use std::collections::BTreeMap;

/// Commits authored by `user` on either branch within `range`, keyed by
/// SHA.
///
/// The union is keyed by commit identity, not by a graph difference: a
/// commit merged from the feature branch into the base branch under the
/// same SHA collapses to one entry, while a rebased or cherry-picked copy
/// carries a new SHA and counts separately.
pub fn unique_commits(
    api: &dyn GitHubApi,
    gate: &RateGate,
    org: &str,
    repo: &str,
    base_branch: &str,
    feature_branch: &str,
    user: &str,
    range: &DateRange,
) -> BTreeMap<String, CommitRef> {
    let mut commits = commits_on_branch(api, gate, org, repo, base_branch, user, range);
    for (sha, commit) in commits_on_branch(api, gate, org, repo, feature_branch, user, range) {
        commits.entry(sha).or_insert(commit);
    }
    commits
}

fn commits_on_branch(
    api: &dyn GitHubApi,
    gate: &RateGate,
    org: &str,
    repo: &str,
    branch: &str,
    user: &str,
    range: &DateRange,
) -> BTreeMap<String, CommitRef> {
    paged(|page| {
        gate.acquire(api);
        api.list_commits(org, repo, branch, user, range, page)
    })
    .map(|commit| (commit.sha.clone(), commit))
    .collect()
}
