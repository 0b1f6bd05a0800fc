use crate::cache::CommitCache;
use crate::github::GitHubApi;
use crate::rate::RateGate;
use console::style;

/// One user's partial totals for a single repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepoTotals {
    pub commits: u64,
    pub additions: u64,
    pub deletions: u64,
}

/// Walks the resolved commit set, resolving each detail through the cache
/// before touching the network. A failed detail fetch skips that commit;
/// the rest of the repository still counts.
pub fn accumulate<'a, I>(
    api: &dyn GitHubApi,
    gate: &RateGate,
    cache: &mut CommitCache,
    org: &str,
    repo: &str,
    shas: I,
) -> RepoTotals
where
    I: IntoIterator<Item = &'a str>,
{
    let mut totals = RepoTotals::default();

    for sha in shas {
        let detail = match cache.get(repo, sha) {
            Some(detail) => detail.clone(),
            None => {
                gate.acquire(api);
                match api.commit_detail(org, repo, sha) {
                    Ok(detail) => {
                        cache.put(repo, sha, detail.clone());
                        detail
                    }
                    Err(e) => {
                        eprintln!(
                            "{} skipping commit {sha} in {repo}: {e}",
                            style("warning:").yellow().bold()
                        );
                        continue;
                    }
                }
            }
        };

        for file in &detail.files {
            totals.additions += file.additions;
            totals.deletions += file.deletions;
        }
        totals.commits += 1;
    }

    totals
}
