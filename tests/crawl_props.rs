use orgstats::cache::CommitCache;
use orgstats::crawl::{accumulate, run, unique_commits};
use orgstats::error::{OrgStatsError, Result};
use orgstats::github::GitHubApi;
use orgstats::model::{
    CommitDetail, CommitRef, DateRange, FileChange, Member, RateBudget, RateStatus, Repository,
    UserInfo,
};
use orgstats::rate::RateGate;
use orgstats::roster::Contributor;
use pretty_assertions::assert_eq;
use std::cell::Cell;
use std::collections::{HashMap, HashSet};
use tempfile::tempdir;

const PAGE: usize = 2;

/// In-memory stand-in for the REST surface. Listings are served in pages
/// of two so multi-page traversal is exercised.
#[derive(Default)]
struct FakeApi {
    repos: Vec<Repository>,
    commits: HashMap<(String, String, String), Vec<String>>,
    details: HashMap<(String, String), CommitDetail>,
    failing_details: HashSet<String>,
    detail_calls: Cell<usize>,
}

impl FakeApi {
    fn with_repos(names: &[&str]) -> Self {
        Self {
            repos: names
                .iter()
                .map(|n| Repository {
                    name: n.to_string(),
                })
                .collect(),
            ..Self::default()
        }
    }

    fn add_commit(&mut self, repo: &str, branch: &str, author: &str, sha: &str) {
        self.commits
            .entry((repo.to_string(), branch.to_string(), author.to_string()))
            .or_default()
            .push(sha.to_string());
    }

    fn add_detail(&mut self, repo: &str, sha: &str, files: &[(u64, u64)]) {
        let detail = CommitDetail {
            files: files
                .iter()
                .enumerate()
                .map(|(i, (additions, deletions))| FileChange {
                    filename: format!("file{i}.rs"),
                    additions: *additions,
                    deletions: *deletions,
                })
                .collect(),
        };
        self.details
            .insert((repo.to_string(), sha.to_string()), detail);
    }

    fn fail_detail(&mut self, sha: &str) {
        self.failing_details.insert(sha.to_string());
    }
}

fn page_of<T: Clone>(items: &[T], page: u32) -> Vec<T> {
    items
        .chunks(PAGE)
        .nth(page as usize - 1)
        .map(|chunk| chunk.to_vec())
        .unwrap_or_default()
}

impl GitHubApi for FakeApi {
    fn list_repositories(&self, _org: &str, page: u32) -> Result<Vec<Repository>> {
        Ok(page_of(&self.repos, page))
    }

    fn list_members(&self, _org: &str, _page: u32) -> Result<Vec<Member>> {
        Ok(Vec::new())
    }

    fn list_commits(
        &self,
        _org: &str,
        repo: &str,
        branch: &str,
        author: &str,
        _range: &DateRange,
        page: u32,
    ) -> Result<Vec<CommitRef>> {
        let shas = self
            .commits
            .get(&(repo.to_string(), branch.to_string(), author.to_string()))
            .cloned()
            .unwrap_or_default();
        Ok(page_of(&shas, page)
            .into_iter()
            .map(|sha| CommitRef {
                sha,
                commit: Default::default(),
            })
            .collect())
    }

    fn commit_detail(&self, _org: &str, repo: &str, sha: &str) -> Result<CommitDetail> {
        self.detail_calls.set(self.detail_calls.get() + 1);
        if self.failing_details.contains(sha) {
            return Err(OrgStatsError::Api {
                status: 404,
                url: format!("/repos/acme/{repo}/commits/{sha}"),
            });
        }
        self.details
            .get(&(repo.to_string(), sha.to_string()))
            .cloned()
            .ok_or(OrgStatsError::Api {
                status: 404,
                url: format!("/repos/acme/{repo}/commits/{sha}"),
            })
    }

    fn user(&self, _login: &str) -> Result<UserInfo> {
        Ok(UserInfo::default())
    }

    fn rate_status(&self) -> Result<RateStatus> {
        Ok(RateStatus {
            rate: RateBudget {
                remaining: 5000,
                reset: 0,
            },
        })
    }
}

fn gate() -> RateGate {
    RateGate::new(RateGate::DEFAULT_THRESHOLD)
}

fn range() -> DateRange {
    orgstats::util::resolve_range("2025-01-01", "2025-12-31").unwrap()
}

fn empty_cache(dir: &tempfile::TempDir) -> CommitCache {
    CommitCache::load(dir.path().join("cache.json")).unwrap()
}

#[test]
fn shared_commit_counts_once_across_branches() {
    let mut api = FakeApi::with_repos(&["widget"]);
    // c1 merged into main under the same SHA, c2 only on main, c3 by bob
    // only on feature.
    api.add_commit("widget", "main", "alice", "c1");
    api.add_commit("widget", "main", "alice", "c2");
    api.add_commit("widget", "feature", "alice", "c1");
    api.add_commit("widget", "feature", "bob", "c3");

    let alice = unique_commits(&api, &gate(), "acme", "widget", "main", "feature", "alice", &range());
    let shas: Vec<&str> = alice.keys().map(String::as_str).collect();
    assert_eq!(shas, vec!["c1", "c2"]);

    let bob = unique_commits(&api, &gate(), "acme", "widget", "main", "feature", "bob", &range());
    let shas: Vec<&str> = bob.keys().map(String::as_str).collect();
    assert_eq!(shas, vec!["c3"]);
}

#[test]
fn disjoint_branches_union_to_the_full_count() {
    let mut api = FakeApi::with_repos(&["widget"]);
    for sha in ["a1", "a2", "a3"] {
        api.add_commit("widget", "main", "alice", sha);
    }
    for sha in ["b1", "b2"] {
        api.add_commit("widget", "feature", "alice", sha);
    }

    let union = unique_commits(&api, &gate(), "acme", "widget", "main", "feature", "alice", &range());
    assert_eq!(union.len(), 5);
}

#[test]
fn no_commits_on_either_branch_yields_an_empty_set() {
    let api = FakeApi::with_repos(&["widget"]);
    let union = unique_commits(&api, &gate(), "acme", "widget", "main", "feature", "alice", &range());
    assert!(union.is_empty());
}

#[test]
fn listings_spanning_multiple_pages_are_fully_consumed() {
    let mut api = FakeApi::with_repos(&["widget"]);
    for i in 0..5 {
        api.add_commit("widget", "main", "alice", &format!("c{i}"));
    }

    let union = unique_commits(&api, &gate(), "acme", "widget", "main", "feature", "alice", &range());
    assert_eq!(union.len(), 5);
}

#[test]
fn accumulate_sums_file_changes_across_commits() {
    let mut api = FakeApi::with_repos(&["widget"]);
    api.add_detail("widget", "c1", &[(10, 2), (3, 1)]);
    api.add_detail("widget", "c2", &[(5, 5)]);

    let dir = tempdir().unwrap();
    let mut cache = empty_cache(&dir);
    let totals = accumulate(&api, &gate(), &mut cache, "acme", "widget", ["c1", "c2"]);

    assert_eq!(totals.commits, 2);
    assert_eq!(totals.additions, 18);
    assert_eq!(totals.deletions, 8);
}

#[test]
fn warm_cache_issues_no_detail_requests() {
    let mut api = FakeApi::with_repos(&["widget"]);
    api.add_detail("widget", "c1", &[(10, 2)]);

    let dir = tempdir().unwrap();
    let mut cache = empty_cache(&dir);

    let first = accumulate(&api, &gate(), &mut cache, "acme", "widget", ["c1"]);
    assert_eq!(api.detail_calls.get(), 1);

    let second = accumulate(&api, &gate(), &mut cache, "acme", "widget", ["c1"]);
    assert_eq!(api.detail_calls.get(), 1);
    assert_eq!(first, second);
}

#[test]
fn prepopulated_cache_entry_is_used_without_fetching() {
    let api = FakeApi::with_repos(&["widget"]);

    let dir = tempdir().unwrap();
    let mut cache = empty_cache(&dir);
    cache.put(
        "widget",
        "c1",
        CommitDetail {
            files: vec![FileChange {
                filename: "a.rs".to_string(),
                additions: 4,
                deletions: 2,
            }],
        },
    );

    let totals = accumulate(&api, &gate(), &mut cache, "acme", "widget", ["c1"]);
    assert_eq!(api.detail_calls.get(), 0);
    assert_eq!(totals.commits, 1);
    assert_eq!(totals.additions, 4);
    assert_eq!(totals.deletions, 2);
}

#[test]
fn failed_detail_fetch_skips_that_commit_only() {
    let mut api = FakeApi::with_repos(&["widget"]);
    api.add_detail("widget", "c1", &[(10, 2)]);
    api.fail_detail("c2");

    let dir = tempdir().unwrap();
    let mut cache = empty_cache(&dir);
    let totals = accumulate(&api, &gate(), &mut cache, "acme", "widget", ["c1", "c2"]);

    assert_eq!(totals.commits, 1);
    assert_eq!(totals.additions, 10);
    assert_eq!(totals.deletions, 2);
    // The failure must not poison the cache.
    assert!(cache.get("widget", "c2").is_none());
}

#[test]
fn run_reports_additive_totals_per_user() {
    let mut api = FakeApi::with_repos(&["widget", "gadget", "dormant"]);
    api.add_commit("widget", "main", "alice", "c1");
    api.add_commit("widget", "feature", "alice", "c1");
    api.add_commit("widget", "feature", "alice", "c2");
    api.add_commit("gadget", "main", "alice", "c3");
    api.add_commit("gadget", "feature", "bob", "c4");
    api.add_detail("widget", "c1", &[(10, 2)]);
    api.add_detail("widget", "c2", &[(3, 1), (1, 1)]);
    api.add_detail("gadget", "c3", &[(7, 0)]);
    api.add_detail("gadget", "c4", &[(2, 2)]);

    let contributors = vec![
        Contributor {
            login: "alice".to_string(),
            display_name: "Alice Liddell".to_string(),
        },
        Contributor {
            login: "bob".to_string(),
            display_name: "Bob Gray".to_string(),
        },
        Contributor {
            login: "carol".to_string(),
            display_name: "Carol Danvers".to_string(),
        },
    ];

    let dir = tempdir().unwrap();
    let mut cache = empty_cache(&dir);
    let report = run(
        &api,
        &gate(),
        &mut cache,
        "acme",
        &contributors,
        "main",
        "feature",
        &range(),
        false,
        false,
    );

    assert_eq!(report.len(), 3);

    let alice = &report[0];
    assert_eq!((alice.commits, alice.additions, alice.deletions), (3, 21, 4));

    let bob = &report[1];
    assert_eq!((bob.commits, bob.additions, bob.deletions), (1, 2, 2));

    // A contributor with no commits anywhere still gets a zero summary.
    let carol = &report[2];
    assert_eq!((carol.commits, carol.additions, carol.deletions), (0, 0, 0));
}

#[test]
fn persisted_cache_makes_a_second_crawl_fetch_free() {
    let mut api = FakeApi::with_repos(&["widget"]);
    api.add_commit("widget", "main", "alice", "c1");
    api.add_detail("widget", "c1", &[(10, 2)]);

    let contributors = vec![Contributor {
        login: "alice".to_string(),
        display_name: "Alice Liddell".to_string(),
    }];

    let dir = tempdir().unwrap();
    let path = dir.path().join("cache.json");

    let mut cache = CommitCache::load(&path).unwrap();
    let first = run(
        &api,
        &gate(),
        &mut cache,
        "acme",
        &contributors,
        "main",
        "feature",
        &range(),
        false,
        false,
    );
    cache.save().unwrap();
    assert_eq!(api.detail_calls.get(), 1);

    let mut reloaded = CommitCache::load(&path).unwrap();
    let second = run(
        &api,
        &gate(),
        &mut reloaded,
        "acme",
        &contributors,
        "main",
        "feature",
        &range(),
        false,
        false,
    );
    assert_eq!(api.detail_calls.get(), 1);
    assert_eq!(first, second);
}
