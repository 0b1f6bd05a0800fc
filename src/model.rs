use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

/// A repository inside the organization. Only the name is consumed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
}

/// One entry of a commit listing. Identified by its SHA; the nested
/// metadata mirrors the API payload shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitRef {
    pub sha: String,
    #[serde(default)]
    pub commit: CommitMeta,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommitMeta {
    #[serde(default)]
    pub author: Option<CommitAuthor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitAuthor {
    #[serde(default)]
    pub name: String,
    pub date: Option<DateTime<Utc>>,
}

/// Expanded form of a commit: its file-level diff statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitDetail {
    #[serde(default)]
    pub files: Vec<FileChange>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    pub filename: String,
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub deletions: u64,
}

/// An organization member as listed by the members endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub login: String,
}

/// User-detail payload; only the display name is consumed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub name: Option<String>,
}

/// Rate-limit payload of the quota endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RateStatus {
    #[serde(default)]
    pub rate: RateBudget,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RateBudget {
    #[serde(default)]
    pub remaining: u64,
    /// Unix timestamp at which the quota replenishes.
    #[serde(default)]
    pub reset: i64,
}

/// Per-user accumulator for one full crawl.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStat {
    pub login: String,
    pub display_name: String,
    pub commits: u64,
    pub additions: u64,
    pub deletions: u64,
}

impl UserStat {
    pub fn new(login: &str, display_name: &str) -> Self {
        Self {
            login: login.to_string(),
            display_name: display_name.to_string(),
            commits: 0,
            additions: 0,
            deletions: 0,
        }
    }

    pub fn add(&mut self, totals: crate::crawl::RepoTotals) {
        self.commits += totals.commits;
        self.additions += totals.additions;
        self.deletions += totals.deletions;
    }
}

/// Inclusive start, exclusive end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub since: DateTime<Utc>,
    pub until: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub org: String,
    pub base_branch: String,
    pub feature_branch: String,
    pub since: String,
    pub until: String,
    pub users: Vec<UserStat>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoListOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub org: String,
    pub repositories: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberEntry {
    pub login: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberListOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub org: String,
    pub members: Vec<MemberEntry>,
}
