pub mod client;

pub use client::RestClient;

use crate::error::Result;
use crate::model::{CommitDetail, CommitRef, DateRange, Member, RateStatus, Repository, UserInfo};

/// The upstream REST surface the crawler consumes. Every listing call is
/// page-numbered and returns an empty vector past the last page; non-success
/// statuses surface as `OrgStatsError::Api` so callers can log and skip.
pub trait GitHubApi {
    fn list_repositories(&self, org: &str, page: u32) -> Result<Vec<Repository>>;

    fn list_members(&self, org: &str, page: u32) -> Result<Vec<Member>>;

    fn list_commits(
        &self,
        org: &str,
        repo: &str,
        branch: &str,
        author: &str,
        range: &DateRange,
        page: u32,
    ) -> Result<Vec<CommitRef>>;

    fn commit_detail(&self, org: &str, repo: &str, sha: &str) -> Result<CommitDetail>;

    fn user(&self, login: &str) -> Result<UserInfo>;

    fn rate_status(&self) -> Result<RateStatus>;
}
