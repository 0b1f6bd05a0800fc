use crate::error::{OrgStatsError, Result};
use crate::github::GitHubApi;
use crate::model::{CommitDetail, CommitRef, DateRange, Member, RateStatus, Repository, UserInfo};
use chrono::SecondsFormat;
use reqwest::blocking::Client as HttpClient;
use serde::de::DeserializeOwned;
use url::Url;

pub const GITHUB_API_URL: &str = "https://api.github.com";

/// Blocking REST client with token authentication. The crawl is strictly
/// sequential, so one connection pool and no async runtime.
pub struct RestClient {
    http: HttpClient,
    base_url: Url,
    token: String,
    per_page: u32,
}

impl RestClient {
    pub fn new(token: &str, per_page: u32) -> Result<Self> {
        Self::with_base_url(GITHUB_API_URL, token, per_page)
    }

    /// Point the client at a different API root (e.g. GitHub Enterprise).
    pub fn with_base_url(base_url: &str, token: &str, per_page: u32) -> Result<Self> {
        let http = HttpClient::builder()
            .user_agent(concat!("orgstats/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: Url::parse(base_url)?,
            token: token.to_string(),
            per_page,
        })
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let mut url = self.base_url.join(path)?;
        for (key, value) in query {
            url.query_pairs_mut().append_pair(key, value);
        }

        let response = self
            .http
            .get(url.clone())
            .header("Authorization", format!("token {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(OrgStatsError::Api {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.json()?)
    }

    fn page_query(&self, page: u32) -> [(&'static str, String); 2] {
        [
            ("per_page", self.per_page.to_string()),
            ("page", page.to_string()),
        ]
    }
}

impl GitHubApi for RestClient {
    fn list_repositories(&self, org: &str, page: u32) -> Result<Vec<Repository>> {
        self.get_json(&format!("/orgs/{org}/repos"), &self.page_query(page))
    }

    fn list_members(&self, org: &str, page: u32) -> Result<Vec<Member>> {
        self.get_json(&format!("/orgs/{org}/members"), &self.page_query(page))
    }

    fn list_commits(
        &self,
        org: &str,
        repo: &str,
        branch: &str,
        author: &str,
        range: &DateRange,
        page: u32,
    ) -> Result<Vec<CommitRef>> {
        let query = [
            ("sha", branch.to_string()),
            ("author", author.to_string()),
            ("since", range.since.to_rfc3339_opts(SecondsFormat::Secs, true)),
            ("until", range.until.to_rfc3339_opts(SecondsFormat::Secs, true)),
            ("per_page", self.per_page.to_string()),
            ("page", page.to_string()),
        ];
        self.get_json(&format!("/repos/{org}/{repo}/commits"), &query)
    }

    fn commit_detail(&self, org: &str, repo: &str, sha: &str) -> Result<CommitDetail> {
        self.get_json(&format!("/repos/{org}/{repo}/commits/{sha}"), &[])
    }

    fn user(&self, login: &str) -> Result<UserInfo> {
        self.get_json(&format!("/users/{login}"), &[])
    }

    fn rate_status(&self) -> Result<RateStatus> {
        self.get_json("/rate_limit", &[])
    }
}
