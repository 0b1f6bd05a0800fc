use thiserror::Error;

pub type Result<T> = std::result::Result<T, OrgStatsError>;

#[derive(Error, Debug)]
pub enum OrgStatsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("API request failed with status {status}: {url}")]
    Api { status: u16, url: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Roster error: {0}")]
    Roster(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}
