use crate::github::GitHubApi;
use crate::model::RateStatus;
use chrono::{DateTime, Utc};
use console::style;
use std::time::Duration;

/// Shared quota gate. Every API request goes through `acquire` first; the
/// budget is a single process-wide counter on the API side, so one gate
/// serves the whole crawl.
pub struct RateGate {
    threshold: u64,
    margin: Duration,
}

impl RateGate {
    pub const DEFAULT_THRESHOLD: u64 = 50;
    const MARGIN: Duration = Duration::from_secs(5);

    pub fn new(threshold: u64) -> Self {
        Self {
            threshold,
            margin: Self::MARGIN,
        }
    }

    /// Checks the remaining quota and sleeps through the reset window when
    /// it is below the threshold. A failed quota check is reported and
    /// ignored; the caller proceeds optimistically.
    pub fn acquire(&self, api: &dyn GitHubApi) {
        match api.rate_status() {
            Ok(status) => {
                if let Some(wait) = self.cooldown(&status, Utc::now()) {
                    eprintln!(
                        "{} rate limit nearly exhausted, sleeping {}s",
                        style("warning:").yellow().bold(),
                        wait.as_secs()
                    );
                    std::thread::sleep(wait);
                }
            }
            Err(e) => {
                eprintln!(
                    "{} could not fetch rate limit: {e}",
                    style("warning:").yellow().bold()
                );
            }
        }
    }

    /// Time to wait before the next request, or `None` when the quota is
    /// healthy. A reset timestamp already in the past still waits the
    /// safety margin.
    pub fn cooldown(&self, status: &RateStatus, now: DateTime<Utc>) -> Option<Duration> {
        if status.rate.remaining >= self.threshold {
            return None;
        }
        let until_reset = (status.rate.reset - now.timestamp()).max(0) as u64;
        Some(Duration::from_secs(until_reset) + self.margin)
    }
}
