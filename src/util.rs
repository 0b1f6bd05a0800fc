use crate::error::{OrgStatsError, Result};
use crate::model::DateRange;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

pub fn resolve_range(since: &str, until: &str) -> Result<DateRange> {
    let since = parse_date(since)?;
    let until = parse_date(until)?;
    if since > until {
        return Err(OrgStatsError::InvalidDate(format!(
            "since ({since}) is after until ({until})"
        )));
    }
    Ok(DateRange { since, until })
}

fn parse_date(input: &str) -> Result<DateTime<Utc>> {
    // RFC3339
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    // YYYY-MM-DD at midnight UTC
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(datetime) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&datetime));
        }
    }

    Err(OrgStatsError::InvalidDate(format!(
        "expected RFC3339 or YYYY-MM-DD, got '{input}'"
    )))
}
