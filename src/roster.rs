use crate::error::{OrgStatsError, Result};
use std::path::Path;

/// One roster row: the platform login and the name to report under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contributor {
    pub login: String,
    pub display_name: String,
}

/// Reads the `login,display name` roster. The crawl cannot start without
/// it, so a missing or unreadable file is fatal.
pub fn read_roster<P: AsRef<Path>>(path: P) -> Result<Vec<Contributor>> {
    let text = std::fs::read_to_string(path.as_ref()).map_err(|e| {
        OrgStatsError::Roster(format!("cannot read roster {}: {e}", path.as_ref().display()))
    })?;
    parse_roster(&text)
}

pub fn parse_roster(text: &str) -> Result<Vec<Contributor>> {
    let mut contributors = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (login, display_name) = line.split_once(',').ok_or_else(|| {
            OrgStatsError::Roster(format!(
                "line {}: expected 'login,display name', got '{line}'",
                index + 1
            ))
        })?;
        let login = login.trim();
        let display_name = display_name.trim();
        if login.is_empty() {
            return Err(OrgStatsError::Roster(format!("line {}: empty login", index + 1)));
        }
        contributors.push(Contributor {
            login: login.to_string(),
            display_name: if display_name.is_empty() {
                login.to_string()
            } else {
                display_name.to_string()
            },
        });
    }
    Ok(contributors)
}
