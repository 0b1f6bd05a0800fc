use crate::error::Result;
use crate::model::{CommitDetail, SCHEMA_VERSION};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    entries: Vec<SnapshotEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotEntry {
    repo: String,
    sha: String,
    detail: CommitDetail,
}

/// Durable `(repository, sha) -> CommitDetail` map. Commit history is
/// immutable upstream, so entries are never overwritten or evicted; the
/// whole map is loaded at process start and written back at process end.
pub struct CommitCache {
    entries: HashMap<String, HashMap<String, CommitDetail>>,
    path: PathBuf,
}

impl CommitCache {
    /// Loads the snapshot at `path`. A missing file or a snapshot written
    /// by an older schema starts an empty cache; neither is an error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match std::fs::read(&path) {
            Ok(bytes) => {
                let snapshot: Snapshot = serde_json::from_slice(&bytes)?;
                if snapshot.version == SCHEMA_VERSION {
                    let mut map: HashMap<String, HashMap<String, CommitDetail>> = HashMap::new();
                    for entry in snapshot.entries {
                        map.entry(entry.repo)
                            .or_default()
                            .entry(entry.sha)
                            .or_insert(entry.detail);
                    }
                    map
                } else {
                    HashMap::new()
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { entries, path })
    }

    pub fn get(&self, repo: &str, sha: &str) -> Option<&CommitDetail> {
        self.entries.get(repo)?.get(sha)
    }

    /// First write wins; an existing entry is kept untouched.
    pub fn put(&mut self, repo: &str, sha: &str, detail: CommitDetail) {
        self.entries
            .entry(repo.to_string())
            .or_default()
            .entry(sha.to_string())
            .or_insert(detail);
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Writes the snapshot atomically: serialize to a sibling temp file,
    /// then rename over the target.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut entries: Vec<SnapshotEntry> = self
            .entries
            .iter()
            .flat_map(|(repo, shas)| {
                shas.iter().map(|(sha, detail)| SnapshotEntry {
                    repo: repo.clone(),
                    sha: sha.clone(),
                    detail: detail.clone(),
                })
            })
            .collect();
        entries.sort_by(|a, b| (&a.repo, &a.sha).cmp(&(&b.repo, &b.sha)));

        let snapshot = Snapshot {
            version: SCHEMA_VERSION,
            entries,
        };

        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, serde_json::to_vec(&snapshot)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
