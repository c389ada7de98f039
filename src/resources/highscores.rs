//! Persisted high-score table.
//!
//! The table is a small JSON list of `{ "name", "score", "ts" }` records kept
//! sorted best-first. Reads are tolerant (a missing or corrupt file is an empty
//! table, unreadable records are skipped) and writes are atomic.

use bevy_ecs::prelude::Resource;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::persist::{StorageResult, read_json, write_json_atomic};

pub const DEFAULT_CAPACITY: usize = 10;
pub const MAX_NAME_CHARS: usize = 12;
pub const ANONYMOUS_NAME: &str = "Anon";

/// One row of the score table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u64,
    /// Unix seconds when the score was submitted.
    pub ts: i64,
}

impl Default for ScoreEntry {
    fn default() -> Self {
        Self {
            name: ANONYMOUS_NAME.to_string(),
            score: 0,
            ts: 0,
        }
    }
}

impl ScoreEntry {
    pub fn new(name: &str, score: u64, ts: i64) -> Self {
        Self {
            name: sanitize_name(name),
            score,
            ts,
        }
    }
}

/// Empty names become [`ANONYMOUS_NAME`]; long names are cut to
/// [`MAX_NAME_CHARS`] characters.
pub fn sanitize_name(name: &str) -> String {
    if name.is_empty() {
        ANONYMOUS_NAME.to_string()
    } else {
        name.chars().take(MAX_NAME_CHARS).collect()
    }
}

fn sort_entries(entries: &mut [ScoreEntry]) {
    entries.sort_by(|a, b| b.score.cmp(&a.score).then(a.ts.cmp(&b.ts)));
}

/// Score table resource backed by a JSON file.
#[derive(Resource, Debug, Clone)]
pub struct HighScores {
    path: PathBuf,
    capacity: usize,
    entries: Vec<ScoreEntry>,
}

impl HighScores {
    /// Load the table at `path`. Never fails; problems are logged and yield an
    /// empty table.
    pub fn load(path: impl Into<PathBuf>, capacity: usize) -> Self {
        let mut scores = Self {
            path: path.into(),
            capacity: capacity.max(1),
            entries: Vec::new(),
        };
        scores.reload();
        scores
    }

    /// Re-read the backing file, replacing the in-memory rows.
    pub fn reload(&mut self) {
        self.entries = read_entries(&self.path);
        sort_entries(&mut self.entries);
        self.entries.truncate(self.capacity);
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    /// Highest recorded score, or 0 for an empty table.
    pub fn best(&self) -> u64 {
        self.entries.iter().map(|e| e.score).max().unwrap_or(0)
    }

    /// Add a score and persist the table.
    ///
    /// The file is re-read first so rows written by another session are kept.
    /// The in-memory table is updated even when the write fails.
    pub fn submit(&mut self, name: &str, score: u64, ts: i64) -> StorageResult<()> {
        let mut entries = read_entries(&self.path);
        entries.push(ScoreEntry::new(name, score, ts));
        sort_entries(&mut entries);
        entries.truncate(self.capacity);
        self.entries = entries;

        write_json_atomic(&self.path, &self.entries)?;
        info!(
            "Saved score {} for '{}' to {}",
            score,
            sanitize_name(name),
            self.path.display()
        );
        Ok(())
    }
}

fn read_entries(path: &Path) -> Vec<ScoreEntry> {
    if !path.exists() {
        return Vec::new();
    }
    match read_json::<Value>(path) {
        Ok(Value::Array(rows)) => rows
            .into_iter()
            .filter_map(|row| serde_json::from_value::<ScoreEntry>(row).ok())
            .collect(),
        Ok(_) => {
            warn!("Score file {} is not a list, ignoring it", path.display());
            Vec::new()
        }
        Err(e) => {
            warn!("Ignoring score file: {}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(dir: &tempfile::TempDir, capacity: usize) -> HighScores {
        HighScores::load(dir.path().join("Data").join("scores.json"), capacity)
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let scores = table(&dir, DEFAULT_CAPACITY);
        assert!(scores.entries().is_empty());
        assert_eq!(scores.best(), 0);
    }

    #[test]
    fn test_corrupt_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(&path, "[{ broken").unwrap();
        let scores = HighScores::load(&path, DEFAULT_CAPACITY);
        assert!(scores.entries().is_empty());
    }

    #[test]
    fn test_partial_rows_get_defaults_and_bad_rows_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(
            &path,
            r#"[{"score": 50}, {"name": "Zed", "score": "lots"}, 7, {"name": "Amy", "score": 90, "ts": 3}]"#,
        )
        .unwrap();
        let scores = HighScores::load(&path, DEFAULT_CAPACITY);
        assert_eq!(scores.entries().len(), 2);
        assert_eq!(scores.entries()[0].name, "Amy");
        assert_eq!(scores.entries()[1].name, ANONYMOUS_NAME);
        assert_eq!(scores.entries()[1].ts, 0);
        assert_eq!(scores.best(), 90);
    }

    #[test]
    fn test_submit_sorts_by_score_then_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let mut scores = table(&dir, DEFAULT_CAPACITY);
        scores.submit("late", 100, 20).unwrap();
        scores.submit("low", 10, 5).unwrap();
        scores.submit("early", 100, 10).unwrap();

        let names: Vec<&str> = scores.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["early", "late", "low"]);
    }

    #[test]
    fn test_file_never_exceeds_capacity() {
        let dir = tempfile::tempdir().unwrap();
        let mut scores = table(&dir, 3);
        for i in 0..10 {
            scores.submit("p", i * 10, i as i64).unwrap();
        }
        assert_eq!(scores.entries().len(), 3);
        assert_eq!(scores.best(), 90);

        let on_disk: Vec<ScoreEntry> = read_json(scores.path()).unwrap();
        assert_eq!(on_disk.len(), 3);
        assert_eq!(on_disk[2].score, 70);
    }

    #[test]
    fn test_submit_rereads_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = table(&dir, DEFAULT_CAPACITY);
        let mut b = table(&dir, DEFAULT_CAPACITY);
        a.submit("first", 5, 1).unwrap();
        b.submit("second", 6, 2).unwrap();
        assert_eq!(b.entries().len(), 2);

        a.reload();
        assert_eq!(a.best(), 6);
    }

    #[test]
    fn test_names_are_sanitized() {
        assert_eq!(sanitize_name(""), ANONYMOUS_NAME);
        assert_eq!(sanitize_name("abcdefghijklmnop"), "abcdefghijkl");
        assert_eq!(sanitize_name("Éllie"), "Éllie");
    }
}
