//! Small JSON persistence helpers shared by the score table, settings and
//! level files.
//!
//! Writes go through a sibling `*.tmp` file that is renamed over the target,
//! so a crash mid-write never leaves a truncated file behind.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors raised while reading or writing persisted JSON.
#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid json in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type StorageResult<T> = Result<T, StorageError>;

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> StorageError + '_ {
    move |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn json_err(path: &Path) -> impl FnOnce(serde_json::Error) -> StorageError + '_ {
    move |source| StorageError::Json {
        path: path.to_path_buf(),
        source,
    }
}

/// Read and deserialize a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> StorageResult<T> {
    let text = fs::read_to_string(path).map_err(io_err(path))?;
    serde_json::from_str(&text).map_err(json_err(path))
}

/// Serialize `value` as pretty JSON and atomically replace `path` with it.
///
/// Missing parent directories are created.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> StorageResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err(parent))?;
    }
    let data = serde_json::to_vec_pretty(value).map_err(json_err(path))?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, data).map_err(io_err(&tmp))?;
    atomic_rename(&tmp, path)
}

fn atomic_rename(from: &Path, to: &Path) -> StorageResult<()> {
    // rename over an existing file fails on Windows
    #[cfg(target_os = "windows")]
    {
        if to.exists() {
            let _ = fs::remove_file(to);
        }
    }
    fs::rename(from, to).map_err(io_err(to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn test_write_creates_parent_dirs_and_leaves_no_tmp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("data.json");
        write_json_atomic(&path, &json!({ "a": 1 })).unwrap();

        let back: Value = read_json(&path).unwrap();
        assert_eq!(back["a"], 1);
        assert!(!path.with_file_name("data.json.tmp").exists());
    }

    #[test]
    fn test_write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        write_json_atomic(&path, &json!([1, 2, 3])).unwrap();
        write_json_atomic(&path, &json!([4])).unwrap();
        let back: Vec<i32> = read_json(&path).unwrap();
        assert_eq!(back, vec![4]);
    }

    #[test]
    fn test_read_errors_are_typed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        assert!(matches!(
            read_json::<Value>(&path),
            Err(StorageError::Io { .. })
        ));

        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            read_json::<Value>(&path),
            Err(StorageError::Json { .. })
        ));
    }
}
