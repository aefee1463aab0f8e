// JSON snapshot persistence for the task list

use crate::task::Task;
use eyre::{Context, Result, eyre};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const STORE_FILE: &str = "tasks.json";
const CURRENT_VERSION: u32 = 1;

/// Versioned on-disk envelope for the task list
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    tasks: Vec<Task>,
}

/// Best-effort mirror of the in-memory task list
///
/// A single JSON snapshot under a fixed file name inside a `.taskpad`
/// directory. The in-memory store stays the source of truth; every save
/// rewrites the whole snapshot.
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    /// Open or create a store at the given path
    ///
    /// The snapshot will live in a `.taskpad` subdirectory of the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let base_path = path.as_ref().join(".taskpad");

        fs::create_dir_all(&base_path).context("Failed to create store directory")?;
        debug!(path = ?base_path, "Opened task store directory");

        Ok(Self { base_path })
    }

    /// Get the base path of this store
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn snapshot_path(&self) -> PathBuf {
        self.base_path.join(STORE_FILE)
    }

    /// Load the saved task list
    ///
    /// A missing snapshot is an empty list. Corrupt JSON or an unsupported
    /// version is an explicit error; callers that want to keep going use
    /// [`FileStore::load_or_default`].
    pub fn load(&self) -> Result<Vec<Task>> {
        let path = self.snapshot_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let data = fs::read_to_string(&path).context("Failed to read task snapshot")?;
        let snapshot: Snapshot =
            serde_json::from_str(&data).context("Failed to parse task snapshot")?;

        if snapshot.version != CURRENT_VERSION {
            return Err(eyre!(
                "Unsupported snapshot version: {} (expected {})",
                snapshot.version,
                CURRENT_VERSION
            ));
        }

        info!(count = snapshot.tasks.len(), "Loaded tasks from snapshot");
        Ok(snapshot.tasks)
    }

    /// Load the saved task list, or start empty when the snapshot is unusable
    ///
    /// The load error is reported as a warning; the next save overwrites the
    /// bad snapshot.
    pub fn load_or_default(&self) -> Vec<Task> {
        match self.load() {
            Ok(tasks) => tasks,
            Err(e) => {
                warn!(error = ?e, "Could not load saved tasks, starting with an empty list");
                Vec::new()
            }
        }
    }

    /// Rewrite the snapshot with the given tasks
    ///
    /// Writes to a temp file with an exclusive lock, fsyncs, then renames
    /// over the previous snapshot; a failed save never leaves a torn file.
    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        let snapshot = Snapshot {
            version: CURRENT_VERSION,
            tasks: tasks.to_vec(),
        };
        let json =
            serde_json::to_string_pretty(&snapshot).context("Failed to serialize task snapshot")?;

        let tmp_path = self.base_path.join(format!("{}.tmp", STORE_FILE));
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&tmp_path)
            .context("Failed to open snapshot file for writing")?;

        // Acquire exclusive lock before writing
        file.lock_exclusive().context("Failed to acquire file lock")?;

        file.write_all(json.as_bytes())?;
        writeln!(file)?;
        file.sync_all()?;

        // Lock is released when the file is dropped
        drop(file);

        fs::rename(&tmp_path, self.snapshot_path()).context("Failed to replace task snapshot")?;

        debug!(count = tasks.len(), "Saved task snapshot");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_tasks() -> Vec<Task> {
        let mut done = Task::new("Write documentation");
        done.completed = true;
        done.category = "work".to_string();
        vec![done, Task::new("Buy milk"), Task::new("Code review")]
    }

    #[test]
    fn test_open_creates_directory() {
        let temp = TempDir::new().unwrap();

        let _store = FileStore::open(temp.path()).unwrap();
        assert!(temp.path().join(".taskpad").exists());
    }

    #[test]
    fn test_load_missing_snapshot_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::open(temp.path()).unwrap();

        let tasks = store.load().unwrap();
        assert!(tasks.is_empty());
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::open(temp.path()).unwrap();
        let tasks = sample_tasks();

        store.save(&tasks).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded, tasks);
    }

    #[test]
    fn test_save_overwrites_previous_snapshot() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::open(temp.path()).unwrap();

        store.save(&sample_tasks()).unwrap();
        let remaining = vec![Task::new("Only one left")];
        store.save(&remaining).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, remaining);
    }

    #[test]
    fn test_snapshot_carries_version_tag() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::open(temp.path()).unwrap();

        store.save(&sample_tasks()).unwrap();

        let content = fs::read_to_string(store.base_path().join(STORE_FILE)).unwrap();
        assert!(content.contains("\"version\": 1"));
    }

    #[test]
    fn test_load_rejects_unsupported_version() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::open(temp.path()).unwrap();

        fs::write(
            store.base_path().join(STORE_FILE),
            r#"{"version":99,"tasks":[]}"#,
        )
        .unwrap();

        let err = store.load().unwrap_err();
        assert!(err.to_string().contains("Unsupported snapshot version"));
    }

    #[test]
    fn test_load_rejects_corrupt_json() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::open(temp.path()).unwrap();

        fs::write(store.base_path().join(STORE_FILE), "{not json").unwrap();

        assert!(store.load().is_err());
    }

    #[test]
    fn test_load_or_default_survives_corrupt_snapshot() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::open(temp.path()).unwrap();

        fs::write(store.base_path().join(STORE_FILE), "{not json").unwrap();

        assert!(store.load_or_default().is_empty());
    }
}
