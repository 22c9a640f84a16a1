//! Process-wide mutual exclusion per `(directory, repository name)`

use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock, Mutex};

use dashmap::DashMap;

type LockKey = (PathBuf, String);

static LOCKS: LazyLock<DashMap<LockKey, Arc<Mutex<()>>>> = LazyLock::new(DashMap::new);

/// Get the lock guarding the artifacts of `name` in `directory`.
///
/// Paths are canonicalized so different spellings of one directory share a lock.
pub fn handle(directory: &Path, name: &str) -> Arc<Mutex<()>> {
    let directory = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());
    LOCKS
        .entry((directory, name.to_string()))
        .or_insert_with(|| Arc::new(Mutex::new(())))
        .value()
        .clone()
}
