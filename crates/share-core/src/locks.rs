//! Serialization of work on the same share path
//!
//! Flushing looks up the registered name and then edits by that name. If a
//! second reconciliation of the same path ran in between, the name could
//! change underneath it, so work on one path is serialized. Different paths
//! proceed independently.

use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use fs2::FileExt;
use tracing::debug;

use crate::Result;

/// A set of per-path locks
#[derive(Debug, Default)]
pub struct PathLocks {
    busy: Mutex<HashSet<String>>,
    released: Condvar,
}

impl PathLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn busy(&self) -> MutexGuard<'_, HashSet<String>> {
        self.busy.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Block until no one else holds `path`, then hold it until the guard
    /// is dropped
    pub fn lock(&self, path: &str) -> PathGuard<'_> {
        let mut busy = self.busy();
        while busy.contains(path) {
            busy = self
                .released
                .wait(busy)
                .unwrap_or_else(PoisonError::into_inner);
        }
        busy.insert(path.to_string());
        PathGuard {
            locks: self,
            path: path.to_string(),
        }
    }

    /// Whether `path` is currently held
    pub fn is_locked(&self, path: &str) -> bool {
        self.busy().contains(path)
    }
}

/// Holds one path of a [`PathLocks`]
#[derive(Debug)]
pub struct PathGuard<'a> {
    locks: &'a PathLocks,
    path: String,
}

impl Drop for PathGuard<'_> {
    fn drop(&mut self) {
        self.locks.busy().remove(&self.path);
        self.locks.released.notify_all();
    }
}

/// Exclusive advisory lock on a file, held for a whole sync run so two
/// processes never reconcile the same host at once
#[derive(Debug)]
pub struct RunLock {
    _file: File,
    path: PathBuf,
}

impl RunLock {
    /// Block until the lock on `path` is acquired, creating the file if needed
    pub fn acquire(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;
        file.lock_exclusive()?;
        debug!(path = %path.display(), "Acquired run lock");

        // Lock released when file is dropped
        Ok(Self {
            _file: file,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn guard_releases_on_drop() {
        let locks = PathLocks::new();
        {
            let _guard = locks.lock("/Shares/A");
            assert!(locks.is_locked("/Shares/A"));
            assert!(!locks.is_locked("/Shares/B"));
        }
        assert!(!locks.is_locked("/Shares/A"));
    }

    #[test]
    fn same_path_is_serialized() {
        let locks = Arc::new(PathLocks::new());
        let inside = Arc::new(AtomicUsize::new(0));
        let max_inside = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let locks = Arc::clone(&locks);
                let inside = Arc::clone(&inside);
                let max_inside = Arc::clone(&max_inside);
                thread::spawn(move || {
                    let _guard = locks.lock("/Shares/A");
                    let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                    max_inside.fetch_max(now, Ordering::SeqCst);
                    thread::sleep(Duration::from_millis(10));
                    inside.fetch_sub(1, Ordering::SeqCst);
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(max_inside.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn run_lock_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("sharectl.lock");

        let lock = RunLock::acquire(&path).unwrap();
        assert!(path.exists());
        assert_eq!(lock.path(), path.as_path());
    }
}
