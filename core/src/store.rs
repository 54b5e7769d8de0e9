//! State persistence layer.
//!
//! RULE: Only store.rs talks to the filesystem.
//! Everything above it sees an injected StateStore, so tests and
//! parallel simulations run against MemoryStore without colliding
//! on a shared path.
//!
//! No locking, no versioning. Concurrent invocations racing on
//! load/save are an accepted hazard of the deployment, not a
//! supported mode.

use crate::error::SimResult;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// A flat blob store keyed by file-name-like strings.
pub trait StateStore {
    /// Read a blob. Ok(None) when the key has never been written.
    fn read(&self, key: &str) -> SimResult<Option<String>>;

    fn write(&mut self, key: &str, contents: &str) -> SimResult<()>;

    /// Remove a blob. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> SimResult<()>;
}

/// One file per key under a fixed directory.
pub struct FsStore {
    dir: PathBuf,
}

impl FsStore {
    /// Open (or create) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> SimResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl StateStore for FsStore {
    fn read(&self, key: &str) -> SimResult<Option<String>> {
        match fs::read_to_string(self.path(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, key: &str, contents: &str) -> SimResult<()> {
        fs::write(self.path(key), contents)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> SimResult<()> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store (used in tests and for isolated runs).
#[derive(Default)]
pub struct MemoryStore {
    blobs: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn read(&self, key: &str) -> SimResult<Option<String>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn write(&mut self, key: &str, contents: &str) -> SimResult<()> {
        self.blobs.insert(key.to_string(), contents.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> SimResult<()> {
        self.blobs.remove(key);
        Ok(())
    }
}
