//! JSON file implementation of the Store trait.
//!
//! The roster lives in a single JSON document. Every save goes to a temp
//! file in the same directory, is synced, and then renamed over the target,
//! so an interrupted write never leaves a truncated roster behind.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use giftdraw_core::{validate_roster, Roster};
use tempfile::NamedTempFile;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::seed::SeedSource;
use crate::traits::{Access, Store};

/// File-backed store implementation.
///
/// Writers within this process are serialized by an async mutex. The store
/// assumes it is the only process writing `path`.
pub struct FileStore {
    path: Arc<PathBuf>,
    seed: SeedSource,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open a store at `path`, seeding from `seed` until the first save.
    pub fn open(path: impl Into<PathBuf>, seed: SeedSource) -> Self {
        Self {
            path: Arc::new(path.into()),
            seed,
            write_lock: Mutex::new(()),
        }
    }

    /// The roster document path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<Roster> {
        let path = Arc::clone(&self.path);
        let seed = self.seed.clone();

        tokio::task::spawn_blocking(move || read_roster(&path, &seed))
            .await
            .map_err(|e| StoreError::Task(e.to_string()))?
    }

    async fn write(&self, roster: &Roster) -> Result<()> {
        validate_roster(roster).map_err(giftdraw_core::CoreError::from)?;
        let json = roster
            .to_json_pretty()
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let path = Arc::clone(&self.path);

        tokio::task::spawn_blocking(move || write_atomic(&path, json.as_bytes()))
            .await
            .map_err(|e| StoreError::Task(e.to_string()))?
    }
}

/// Read durable state, falling back to the seed if none exists yet.
fn read_roster(path: &Path, seed: &SeedSource) -> Result<Roster> {
    match std::fs::read_to_string(path) {
        Ok(json) => {
            let roster = Roster::from_json(&json)?;
            debug!(path = %path.display(), participants = roster.len(), "Loaded roster");
            Ok(roster)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => seed.load(),
        Err(e) => Err(e.into()),
    }
}

/// Replace `path` with `bytes` via temp file + fsync + rename.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| StoreError::Io(e.error))?;

    debug!(path = %path.display(), bytes = bytes.len(), "Roster written");
    Ok(())
}

#[async_trait]
impl Store for FileStore {
    async fn load(&self) -> Result<Roster> {
        self.read().await
    }

    async fn save(&self, roster: &Roster) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.write(roster).await
    }

    async fn with_exclusive_access<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Roster) -> Access<T> + Send + 'static,
        T: Send + 'static,
    {
        let _guard = self.write_lock.lock().await;

        let mut roster = self.read().await?;
        match f(&mut roster) {
            Access::Commit(value) => {
                self.write(&roster).await?;
                Ok(value)
            }
            Access::Abort(value) => Ok(value),
        }
    }
}
