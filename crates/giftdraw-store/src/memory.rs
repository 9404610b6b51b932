//! In-memory implementation of the Store trait.
//!
//! This is primarily for testing. It has the same semantics as the durable
//! backends but keeps the roster in memory with no persistence.

use std::sync::Mutex;

use async_trait::async_trait;
use giftdraw_core::{validate_roster, CoreError, Roster};

use crate::error::{Result, StoreError};
use crate::seed::SeedSource;
use crate::traits::{Access, Store};

/// In-memory store implementation.
///
/// All data is lost when the store is dropped. Thread-safe via Mutex; the
/// mutex is also the exclusive section.
pub struct MemoryStore {
    roster: Mutex<Roster>,
}

impl MemoryStore {
    /// Create a store holding the given roster.
    pub fn new(roster: Roster) -> Self {
        Self {
            roster: Mutex::new(roster),
        }
    }

    /// Create a store from a seed source.
    pub fn seeded(seed: &SeedSource) -> Result<Self> {
        Ok(Self::new(seed.load()?))
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Roster>> {
        self.roster
            .lock()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(Roster::builtin())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn load(&self) -> Result<Roster> {
        Ok(self.lock()?.clone())
    }

    async fn save(&self, roster: &Roster) -> Result<()> {
        validate_roster(roster).map_err(CoreError::from)?;
        *self.lock()? = roster.clone();
        Ok(())
    }

    async fn with_exclusive_access<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Roster) -> Access<T> + Send + 'static,
        T: Send + 'static,
    {
        let mut guard = self.lock()?;

        // Work on a copy so an aborted body leaves no trace.
        let mut working = guard.clone();
        match f(&mut working) {
            Access::Commit(value) => {
                *guard = working;
                Ok(value)
            }
            Access::Abort(value) => Ok(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_basic() {
        let store = MemoryStore::new(Roster::from_names(["A", "B"]));
        let roster = store.load().await.unwrap();
        assert_eq!(roster.len(), 2);
    }

    #[tokio::test]
    async fn test_commit_is_visible() {
        let store = MemoryStore::new(Roster::from_names(["A", "B"]));

        let value = store
            .with_exclusive_access(|roster| {
                roster.assign(&"A".into(), &"B".into()).unwrap();
                Access::Commit(7)
            })
            .await
            .unwrap();
        assert_eq!(value, 7);

        let roster = store.load().await.unwrap();
        assert!(roster.get(&"A".into()).unwrap().has_drawn);
    }

    #[tokio::test]
    async fn test_abort_discards_mutation() {
        let store = MemoryStore::new(Roster::from_names(["A", "B"]));

        store
            .with_exclusive_access(|roster| {
                roster.assign(&"A".into(), &"B".into()).unwrap();
                Access::Abort(())
            })
            .await
            .unwrap();

        let roster = store.load().await.unwrap();
        assert_eq!(roster, Roster::from_names(["A", "B"]));
    }

    #[tokio::test]
    async fn test_save_rejects_invalid_roster() {
        let store = MemoryStore::new(Roster::from_names(["A", "B"]));

        let mut participants = Roster::from_names(["A", "B"]).participants().to_vec();
        participants[1].assigned_by = Some("A".into());
        let broken = Roster::new(participants);

        assert!(matches!(
            store.save(&broken).await,
            Err(StoreError::InvalidData(_))
        ));
        assert_eq!(store.load().await.unwrap(), Roster::from_names(["A", "B"]));

        let mut valid = Roster::from_names(["A", "B"]);
        valid.assign(&"A".into(), &"B".into()).unwrap();
        store.save(&valid).await.unwrap();
        assert_eq!(store.load().await.unwrap(), valid);
    }

    #[tokio::test]
    async fn test_default_uses_builtin_roster() {
        let store = MemoryStore::default();
        assert_eq!(store.load().await.unwrap(), Roster::builtin());
    }
}
