//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;

use giftdraw_core::Roster;
use giftdraw_store::{
    Access, FileStore, MemoryStore, Result, SeedSource, SqliteStore, Store, StoreError,
};

/// The three-person roster `A`, `B`, `C`.
pub fn trio() -> Roster {
    Roster::from_names(["A", "B", "C"])
}

/// A roster whose names need accent and case folding to match.
pub fn accented() -> Roster {
    Roster::from_names(["José", "Márcia", "Ana Luíza", "Fábio"])
}

/// A roster where `A` has already drawn `B`.
pub fn partially_drawn() -> Roster {
    let mut roster = trio();
    roster
        .assign(&"A".into(), &"B".into())
        .expect("A and B are pristine members of the trio");
    roster
}

/// A test fixture with a roster and a deterministic random seed.
pub struct TestFixture {
    pub roster: Roster,
    pub seed: u64,
}

impl TestFixture {
    /// Create a fixture over the given names with seed 0.
    pub fn new(names: &[&str]) -> Self {
        Self {
            roster: Roster::from_names(names.iter().copied()),
            seed: 0,
        }
    }

    /// Create a fixture over an existing roster.
    pub fn from_roster(roster: Roster) -> Self {
        Self { roster, seed: 0 }
    }

    /// Use a different random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// A deterministic random source.
    pub fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.seed)
    }

    /// The roster as a seed source.
    pub fn seed_source(&self) -> SeedSource {
        SeedSource::Roster(self.roster.clone())
    }

    /// An in-memory store holding the roster.
    pub fn memory_store(&self) -> MemoryStore {
        MemoryStore::new(self.roster.clone())
    }

    /// An in-memory SQLite store seeded with the roster.
    pub fn sqlite_store(&self) -> Result<SqliteStore> {
        SqliteStore::open_memory(&self.seed_source())
    }

    /// A JSON file store under `dir` seeded with the roster.
    pub fn file_store(&self, dir: &Path) -> FileStore {
        FileStore::open(dir.join("giftdraw.json"), self.seed_source())
    }

    /// A memory store whose writes can be made to fail.
    pub fn failing_store(&self) -> FailingStore {
        FailingStore::new(self.memory_store())
    }
}

/// A store wrapper that can be told to fail every write.
///
/// While failing, exclusive sections still run so the caller does its full
/// work, but a `Commit` is turned into an I/O error and nothing is applied.
pub struct FailingStore<S = MemoryStore> {
    inner: S,
    fail_writes: AtomicBool,
}

impl<S: Store> FailingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Start or stop failing writes.
    pub fn set_failing(&self, failing: bool) {
        self.fail_writes.store(failing, Ordering::SeqCst);
    }

    pub fn is_failing(&self) -> bool {
        self.fail_writes.load(Ordering::SeqCst)
    }
}

fn injected() -> StoreError {
    StoreError::Io(io::Error::new(io::ErrorKind::Other, "injected write failure"))
}

#[async_trait]
impl<S: Store> Store for FailingStore<S> {
    async fn load(&self) -> Result<Roster> {
        self.inner.load().await
    }

    async fn save(&self, roster: &Roster) -> Result<()> {
        if self.is_failing() {
            return Err(injected());
        }
        self.inner.save(roster).await
    }

    async fn with_exclusive_access<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Roster) -> Access<T> + Send + 'static,
        T: Send + 'static,
    {
        if !self.is_failing() {
            return self.inner.with_exclusive_access(f).await;
        }

        let mut scratch = self.inner.load().await?;
        match f(&mut scratch) {
            Access::Commit(_) => Err(injected()),
            Access::Abort(value) => Ok(value),
        }
    }
}
