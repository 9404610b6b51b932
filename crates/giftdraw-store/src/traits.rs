//! Store trait: the abstract interface for roster persistence.
//!
//! This trait allows the draw engine to be storage-agnostic. Implementations
//! include a JSON file, SQLite, and in-memory (for tests).

use async_trait::async_trait;
use giftdraw_core::Roster;

use crate::error::Result;

/// Decision returned by the body of an exclusive section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access<T> {
    /// Persist the mutated roster, then hand `T` to the caller.
    Commit(T),
    /// Discard any mutation; nothing is written.
    Abort(T),
}

impl<T> Access<T> {
    /// The carried value, regardless of the decision.
    pub fn into_inner(self) -> T {
        match self {
            Self::Commit(value) | Self::Abort(value) => value,
        }
    }

    /// Whether this decision persists the roster.
    pub fn is_commit(&self) -> bool {
        matches!(self, Self::Commit(_))
    }
}

/// The Store trait: async interface for roster persistence.
///
/// All methods are async to support both blocking (file, SQLite) and async
/// backends. Blocking backends use `spawn_blocking` internally.
///
/// # Guarantees
///
/// - **Whole-roster writes**: a save is either fully visible to later reads
///   or not at all.
/// - **Serialized mutation**: bodies passed to [`Store::with_exclusive_access`]
///   never run concurrently against the same store.
/// - **Commit before success**: the value of a committing body is only
///   returned after the roster has been persisted.
#[async_trait]
pub trait Store: Send + Sync {
    /// Load a fresh snapshot of the roster.
    ///
    /// Returns durable state if any exists, otherwise the store's seed.
    async fn load(&self) -> Result<Roster>;

    /// Atomically overwrite the whole roster.
    async fn save(&self, roster: &Roster) -> Result<()>;

    /// Run `f` with sole mutation rights over a fresh roster snapshot.
    ///
    /// If `f` returns [`Access::Commit`] the roster it left behind is
    /// persisted before the value is returned. On [`Access::Abort`], or when
    /// persisting fails, the durable roster is left exactly as it was.
    async fn with_exclusive_access<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Roster) -> Access<T> + Send + 'static,
        T: Send + 'static;
}

/// Extension trait for common store patterns.
pub trait StoreExt: Store {
    /// Apply an unconditional mutation under exclusive access.
    fn update<F>(&self, f: F) -> impl std::future::Future<Output = Result<Roster>> + Send
    where
        F: FnOnce(&mut Roster) + Send + 'static;
}

impl<S: Store> StoreExt for S {
    async fn update<F>(&self, f: F) -> Result<Roster>
    where
        F: FnOnce(&mut Roster) + Send + 'static,
    {
        self.with_exclusive_access(move |roster| {
            f(roster);
            Access::Commit(roster.clone())
        })
        .await
    }
}
