//! # Gift Draw Store
//!
//! Storage abstraction for Gift Draw. Provides a trait-based interface for
//! roster persistence with JSON file, SQLite, and in-memory implementations.
//!
//! ## Overview
//!
//! The store module abstracts roster storage behind the [`Store`] trait,
//! allowing the draw engine to be storage-agnostic. The durable backends
//! are [`FileStore`] and [`SqliteStore`], with [`MemoryStore`] for testing.
//!
//! ## Key Types
//!
//! - [`Store`] - The async trait for all storage operations
//! - [`Access`] - Commit/abort decision of an exclusive section
//! - [`SeedSource`] - Where a roster comes from before any durable state exists
//! - [`FileStore`] - JSON document with atomic replace-on-write
//! - [`SqliteStore`] - SQLite-based persistent storage
//! - [`MemoryStore`] - In-memory storage for tests
//!
//! ## Usage
//!
//! ```rust,no_run
//! use giftdraw_store::{Access, SeedSource, SqliteStore, Store};
//!
//! async fn example() {
//!     let store = SqliteStore::open("giftdraw.db", &SeedSource::Builtin).unwrap();
//!
//!     let drawn = store
//!         .with_exclusive_access(|roster| {
//!             let drawn = roster.iter().filter(|p| p.has_drawn).count();
//!             Access::Abort(drawn)
//!         })
//!         .await
//!         .unwrap();
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Whole-roster writes**: every save replaces the entire roster atomically
//! - **Validated writes**: a roster that breaks an invariant is never persisted
//! - **Seed precedence**: durable state, then seed file, then built-in list

pub mod error;
pub mod file;
pub mod memory;
pub mod migration;
pub mod seed;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use seed::SeedSource;
pub use sqlite::SqliteStore;
pub use traits::{Access, Store, StoreExt};
