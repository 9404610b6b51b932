//! # Gift Draw
//!
//! A gift-exchange draw engine: every participant draws exactly one other
//! participant, nobody draws themselves, and nobody is drawn twice.
//!
//! ## Overview
//!
//! Gift Draw provides:
//!
//! - **Name resolution**: accent- and case-insensitive lookup of a requester
//! - **Idempotent draws**: a participant who already drew gets the same answer back
//! - **Race-free commits**: each draw is one exclusive read-modify-write over the store
//! - **Administration**: pair reports and reset behind an admin key
//!
//! ## Key Concepts
//!
//! - **Roster**: The ordered list of participants and their assignments.
//! - **Eligible target**: Not yet drawn by anyone, and not the requester.
//! - **Replay**: Asking again after drawing reveals the stored target and changes nothing.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use giftdraw::{DrawEngine, EngineConfig};
//! use giftdraw::store::{SeedSource, SqliteStore};
//!
//! async fn example() {
//!     // Open storage, seeding from the built-in list on first run
//!     let store = SqliteStore::open("giftdraw.db", &SeedSource::Builtin).unwrap();
//!
//!     // Create the engine
//!     let engine = DrawEngine::new(store, EngineConfig::default());
//!
//!     // Draw for a participant
//!     let outcome = engine.draw("ana").await.unwrap();
//!     println!("{:?}", outcome.target());
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `giftdraw::core` - Roster model, name resolution, invariants
//! - `giftdraw::store` - Storage abstraction with file, SQLite, and memory backends

pub mod admin;
pub mod engine;
pub mod error;
pub mod report;

// Re-export component crates
pub use giftdraw_core as core;
pub use giftdraw_store as store;

// Re-export main types for convenience
pub use admin::AdminGate;
pub use engine::{DrawEngine, DrawOutcome, DrawStrategy, EngineConfig};
pub use error::{EngineError, Result};
pub use report::{pairs, roster_status, Pair, PairReport, ParticipantStatus};

// Re-export commonly used core types
pub use giftdraw_core::{MatchMode, Participant, ParticipantId, Roster};
