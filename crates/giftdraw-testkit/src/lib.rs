//! # Gift Draw Testkit
//!
//! Testing utilities for Gift Draw.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: Named rosters and ready-made stores for each backend
//! - **Failure injection**: [`FailingStore`], a store whose writes can be made to fail
//! - **Generators**: Proptest strategies for rosters and draw orders
//!
//! ## Test Fixtures
//!
//! ```rust
//! use giftdraw_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new(&["Ana", "Bruno", "Carla"]);
//! let store = fixture.memory_store();
//! let rng = fixture.rng();
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use giftdraw_testkit::generators::roster_with_order;
//!
//! proptest! {
//!     #[test]
//!     fn every_order_completes((roster, order) in roster_with_order(2, 8)) {
//!         // draw in `order`, check the result is a derangement
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{FailingStore, TestFixture};
pub use generators::{roster, roster_with_order};
