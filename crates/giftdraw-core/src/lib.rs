//! # Gift Draw Core
//!
//! Pure primitives for Gift Draw: participants, rosters, name resolution,
//! and the roster invariants.
//!
//! This crate contains no I/O, no storage, no networking. It is pure
//! computation over the roster.
//!
//! ## Key Types
//!
//! - [`Participant`] - One roster entry and its two write-once draw flags
//! - [`ParticipantId`] - Stable identifier, unique within a roster
//! - [`Roster`] - The ordered collection of participants
//! - [`MatchMode`] - How free-text names are matched against the roster
//!
//! ## Invariants
//!
//! Every committed roster satisfies [`validate_roster`]: nobody draws
//! themself, nobody is drawn twice, and both directions of every pair agree.

pub mod error;
pub mod names;
pub mod participant;
pub mod roster;
pub mod types;
pub mod validation;

pub use error::{CoreError, InvariantViolation, ResolveError};
pub use names::{candidates, normalize, resolve, MatchMode};
pub use participant::Participant;
pub use roster::{Roster, BUILTIN_NAMES};
pub use types::ParticipantId;
pub use validation::{is_derangement, validate_roster};
