//! Error types for Gift Draw Core.

use thiserror::Error;

use crate::types::ParticipantId;

/// Core errors that can occur while manipulating a roster.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown participant: {0}")]
    UnknownParticipant(ParticipantId),

    #[error("participant {0} has already drawn")]
    AlreadyDrawn(ParticipantId),

    #[error("participant {0} has already been drawn by someone else")]
    AlreadyTargeted(ParticipantId),

    #[error("participant {0} cannot draw themself")]
    SelfAssignment(ParticipantId),

    #[error("encoding error: {0}")]
    EncodingError(String),

    #[error("decoding error: {0}")]
    DecodingError(String),

    #[error("invalid roster: {0}")]
    Invalid(#[from] InvariantViolation),
}

/// Errors from resolving a free-text name against the roster.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("a name is required")]
    EmptyQuery,

    #[error("no participant matches {0:?}")]
    NotFound(String),
}

/// A broken roster invariant.
///
/// Returned by [`validate_roster`](crate::validation::validate_roster). Any
/// of these means the persisted state is corrupt or a commit was built
/// incorrectly; the engine refuses to persist a roster that fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("duplicate participant id: {0}")]
    DuplicateId(ParticipantId),

    #[error("participants {first} and {second} have names that cannot be told apart")]
    AmbiguousName {
        first: ParticipantId,
        second: ParticipantId,
    },

    #[error("participant {0}: has_drawn disagrees with drawn_target")]
    DrawnFlagMismatch(ParticipantId),

    #[error("participant {0}: is_assigned_as_target disagrees with assigned_by")]
    TargetFlagMismatch(ParticipantId),

    #[error("participant {0} is assigned to themself")]
    SelfAssigned(ParticipantId),

    #[error("participant {target} is drawn by both {first} and {second}")]
    TargetDrawnTwice {
        target: ParticipantId,
        first: ParticipantId,
        second: ParticipantId,
    },

    #[error("participant {from} references unknown participant {missing}")]
    DanglingReference {
        from: ParticipantId,
        missing: ParticipantId,
    },

    #[error("{drawer} drew {target} but {target} does not record {drawer} as drawer")]
    AsymmetricPair {
        drawer: ParticipantId,
        target: ParticipantId,
    },
}
