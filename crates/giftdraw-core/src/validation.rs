//! Roster validation: the draw invariants, checkable at any time.

use std::collections::{HashMap, HashSet};

use crate::error::InvariantViolation;
use crate::names::normalize;
use crate::roster::Roster;
use crate::types::ParticipantId;

/// Check every roster invariant.
///
/// This performs:
/// - Id uniqueness
/// - Display names distinct after normalization
/// - `has_drawn ⇔ drawn_target.is_some()`
/// - `is_assigned_as_target ⇔ assigned_by.is_some()`
/// - No self-assignment
/// - Injectivity of `drawn_target`
/// - Referential integrity and agreement between the two directions
pub fn validate_roster(roster: &Roster) -> Result<(), InvariantViolation> {
    // 1. Unique ids
    let mut seen = HashSet::with_capacity(roster.len());
    for p in roster {
        if !seen.insert(&p.id) {
            return Err(InvariantViolation::DuplicateId(p.id.clone()));
        }
    }

    // Every name must resolve to its own participant.
    let mut names: HashMap<String, &ParticipantId> = HashMap::with_capacity(roster.len());
    for p in roster {
        if let Some(first) = names.insert(normalize(&p.display_name), &p.id) {
            return Err(InvariantViolation::AmbiguousName {
                first: first.clone(),
                second: p.id.clone(),
            });
        }
    }

    // 2. Flag/value agreement and self-assignment
    for p in roster {
        if p.has_drawn != p.drawn_target.is_some() {
            return Err(InvariantViolation::DrawnFlagMismatch(p.id.clone()));
        }
        if p.is_assigned_as_target != p.assigned_by.is_some() {
            return Err(InvariantViolation::TargetFlagMismatch(p.id.clone()));
        }
        if p.drawn_target.as_ref() == Some(&p.id) || p.assigned_by.as_ref() == Some(&p.id) {
            return Err(InvariantViolation::SelfAssigned(p.id.clone()));
        }
    }

    // 3. Injectivity, referential integrity, symmetry
    let mut drawn_by: HashMap<&ParticipantId, &ParticipantId> = HashMap::new();
    for drawer in roster {
        let Some(target_id) = drawer.drawn_target.as_ref() else {
            continue;
        };

        if let Some(first) = drawn_by.insert(target_id, &drawer.id) {
            return Err(InvariantViolation::TargetDrawnTwice {
                target: target_id.clone(),
                first: first.clone(),
                second: drawer.id.clone(),
            });
        }

        let target = roster
            .get(target_id)
            .ok_or_else(|| InvariantViolation::DanglingReference {
                from: drawer.id.clone(),
                missing: target_id.clone(),
            })?;

        if target.assigned_by.as_ref() != Some(&drawer.id) {
            return Err(InvariantViolation::AsymmetricPair {
                drawer: drawer.id.clone(),
                target: target_id.clone(),
            });
        }
    }

    for target in roster {
        let Some(drawer_id) = target.assigned_by.as_ref() else {
            continue;
        };

        let drawer = roster
            .get(drawer_id)
            .ok_or_else(|| InvariantViolation::DanglingReference {
                from: target.id.clone(),
                missing: drawer_id.clone(),
            })?;

        if drawer.drawn_target.as_ref() != Some(&target.id) {
            return Err(InvariantViolation::AsymmetricPair {
                drawer: drawer_id.clone(),
                target: target.id.clone(),
            });
        }
    }

    Ok(())
}

/// Whether the roster is complete and its assignments form a derangement.
pub fn is_derangement(roster: &Roster) -> bool {
    roster.is_complete()
        && roster.iter().all(|p| p.is_assigned_as_target)
        && validate_roster(roster).is_ok()
}
