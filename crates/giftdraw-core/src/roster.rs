//! Roster: the ordered collection of participants and their draw state.
//!
//! The roster is the single shared mutable resource of the system. It is
//! always handled as a whole: loaded as a snapshot, mutated in memory, and
//! written back as a whole.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::names::normalize;
use crate::participant::Participant;
use crate::types::ParticipantId;
use crate::validation::validate_roster;

/// Names used when no durable state and no seed file exist.
pub const BUILTIN_NAMES: &[&str] = &["Ana", "Bruno", "Carla", "Diego", "Elisa", "Fábio"];

/// The full ordered roster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default, alias = "participantes")]
    participants: Vec<Participant>,
}

impl Roster {
    /// Create a roster from participants, in the given order.
    pub fn new(participants: Vec<Participant>) -> Self {
        Self { participants }
    }

    /// Create a fresh roster from display names.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(names.into_iter().map(Participant::new).collect())
    }

    /// The built-in default roster.
    pub fn builtin() -> Self {
        Self::from_names(BUILTIN_NAMES.iter().copied())
    }

    /// Parse a roster document and check its invariants.
    ///
    /// Pair references that are not roster ids are matched to a participant
    /// by normalized display name before validation.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let mut roster: Self =
            serde_json::from_str(json).map_err(|e| CoreError::DecodingError(e.to_string()))?;
        roster.relink_references();
        validate_roster(&roster)?;
        Ok(roster)
    }

    /// Rewrite `drawn_target` and `assigned_by` values that name a
    /// participant as typed (`"maria"`) to that participant's id (`"Maria"`).
    ///
    /// References that already are ids, or match no name, are left alone.
    fn relink_references(&mut self) {
        let ids: HashSet<ParticipantId> =
            self.participants.iter().map(|p| p.id.clone()).collect();
        let mut by_name: HashMap<String, ParticipantId> = HashMap::new();
        for p in &self.participants {
            by_name
                .entry(normalize(&p.display_name))
                .or_insert_with(|| p.id.clone());
        }

        for p in &mut self.participants {
            for reference in [&mut p.drawn_target, &mut p.assigned_by].into_iter().flatten() {
                if ids.contains(&*reference) {
                    continue;
                }
                if let Some(id) = by_name.get(&normalize(reference.as_str())) {
                    *reference = id.clone();
                }
            }
        }
    }

    /// Encode the roster as a pretty-printed JSON document.
    pub fn to_json_pretty(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self).map_err(|e| CoreError::EncodingError(e.to_string()))
    }

    /// All participants, in roster order.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Iterate participants in roster order.
    pub fn iter(&self) -> std::slice::Iter<'_, Participant> {
        self.participants.iter()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Look up a participant by id.
    pub fn get(&self, id: &ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.id == id)
    }

    fn position(&self, id: &ParticipantId) -> Option<usize> {
        self.participants.iter().position(|p| &p.id == id)
    }

    /// Display name for an id, if the id is on the roster.
    pub fn display_name_of(&self, id: &ParticipantId) -> Option<&str> {
        self.get(id).map(|p| p.display_name.as_str())
    }

    /// Participants `requester` may legally draw, in roster order.
    ///
    /// Everyone except the requester who has not yet been drawn.
    pub fn eligible_targets(&self, requester: &ParticipantId) -> Vec<&Participant> {
        self.participants
            .iter()
            .filter(|p| &p.id != requester && p.is_available_target())
            .collect()
    }

    /// Participants who have not drawn yet, in roster order.
    pub fn pending_drawers(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter().filter(|p| !p.has_drawn)
    }

    /// Participants nobody has drawn yet, in roster order.
    pub fn pending_targets(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter().filter(|p| !p.is_assigned_as_target)
    }

    /// Whether every participant has drawn.
    pub fn is_complete(&self) -> bool {
        self.participants.iter().all(|p| p.has_drawn)
    }

    /// Record that `drawer` gives a gift to `target`.
    ///
    /// Sets both sides of the pair. Rejects the assignment without touching
    /// the roster if it would break a roster invariant.
    pub fn assign(&mut self, drawer: &ParticipantId, target: &ParticipantId) -> Result<(), CoreError> {
        if drawer == target {
            return Err(CoreError::SelfAssignment(drawer.clone()));
        }

        let drawer_idx = self
            .position(drawer)
            .ok_or_else(|| CoreError::UnknownParticipant(drawer.clone()))?;
        let target_idx = self
            .position(target)
            .ok_or_else(|| CoreError::UnknownParticipant(target.clone()))?;

        if self.participants[drawer_idx].has_drawn {
            return Err(CoreError::AlreadyDrawn(drawer.clone()));
        }
        if self.participants[target_idx].is_assigned_as_target {
            return Err(CoreError::AlreadyTargeted(target.clone()));
        }

        let d = &mut self.participants[drawer_idx];
        d.has_drawn = true;
        d.drawn_target = Some(target.clone());

        let t = &mut self.participants[target_idx];
        t.is_assigned_as_target = true;
        t.assigned_by = Some(drawer.clone());

        Ok(())
    }

    /// Clear every participant's draw state.
    pub fn reset(&mut self) {
        for p in &mut self.participants {
            p.clear();
        }
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Participant;
    type IntoIter = std::slice::Iter<'a, Participant>;

    fn into_iter(self) -> Self::IntoIter {
        self.participants.iter()
    }
}
