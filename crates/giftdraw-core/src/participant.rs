//! Participant: one roster entry and its draw state.
//!
//! A participant carries two independent write-once flags: whether they
//! have drawn someone (`has_drawn` / `drawn_target`) and whether someone
//! has drawn them (`is_assigned_as_target` / `assigned_by`). Both pairs are
//! set by exactly one successful draw and only cleared by a roster reset.

use serde::{Deserialize, Serialize};

use crate::types::ParticipantId;

/// A single participant in the gift exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "ParticipantRecord")]
pub struct Participant {
    /// Stable identifier.
    pub id: ParticipantId,
    /// Original-case name shown to users.
    pub display_name: String,
    /// True once this participant has been assigned a target.
    pub has_drawn: bool,
    /// The participant this one gives a gift to.
    pub drawn_target: Option<ParticipantId>,
    /// True once someone else has drawn this participant.
    pub is_assigned_as_target: bool,
    /// The participant who drew this one.
    pub assigned_by: Option<ParticipantId>,
}

impl Participant {
    /// Create a fresh participant whose id is their display name.
    pub fn new(display_name: impl Into<String>) -> Self {
        let display_name = display_name.into();
        Self {
            id: ParticipantId::new(display_name.clone()),
            display_name,
            has_drawn: false,
            drawn_target: None,
            is_assigned_as_target: false,
            assigned_by: None,
        }
    }

    /// Create a fresh participant with an explicit id.
    pub fn with_id(id: impl Into<ParticipantId>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::new(display_name)
        }
    }

    /// Whether this participant can still be drawn by someone.
    pub fn is_available_target(&self) -> bool {
        !self.is_assigned_as_target
    }

    /// Clear all four state fields back to their initial values.
    pub fn clear(&mut self) {
        self.has_drawn = false;
        self.drawn_target = None;
        self.is_assigned_as_target = false;
        self.assigned_by = None;
    }

    /// Whether all four state fields hold their initial values.
    pub fn is_pristine(&self) -> bool {
        !self.has_drawn
            && self.drawn_target.is_none()
            && !self.is_assigned_as_target
            && self.assigned_by.is_none()
    }
}

/// On-disk shape of a participant.
///
/// Only the display name is required. Field aliases accept the data files
/// of the earlier deployment so they can be imported unchanged.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ParticipantRecord {
    #[serde(default)]
    id: Option<ParticipantId>,
    #[serde(alias = "name", alias = "nome")]
    display_name: String,
    #[serde(default, alias = "jaSorteou")]
    has_drawn: bool,
    #[serde(default, alias = "sorteou")]
    drawn_target: Option<ParticipantId>,
    #[serde(default, alias = "sorteado")]
    is_assigned_as_target: bool,
    #[serde(default, alias = "sorteadoPor")]
    assigned_by: Option<ParticipantId>,
}

impl From<ParticipantRecord> for Participant {
    fn from(record: ParticipantRecord) -> Self {
        let id = record
            .id
            .unwrap_or_else(|| ParticipantId::new(record.display_name.clone()));
        Self {
            id,
            display_name: record.display_name,
            has_drawn: record.has_drawn,
            drawn_target: record.drawn_target,
            is_assigned_as_target: record.is_assigned_as_target,
            assigned_by: record.assigned_by,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_participant_is_pristine() {
        let p = Participant::new("Ana");
        assert_eq!(p.id.as_str(), "Ana");
        assert!(p.is_pristine());
        assert!(p.is_available_target());
    }

    #[test]
    fn test_record_defaults_id_and_state() {
        let p: Participant = serde_json::from_str(r#"{"displayName":"Bruno"}"#).unwrap();
        assert_eq!(p, Participant::new("Bruno"));
    }

    #[test]
    fn test_record_accepts_legacy_fields() {
        let json = r#"{
            "nome": "Carla",
            "jaSorteou": true,
            "sorteou": "Ana",
            "sorteado": true,
            "sorteadoPor": "Bruno"
        }"#;
        let p: Participant = serde_json::from_str(json).unwrap();

        assert_eq!(p.id.as_str(), "Carla");
        assert!(p.has_drawn);
        assert_eq!(p.drawn_target, Some(ParticipantId::from("Ana")));
        assert!(p.is_assigned_as_target);
        assert_eq!(p.assigned_by, Some(ParticipantId::from("Bruno")));
    }

    #[test]
    fn test_serialize_uses_canonical_names() {
        let p = Participant::with_id("p1", "Ana");
        let value = serde_json::to_value(&p).unwrap();

        assert_eq!(value["id"], "p1");
        assert_eq!(value["displayName"], "Ana");
        assert_eq!(value["hasDrawn"], false);
        assert!(value["drawnTarget"].is_null());
        assert_eq!(value["isAssignedAsTarget"], false);
        assert!(value["assignedBy"].is_null());
    }

    #[test]
    fn test_clear() {
        let mut p = Participant::new("Ana");
        p.has_drawn = true;
        p.drawn_target = Some("Bruno".into());
        p.is_assigned_as_target = true;
        p.assigned_by = Some("Carla".into());

        p.clear();
        assert!(p.is_pristine());
    }
}
