//! Read-only projections over the roster.

use serde::{Deserialize, Serialize};

use giftdraw_core::Roster;

/// One completed draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pair {
    pub drawer: String,
    pub target: String,
}

/// Completed pairs and who is still pending, by display name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairReport {
    pub completed_pairs: Vec<Pair>,
    /// Participants who have not drawn yet.
    pub pending_drawers: Vec<String>,
    /// Participants nobody has drawn yet.
    pub pending_targets: Vec<String>,
}

/// Public per-participant view: name and whether they have drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantStatus {
    pub name: String,
    pub has_drawn: bool,
}

/// Project the roster into a pair report, in roster order.
pub fn pairs(roster: &Roster) -> PairReport {
    let completed_pairs = roster
        .iter()
        .filter_map(|p| {
            let target = p.drawn_target.as_ref()?;
            Some(Pair {
                drawer: p.display_name.clone(),
                target: roster
                    .display_name_of(target)
                    .unwrap_or(target.as_str())
                    .to_string(),
            })
        })
        .collect();

    PairReport {
        completed_pairs,
        pending_drawers: roster.pending_drawers().map(|p| p.display_name.clone()).collect(),
        pending_targets: roster.pending_targets().map(|p| p.display_name.clone()).collect(),
    }
}

/// Project the roster into the public status list.
pub fn roster_status(roster: &Roster) -> Vec<ParticipantStatus> {
    roster
        .iter()
        .map(|p| ParticipantStatus {
            name: p.display_name.clone(),
            has_drawn: p.has_drawn,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_roster_report() {
        let roster = Roster::from_names(["A", "B", "C"]);
        let report = pairs(&roster);

        assert!(report.completed_pairs.is_empty());
        assert_eq!(report.pending_drawers, vec!["A", "B", "C"]);
        assert_eq!(report.pending_targets, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_partial_roster_report() {
        let mut roster = Roster::from_names(["A", "B", "C"]);
        roster.assign(&"A".into(), &"B".into()).unwrap();

        let report = pairs(&roster);
        assert_eq!(
            report.completed_pairs,
            vec![Pair {
                drawer: "A".into(),
                target: "B".into()
            }]
        );
        assert_eq!(report.pending_drawers, vec!["B", "C"]);
        assert_eq!(report.pending_targets, vec!["A", "C"]);
    }

    #[test]
    fn test_report_uses_display_names() {
        let mut roster = Roster::new(vec![
            giftdraw_core::Participant::with_id("p1", "Ana"),
            giftdraw_core::Participant::with_id("p2", "Bruno"),
        ]);
        roster.assign(&"p2".into(), &"p1".into()).unwrap();

        let report = pairs(&roster);
        assert_eq!(report.completed_pairs[0].drawer, "Bruno");
        assert_eq!(report.completed_pairs[0].target, "Ana");
    }

    #[test]
    fn test_report_json_shape() {
        let mut roster = Roster::from_names(["A", "B"]);
        roster.assign(&"A".into(), &"B".into()).unwrap();

        let value = serde_json::to_value(pairs(&roster)).unwrap();
        assert_eq!(value["completedPairs"][0]["drawer"], "A");
        assert_eq!(value["completedPairs"][0]["target"], "B");
        assert_eq!(value["pendingDrawers"][0], "B");
        assert_eq!(value["pendingTargets"][0], "A");
    }

    #[test]
    fn test_roster_status() {
        let mut roster = Roster::from_names(["A", "B"]);
        roster.assign(&"B".into(), &"A".into()).unwrap();

        let status = roster_status(&roster);
        assert_eq!(
            status,
            vec![
                ParticipantStatus {
                    name: "A".into(),
                    has_drawn: false
                },
                ParticipantStatus {
                    name: "B".into(),
                    has_drawn: true
                },
            ]
        );
    }
}
