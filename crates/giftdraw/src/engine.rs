//! The DrawEngine: resolve, replay, pick, commit.
//!
//! Every draw runs as one exclusive section over the roster store. The
//! section either commits a fully validated roster or leaves the stored
//! state untouched, so concurrent requests can never hand out the same
//! target twice and a failed write never produces a success response.

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use giftdraw_core::{resolve, validate_roster, MatchMode, Participant, ParticipantId, Roster};
use giftdraw_store::{Access, Store, StoreExt};

use crate::admin::AdminGate;
use crate::error::{EngineError, Result};
use crate::report::{self, PairReport, ParticipantStatus};

/// How a target is picked from the eligible set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawStrategy {
    /// Uniformly at random among eligible targets.
    #[default]
    Uniform,
    /// Like `Uniform`, except that when exactly one other drawer is still
    /// pending and they are eligible, they are picked. This keeps the final
    /// drawer from being left with only themselves.
    ReserveLastSlot,
}

impl fmt::Display for DrawStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawStrategy::Uniform => write!(f, "uniform"),
            DrawStrategy::ReserveLastSlot => write!(f, "reserve_last_slot"),
        }
    }
}

impl FromStr for DrawStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "uniform" => Ok(DrawStrategy::Uniform),
            "reserve_last_slot" => Ok(DrawStrategy::ReserveLastSlot),
            other => Err(format!("unknown draw strategy: {other}")),
        }
    }
}

/// Configuration for the DrawEngine.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// How name queries are matched against display names.
    pub match_mode: MatchMode,
    /// How targets are picked.
    pub strategy: DrawStrategy,
    /// Gate for reporting and reset.
    pub admin: AdminGate,
}

/// Result of a draw request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DrawOutcome {
    /// A new assignment was committed.
    Assigned { drawer: String, target: String },
    /// The requester had already drawn; this is their stored target.
    AlreadyDrawn { drawer: String, target: String },
    /// The requester has not drawn but nobody is left to draw.
    NoCandidates { drawer: String },
}

impl DrawOutcome {
    /// The target revealed to the requester, if any.
    pub fn target(&self) -> Option<&str> {
        match self {
            DrawOutcome::Assigned { target, .. } | DrawOutcome::AlreadyDrawn { target, .. } => {
                Some(target)
            }
            DrawOutcome::NoCandidates { .. } => None,
        }
    }

    /// The resolved requester.
    pub fn drawer(&self) -> &str {
        match self {
            DrawOutcome::Assigned { drawer, .. }
            | DrawOutcome::AlreadyDrawn { drawer, .. }
            | DrawOutcome::NoCandidates { drawer } => drawer,
        }
    }
}

/// The draw engine.
///
/// Provides a unified API for:
/// - Drawing a target for a named participant
/// - Replaying a previous draw
/// - Reporting pairs and resetting the draw (privileged)
/// - Listing public participant status
pub struct DrawEngine<S: Store, R = StdRng> {
    /// The storage backend.
    store: Arc<S>,
    /// Random source, shared by all draws.
    rng: Arc<Mutex<R>>,
    /// Configuration.
    config: EngineConfig,
}

impl<S: Store, R> Clone for DrawEngine<S, R> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            rng: Arc::clone(&self.rng),
            config: self.config.clone(),
        }
    }
}

impl<S: Store> DrawEngine<S, StdRng> {
    /// Create an engine with an entropy-seeded random source.
    pub fn new(store: S, config: EngineConfig) -> Self {
        Self::with_rng(store, config, StdRng::from_entropy())
    }
}

impl<S: Store, R: RngCore + Send + 'static> DrawEngine<S, R> {
    /// Create an engine with the given random source.
    pub fn with_rng(store: S, config: EngineConfig, rng: R) -> Self {
        Self {
            store: Arc::new(store),
            rng: Arc::new(Mutex::new(rng)),
            config,
        }
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get the configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Drawing
    // ─────────────────────────────────────────────────────────────────────────

    /// Draw a target for the participant named by `query`.
    ///
    /// A participant who has already drawn gets their stored target back and
    /// nothing changes. Otherwise a target is picked from everyone not yet
    /// drawn except the requester, and the assignment is committed before
    /// this returns. If the commit fails the error is returned and the
    /// stored roster is as it was.
    pub async fn draw(&self, query: &str) -> Result<DrawOutcome> {
        if query.trim().is_empty() {
            return Err(EngineError::EmptyQuery);
        }

        let query = query.to_string();
        let mode = self.config.match_mode;
        let strategy = self.config.strategy;
        let rng = Arc::clone(&self.rng);

        let outcome = self
            .store
            .with_exclusive_access(move |roster| draw_in(roster, &query, mode, strategy, &rng))
            .await??;

        match &outcome {
            DrawOutcome::Assigned { drawer, .. } => {
                info!(drawer = %drawer, "Draw committed");
            }
            DrawOutcome::AlreadyDrawn { drawer, .. } => {
                debug!(drawer = %drawer, "Replayed previous draw");
            }
            DrawOutcome::NoCandidates { drawer } => {
                info!(drawer = %drawer, "No eligible targets left");
            }
        }

        Ok(outcome)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Public Views
    // ─────────────────────────────────────────────────────────────────────────

    /// Every participant's display name and whether they have drawn.
    pub async fn participants(&self) -> Result<Vec<ParticipantStatus>> {
        let roster = self.store.load().await?;
        Ok(report::roster_status(&roster))
    }

    /// Load the roster and check every invariant.
    pub async fn verify(&self) -> Result<()> {
        let roster = self.store.load().await?;
        validate_roster(&roster)?;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Privileged Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Completed pairs plus pending drawers and targets.
    ///
    /// Requires the admin key.
    pub async fn report(&self, admin_key: Option<&str>) -> Result<PairReport> {
        self.authorize("report", admin_key)?;
        let roster = self.store.load().await?;
        Ok(report::pairs(&roster))
    }

    /// Clear every assignment. Returns the number of participants.
    ///
    /// Requires the admin key.
    pub async fn reset(&self, admin_key: Option<&str>) -> Result<usize> {
        self.authorize("reset", admin_key)?;
        let roster = self.store.update(Roster::reset).await?;
        info!(participants = roster.len(), "Draw reset");
        Ok(roster.len())
    }

    fn authorize(&self, operation: &str, admin_key: Option<&str>) -> Result<()> {
        if self.config.admin.is_authorized(admin_key) {
            return Ok(());
        }
        warn!(
            operation,
            configured = self.config.admin.is_configured(),
            "Rejected privileged call"
        );
        Err(EngineError::Unauthorized)
    }
}

/// Body of the exclusive section for one draw.
fn draw_in<R: RngCore>(
    roster: &mut Roster,
    query: &str,
    mode: MatchMode,
    strategy: DrawStrategy,
    rng: &Mutex<R>,
) -> Access<Result<DrawOutcome>> {
    let requester = match resolve(query, roster, mode) {
        Ok(p) => p.clone(),
        Err(e) => return Access::Abort(Err(e.into())),
    };
    debug!(query, drawer = %requester.id, "Resolved requester");

    if let Some(target) = &requester.drawn_target {
        return Access::Abort(Ok(DrawOutcome::AlreadyDrawn {
            drawer: requester.display_name,
            target: name_of(roster, target),
        }));
    }

    let eligible: Vec<ParticipantId> = roster
        .eligible_targets(&requester.id)
        .into_iter()
        .map(|p| p.id.clone())
        .collect();
    if eligible.is_empty() {
        return Access::Abort(Ok(DrawOutcome::NoCandidates {
            drawer: requester.display_name,
        }));
    }

    let chosen = match select_target(roster, &requester, &eligible, strategy, rng) {
        Ok(id) => id,
        Err(e) => return Access::Abort(Err(e)),
    };

    if let Err(e) = roster.assign(&requester.id, &chosen) {
        return Access::Abort(Err(e.into()));
    }
    if let Err(v) = validate_roster(roster) {
        return Access::Abort(Err(v.into()));
    }

    Access::Commit(Ok(DrawOutcome::Assigned {
        drawer: requester.display_name,
        target: name_of(roster, &chosen),
    }))
}

fn select_target<R: RngCore>(
    roster: &Roster,
    requester: &Participant,
    eligible: &[ParticipantId],
    strategy: DrawStrategy,
    rng: &Mutex<R>,
) -> Result<ParticipantId> {
    if strategy == DrawStrategy::ReserveLastSlot {
        let mut others = roster.pending_drawers().filter(|p| p.id != requester.id);
        if let (Some(last), None) = (others.next(), others.next()) {
            if eligible.contains(&last.id) {
                return Ok(last.id.clone());
            }
        }
    }

    let mut rng = rng
        .lock()
        .map_err(|e| EngineError::Internal(format!("rng mutex poisoned: {}", e)))?;
    eligible
        .choose(&mut *rng)
        .cloned()
        .ok_or_else(|| EngineError::Internal("empty eligible set".into()))
}

fn name_of(roster: &Roster, id: &ParticipantId) -> String {
    roster
        .display_name_of(id)
        .unwrap_or(id.as_str())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use giftdraw_core::is_derangement;
    use giftdraw_store::MemoryStore;

    fn engine(names: &[&str], seed: u64) -> DrawEngine<MemoryStore> {
        DrawEngine::with_rng(
            MemoryStore::new(Roster::from_names(names.iter().copied())),
            EngineConfig {
                admin: AdminGate::new(Some("key".into())),
                ..EngineConfig::default()
            },
            StdRng::seed_from_u64(seed),
        )
    }

    #[tokio::test]
    async fn test_first_draw_assigns_other_participant() {
        let engine = engine(&["A", "B", "C"], 1);

        let outcome = engine.draw("A").await.unwrap();
        let DrawOutcome::Assigned { drawer, target } = outcome else {
            panic!("expected assignment");
        };
        assert_eq!(drawer, "A");
        assert!(target == "B" || target == "C");

        let roster = engine.store().load().await.unwrap();
        let a = roster.get(&"A".into()).unwrap();
        assert!(a.has_drawn);
        assert_eq!(a.drawn_target.as_ref().map(ParticipantId::as_str), Some(target.as_str()));
    }

    #[tokio::test]
    async fn test_second_draw_replays() {
        let engine = engine(&["A", "B", "C"], 2);

        let first = engine.draw("A").await.unwrap();
        let before = engine.store().load().await.unwrap();
        let second = engine.draw("a").await.unwrap();

        assert_eq!(
            second,
            DrawOutcome::AlreadyDrawn {
                drawer: "A".into(),
                target: first.target().unwrap().to_string(),
            }
        );
        assert_eq!(engine.store().load().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_two_person_roster() {
        let engine = engine(&["A", "B"], 3);

        assert_eq!(engine.draw("A").await.unwrap().target(), Some("B"));
        assert_eq!(engine.draw("B").await.unwrap().target(), Some("A"));
        assert!(is_derangement(&engine.store().load().await.unwrap()));
    }

    #[tokio::test]
    async fn test_single_participant_has_no_candidates() {
        let engine = engine(&["Solo"], 4);

        assert_eq!(
            engine.draw("solo").await.unwrap(),
            DrawOutcome::NoCandidates {
                drawer: "Solo".into()
            }
        );
        assert!(!engine.store().load().await.unwrap().get(&"Solo".into()).unwrap().has_drawn);
    }

    #[tokio::test]
    async fn test_resolution_errors() {
        let engine = engine(&["A", "B"], 5);

        assert!(matches!(engine.draw("").await, Err(EngineError::EmptyQuery)));
        assert!(matches!(engine.draw("   ").await, Err(EngineError::EmptyQuery)));
        assert!(matches!(engine.draw("Zed").await, Err(EngineError::NotFound(q)) if q == "Zed"));
    }

    #[tokio::test]
    async fn test_reserve_last_slot_skips_targeted_drawer() {
        // A→B done. B is the other pending drawer but already targeted.
        let mut roster = Roster::from_names(["A", "B", "C"]);
        roster.assign(&"A".into(), &"B".into()).unwrap();

        for seed in 0..16 {
            let engine = DrawEngine::with_rng(
                MemoryStore::new(roster.clone()),
                EngineConfig {
                    strategy: DrawStrategy::ReserveLastSlot,
                    ..EngineConfig::default()
                },
                StdRng::seed_from_u64(seed),
            );
            assert_eq!(engine.draw("C").await.unwrap().target(), Some("A"));
            assert_eq!(engine.draw("B").await.unwrap().target(), Some("C"));
        }
    }

    #[tokio::test]
    async fn test_reserve_last_slot_prefers_last_drawer() {
        // A→C done. Pending drawers B, C; pending targets A, B.
        // Uniform would let C take A and strand B.
        let mut roster = Roster::from_names(["A", "B", "C"]);
        roster.assign(&"A".into(), &"C".into()).unwrap();

        for seed in 0..16 {
            let engine = DrawEngine::with_rng(
                MemoryStore::new(roster.clone()),
                EngineConfig {
                    strategy: DrawStrategy::ReserveLastSlot,
                    ..EngineConfig::default()
                },
                StdRng::seed_from_u64(seed),
            );
            assert_eq!(engine.draw("C").await.unwrap().target(), Some("B"));
            assert_eq!(engine.draw("B").await.unwrap().target(), Some("A"));
        }
    }

    #[tokio::test]
    async fn test_privileged_calls_require_key() {
        let engine = engine(&["A", "B"], 6);
        engine.draw("A").await.unwrap();

        assert!(matches!(engine.report(None).await, Err(EngineError::Unauthorized)));
        assert!(matches!(engine.report(Some("nope")).await, Err(EngineError::Unauthorized)));
        assert!(matches!(engine.reset(Some("nope")).await, Err(EngineError::Unauthorized)));

        let report = engine.report(Some("key")).await.unwrap();
        assert_eq!(report.completed_pairs.len(), 1);
    }

    #[tokio::test]
    async fn test_reset_clears_assignments() {
        let engine = engine(&["A", "B", "C"], 7);
        engine.draw("A").await.unwrap();
        engine.draw("B").await.unwrap();

        assert_eq!(engine.reset(Some("key")).await.unwrap(), 3);

        let roster = engine.store().load().await.unwrap();
        assert!(roster.iter().all(Participant::is_pristine));
        assert!(matches!(engine.draw("A").await.unwrap(), DrawOutcome::Assigned { .. }));
    }

    #[tokio::test]
    async fn test_participants_view() {
        let engine = engine(&["A", "B"], 8);
        engine.draw("B").await.unwrap();

        let status = engine.participants().await.unwrap();
        assert_eq!(status.len(), 2);
        assert!(!status[0].has_drawn);
        assert!(status[1].has_drawn);
        engine.verify().await.unwrap();
    }

    #[test]
    fn test_strategy_parse() {
        assert_eq!("uniform".parse::<DrawStrategy>().unwrap(), DrawStrategy::Uniform);
        assert_eq!(
            "Reserve-Last-Slot".parse::<DrawStrategy>().unwrap(),
            DrawStrategy::ReserveLastSlot
        );
        assert!("random".parse::<DrawStrategy>().is_err());
        assert_eq!(DrawStrategy::ReserveLastSlot.to_string(), "reserve_last_slot");
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = DrawOutcome::AlreadyDrawn {
            drawer: "A".into(),
            target: "B".into(),
        };
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["status"], "already_drawn");
        assert_eq!(value["target"], "B");
    }
}
