//! Name resolution: matching a free-text query against the roster.
//!
//! Both sides are normalized before comparison: trimmed, lowercased, put
//! through Unicode canonical decomposition (NFD), and stripped of combining
//! marks. `"  JOÃO "` and `"joao"` normalize to the same string.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::error::ResolveError;
use crate::participant::Participant;
use crate::roster::Roster;

/// How a normalized query is compared against normalized roster names.
///
/// Fixed per deployment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// The normalized name must equal the normalized query.
    #[default]
    Exact,
    /// The normalized name must contain the normalized query.
    ///
    /// When several names match, a name equal to the query wins, otherwise
    /// the first match in roster order.
    Contains,
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => f.write_str("exact"),
            Self::Contains => f.write_str("contains"),
        }
    }
}

impl FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(Self::Exact),
            "contains" | "substring" => Ok(Self::Contains),
            other => Err(format!("unknown match mode: {other}")),
        }
    }
}

/// Normalize a name for comparison.
pub fn normalize(s: &str) -> String {
    let folded: String = s
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();
    folded.trim().to_string()
}

/// All participants matching `query`, best match first.
///
/// In [`MatchMode::Contains`], exact normalized matches are moved ahead of
/// substring matches; otherwise roster order is kept.
pub fn candidates<'r>(query: &str, roster: &'r Roster, mode: MatchMode) -> Vec<&'r Participant> {
    let needle = normalize(query);
    if needle.is_empty() {
        return Vec::new();
    }

    match mode {
        MatchMode::Exact => roster
            .iter()
            .filter(|p| normalize(&p.display_name) == needle)
            .collect(),
        MatchMode::Contains => {
            let (mut exact, partial): (Vec<_>, Vec<_>) = roster
                .iter()
                .map(|p| (p, normalize(&p.display_name)))
                .filter(|(_, name)| name.contains(&needle))
                .partition(|(_, name)| *name == needle);
            exact.extend(partial);
            exact.into_iter().map(|(p, _)| p).collect()
        }
    }
}

/// Resolve a free-text query to exactly one participant.
pub fn resolve<'r>(
    query: &str,
    roster: &'r Roster,
    mode: MatchMode,
) -> Result<&'r Participant, ResolveError> {
    if query.trim().is_empty() {
        return Err(ResolveError::EmptyQuery);
    }

    candidates(query, roster, mode)
        .into_iter()
        .next()
        .ok_or_else(|| ResolveError::NotFound(query.trim().to_string()))
}
