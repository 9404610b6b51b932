//! Seed sources: where a roster comes from before any durable state exists.
//!
//! Precedence is fixed for every backend: durable state if present, else
//! the configured seed file, else the built-in default list. Backends only
//! consult the seed when they hold no durable state of their own.

use std::path::PathBuf;

use giftdraw_core::Roster;
use tracing::{debug, warn};

use crate::error::Result;

/// The initial roster of a store.
#[derive(Debug, Clone, Default)]
pub enum SeedSource {
    /// The built-in default name list.
    #[default]
    Builtin,
    /// A bundled roster document; falls back to the built-in list if absent.
    File(PathBuf),
    /// An explicit roster.
    Roster(Roster),
}

impl SeedSource {
    /// Produce the seed roster.
    ///
    /// A missing seed file is not an error; a seed file that exists but
    /// cannot be parsed or validated is.
    pub fn load(&self) -> Result<Roster> {
        match self {
            Self::Builtin => Ok(Roster::builtin()),
            Self::Roster(roster) => Ok(roster.clone()),
            Self::File(path) => match std::fs::read_to_string(path) {
                Ok(json) => {
                    let roster = Roster::from_json(&json)?;
                    debug!(path = %path.display(), participants = roster.len(), "Loaded seed file");
                    Ok(roster)
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    warn!(path = %path.display(), "Seed file not found, using built-in roster");
                    Ok(Roster::builtin())
                }
                Err(e) => Err(e.into()),
            },
        }
    }
}

impl From<Roster> for SeedSource {
    fn from(roster: Roster) -> Self {
        Self::Roster(roster)
    }
}
