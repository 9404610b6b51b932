//! The privileged-caller gate.
//!
//! Reporting and reset require a caller-supplied key that matches the
//! configured one. With no key configured every privileged call is refused.

use std::fmt;

/// Checks caller-supplied admin keys against the configured secret.
#[derive(Clone, Default)]
pub struct AdminGate {
    key: Option<String>,
}

impl AdminGate {
    /// Create a gate. An empty or blank key counts as no key.
    pub fn new(key: Option<String>) -> Self {
        Self {
            key: key.filter(|k| !k.trim().is_empty()),
        }
    }

    /// A gate that refuses everyone.
    pub fn closed() -> Self {
        Self { key: None }
    }

    /// Whether a key is configured.
    pub fn is_configured(&self) -> bool {
        self.key.is_some()
    }

    /// Whether `provided` matches the configured key.
    pub fn is_authorized(&self, provided: Option<&str>) -> bool {
        match (&self.key, provided) {
            (Some(expected), Some(provided)) => {
                constant_time_eq(expected.as_bytes(), provided.as_bytes())
            }
            _ => false,
        }
    }
}

impl fmt::Debug for AdminGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminGate")
            .field("configured", &self.is_configured())
            .finish()
    }
}

// Length leaks; content does not.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
