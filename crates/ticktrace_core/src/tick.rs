//! Tick numbers.
//!
//! A tick is one pass of the capture cycle. The tick number doubles as the
//! index of the snapshot taken on that pass.

use serde::{Deserialize, Serialize};

/// Tick counter - monotonically increasing, never reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tick(u64);

impl Tick {
    /// Tick zero, before any capture
    #[must_use]
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Create from raw value
    #[must_use]
    pub const fn from_raw(value: u64) -> Self {
        Self(value)
    }

    /// Get raw value
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Position of this tick's snapshot in the store, if addressable
    #[must_use]
    pub fn as_index(&self) -> Option<usize> {
        usize::try_from(self.0).ok()
    }

    /// Advance by one tick
    pub fn increment(&mut self) {
        self.0 += 1;
    }
}

impl Default for Tick {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for Tick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tick#{}", self.0)
    }
}

impl From<u64> for Tick {
    fn from(value: u64) -> Self {
        Self(value)
    }
}
