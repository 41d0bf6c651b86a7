//! Error types for ticktrace.

/// Result alias used across ticktrace
pub type TraceResult<T> = Result<T, TraceError>;

/// Errors raised while capturing or inspecting snapshots
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    /// The traced value could not be deep-copied
    #[error("Capture failed: {0}")]
    Capture(#[source] serde_json::Error),

    /// The traced value was mutably borrowed when a capture was due
    #[error("Target mutably borrowed at tick {tick}")]
    TargetBorrowed {
        /// Tick whose capture was attempted
        tick: u64,
    },

    /// A snapshot could not be decoded into the requested type
    #[error("Decode failed: {0}")]
    Decode(#[source] serde_json::Error),
}

impl TraceError {
    /// Whether this error came from taking a snapshot, as opposed to reading one
    #[must_use]
    pub fn is_capture_failure(&self) -> bool {
        matches!(self, Self::Capture(_) | Self::TargetBorrowed { .. })
    }
}
