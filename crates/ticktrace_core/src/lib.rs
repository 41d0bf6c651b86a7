//! ticktrace core types
//!
//! This crate contains pure types and logic with no I/O and no runtime.
//! Snapshots are owned `serde_json` trees, so each one is independent of
//! the value it was taken from.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod diff;
pub mod error;
pub mod snapshot;
pub mod tick;

// Re-exports
pub use diff::DiffEngine;
pub use error::{TraceError, TraceResult};
pub use snapshot::Snapshot;
pub use tick::Tick;
