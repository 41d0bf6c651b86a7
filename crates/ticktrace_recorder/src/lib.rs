//! ticktrace recorder
//!
//! Records a deep copy of a traced value once per scheduler turn on a
//! single-threaded tokio runtime (`current_thread` plus a `LocalSet`).
//! Tick 0 is taken synchronously when the recorder is built; every later
//! tick follows a `yield_now`, so other ready tasks get to run and mutate
//! the value between captures.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chain;
pub mod config;
pub mod recorder;
pub mod source;

pub use chain::CaptureChain;
pub use config::RecorderConfig;
pub use recorder::{RecorderStatus, TickRecorder};
pub use source::CaptureSource;

pub use ticktrace_core::{DiffEngine, Snapshot, Tick, TraceError, TraceResult};
