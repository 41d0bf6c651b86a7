//! Tick recorder.
//!
//! A [`TickRecorder`] keeps one snapshot per scheduler turn of a value the
//! caller owns. The caller keeps mutating the value freely; the recorder
//! only holds a `Weak` to it and reads it at capture time.
//!
//! Everything here is single-threaded. Recorder state lives behind
//! `Rc<RefCell<_>>`, so the type is `!Send` and cannot end up on a
//! multi-threaded scheduler.

use crate::chain::CaptureChain;
use crate::config::RecorderConfig;
use crate::source::CaptureSource;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;
use ticktrace_core::{DiffEngine, Snapshot, Tick, TraceError, TraceResult};
use tracing::{debug, trace, warn};

pub(crate) type SharedState = Rc<RefCell<RecorderState>>;

/// Lifecycle state of a recorder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecorderStatus {
    /// Capturing once per turn
    Running,
    /// `stop()` was called
    Stopped,
    /// Capturing ended on its own: a capture failed or the target was dropped
    Halted,
}

#[derive(Debug, Default)]
pub(crate) struct RecorderState {
    pub(crate) tick: Tick,
    pub(crate) snapshots: Vec<Snapshot>,
    pub(crate) stopped: bool,
    pub(crate) halted: bool,
    /// Tick 0 failure, handed to the chain's first guard check
    pub(crate) failure: Option<TraceError>,
}

/// Take one snapshot and append it at the current tick.
///
/// A dropped source or a failed capture halts the recorder.
pub(crate) fn capture_tick(
    state: &RefCell<RecorderState>,
    source: &dyn CaptureSource,
    label: &str,
) -> TraceResult<()> {
    let tick = state.borrow().tick;

    match source.capture(tick) {
        Ok(Some(snapshot)) => {
            let mut st = state.borrow_mut();
            st.snapshots.push(snapshot);
            st.tick.increment();
            trace!(label, %tick, "snapshot captured");
            Ok(())
        }
        Ok(None) => {
            state.borrow_mut().halted = true;
            debug!(label, %tick, "traced value dropped, capture chain ending");
            Ok(())
        }
        Err(err) => {
            state.borrow_mut().halted = true;
            warn!(label, %tick, error = %err, "capture failed, capture chain halted");
            Err(err)
        }
    }
}

/// Records a snapshot of a traced value on every scheduler turn
///
/// Clones are handles onto the same recorder, so accessors can be called
/// from any task on the same `LocalSet`.
#[derive(Debug, Clone)]
pub struct TickRecorder {
    state: SharedState,
    config: Rc<RecorderConfig>,
}

impl TickRecorder {
    /// Start recording `target` with the default config.
    ///
    /// Tick 0 is captured before this returns; later ticks are captured by a
    /// task spawned on the current `LocalSet`.
    ///
    /// # Panics
    ///
    /// Panics if called outside a `LocalSet`, as `tokio::task::spawn_local` does
    pub fn new<T: Serialize + 'static>(target: &Rc<RefCell<T>>) -> Self {
        Self::with_config(target, RecorderConfig::default())
    }

    /// Start recording `target` with a custom config
    ///
    /// # Panics
    ///
    /// Panics if called outside a `LocalSet`
    pub fn with_config<T: Serialize + 'static>(
        target: &Rc<RefCell<T>>,
        config: RecorderConfig,
    ) -> Self {
        Self::spawn(Rc::downgrade(target), config)
    }

    /// Start recording an arbitrary source, spawning the chain locally
    ///
    /// # Panics
    ///
    /// Panics if called outside a `LocalSet`
    pub fn spawn(source: impl CaptureSource + 'static, config: RecorderConfig) -> Self {
        let (recorder, chain) = Self::start(source, config, false);
        let label = recorder.config.label.clone();

        tokio::task::spawn_local(async move {
            match chain.await {
                Ok(ticks) => debug!(label = %label, %ticks, "capture chain finished"),
                // Capture failures were already reported at `warn` where they happened
                Err(err) if err.is_capture_failure() => {
                    debug!(label = %label, error = %err, "capture chain ended after failed capture")
                }
                Err(err) => warn!(label = %label, error = %err, "capture chain ended with error"),
            }
        });

        recorder
    }

    /// Capture tick 0 and hand back the chain for the caller to drive.
    ///
    /// Nothing past tick 0 is recorded until the returned [`CaptureChain`]
    /// is polled, so this works with any executor that can run `!Send`
    /// futures. The chain yields once before capturing tick 1.
    pub fn unscheduled(
        source: impl CaptureSource + 'static,
        config: RecorderConfig,
    ) -> (Self, CaptureChain) {
        Self::start(source, config, true)
    }

    fn start(
        source: impl CaptureSource + 'static,
        config: RecorderConfig,
        leading_yield: bool,
    ) -> (Self, CaptureChain) {
        let state: SharedState = Rc::new(RefCell::new(RecorderState::default()));
        let config = Rc::new(config);

        if let Err(err) = capture_tick(&state, &source, &config.label) {
            state.borrow_mut().failure = Some(err);
        } else {
            debug!(label = %config.label, "recording started");
        }

        let chain = CaptureChain::new(
            Rc::clone(&state),
            Box::new(source),
            Rc::clone(&config),
            leading_yield,
        );
        (Self { state, config }, chain)
    }

    /// Number of snapshots taken so far
    #[must_use]
    pub fn tick_count(&self) -> Tick {
        self.state.borrow().tick
    }

    /// Snapshot taken at `tick`, or `None` if that tick has not been captured
    #[must_use]
    pub fn snapshot_at(&self, tick: impl Into<Tick>) -> Option<Snapshot> {
        let index = tick.into().as_index()?;
        self.state.borrow().snapshots.get(index).cloned()
    }

    /// Decode the snapshot at `tick` into `D`
    ///
    /// Returns `None` if that tick has not been captured.
    pub fn snapshot_as<D: DeserializeOwned>(
        &self,
        tick: impl Into<Tick>,
    ) -> Option<TraceResult<D>> {
        let index = tick.into().as_index()?;
        self.state.borrow().snapshots.get(index).map(Snapshot::decode)
    }

    /// Copy of every snapshot so far, in tick order
    #[must_use]
    pub fn snapshots(&self) -> Vec<Snapshot> {
        self.state.borrow().snapshots.clone()
    }

    /// Additive diffs, one per snapshot.
    ///
    /// Entry 0 is snapshot 0 itself. Entry `i` holds the top-level keys of
    /// snapshot `i` that snapshot `i - 1` lacked. Removed keys and changed
    /// values are not reported.
    #[must_use]
    pub fn snapshot_diffs(&self) -> Vec<Value> {
        DiffEngine::new().diffs(&self.state.borrow().snapshots)
    }

    /// Stop capturing.
    ///
    /// The chain notices at its next guard check, so no snapshot is taken
    /// after the turn in which this is called. Calling it again does nothing.
    pub fn stop(&self) {
        let mut st = self.state.borrow_mut();
        if st.stopped {
            return;
        }
        st.stopped = true;
        debug!(label = %self.config.label, tick = %st.tick, "recording stopped");
    }

    /// Whether `stop()` has been called
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.state.borrow().stopped
    }

    /// Current lifecycle state
    #[must_use]
    pub fn status(&self) -> RecorderStatus {
        let st = self.state.borrow();
        if st.stopped {
            RecorderStatus::Stopped
        } else if st.halted {
            RecorderStatus::Halted
        } else {
            RecorderStatus::Running
        }
    }

    /// Recorder configuration
    #[must_use]
    pub fn config(&self) -> &RecorderConfig {
        &self.config
    }
}
