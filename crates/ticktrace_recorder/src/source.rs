//! Where snapshots come from.

use serde::Serialize;
use std::cell::RefCell;
use std::rc::Weak;
use ticktrace_core::{Snapshot, Tick, TraceError, TraceResult};

/// Something a recorder can take snapshots of
pub trait CaptureSource {
    /// Deep-copy the current state for `tick`.
    ///
    /// `Ok(None)` means the source is gone and capturing should end.
    ///
    /// # Errors
    ///
    /// Returns error if the state cannot be read or copied right now
    fn capture(&self, tick: Tick) -> TraceResult<Option<Snapshot>>;
}

/// Observes a caller-owned value without keeping it alive
impl<T: Serialize + ?Sized> CaptureSource for Weak<RefCell<T>> {
    fn capture(&self, tick: Tick) -> TraceResult<Option<Snapshot>> {
        let Some(target) = self.upgrade() else {
            return Ok(None);
        };
        let state = target
            .try_borrow()
            .map_err(|_| TraceError::TargetBorrowed { tick: tick.as_u64() })?;
        Snapshot::capture(&*state).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::rc::Rc;

    #[test]
    fn test_capture_live_target() {
        let target = Rc::new(RefCell::new(json!({"a": 1})));
        let source = Rc::downgrade(&target);
        let snapshot = source.capture(Tick::zero()).unwrap().unwrap();
        assert_eq!(snapshot, json!({"a": 1}));
    }

    #[test]
    fn test_capture_dropped_target() {
        let target = Rc::new(RefCell::new(json!({"a": 1})));
        let source = Rc::downgrade(&target);
        drop(target);
        assert!(source.capture(Tick::zero()).unwrap().is_none());
    }

    #[test]
    fn test_capture_while_borrowed() {
        let target = Rc::new(RefCell::new(json!({"a": 1})));
        let source = Rc::downgrade(&target);
        let _guard = target.borrow_mut();
        let err = source.capture(Tick::from_raw(3)).unwrap_err();
        assert!(matches!(err, TraceError::TargetBorrowed { tick: 3 }));
    }
}
