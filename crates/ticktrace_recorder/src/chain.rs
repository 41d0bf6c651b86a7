//! The capture chain.
//!
//! After tick 0 the chain loops: check the guard, capture, yield one
//! scheduler turn. Yielding with `tokio::task::yield_now` puts the chain
//! behind every other ready task, which is what lets the traced value change
//! between two captures.
//!
//! A spawned chain needs no yield before tick 1: `spawn_local` already defers
//! its first poll to a later turn. A chain handed to the caller starts with
//! one explicit yield instead, so polling it right away cannot capture
//! tick 1 in the same turn as tick 0.

use crate::config::RecorderConfig;
use crate::recorder::{capture_tick, SharedState};
use crate::source::CaptureSource;
use futures::future::{FutureExt, LocalBoxFuture};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};
use ticktrace_core::{Tick, TraceResult};

/// Future driving a recorder's captures after tick 0.
///
/// Resolves once the recorder is stopped or halted: `Ok` with the final
/// tick count on a clean end, `Err` with the capture failure that halted it.
#[must_use = "a capture chain records nothing unless it is polled"]
pub struct CaptureChain {
    inner: LocalBoxFuture<'static, TraceResult<Tick>>,
}

impl CaptureChain {
    pub(crate) fn new(
        state: SharedState,
        source: Box<dyn CaptureSource>,
        config: Rc<RecorderConfig>,
        leading_yield: bool,
    ) -> Self {
        Self {
            inner: run(state, source, config, leading_yield).boxed_local(),
        }
    }
}

impl Future for CaptureChain {
    type Output = TraceResult<Tick>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner.poll_unpin(cx)
    }
}

impl std::fmt::Debug for CaptureChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureChain").finish_non_exhaustive()
    }
}

async fn run(
    state: SharedState,
    source: Box<dyn CaptureSource>,
    config: Rc<RecorderConfig>,
    leading_yield: bool,
) -> TraceResult<Tick> {
    if leading_yield {
        tokio::task::yield_now().await;
    }

    loop {
        // Guard. No borrow of `state` may be held across the yield below.
        {
            let mut st = state.borrow_mut();
            if st.stopped || st.halted {
                return match st.failure.take() {
                    Some(err) => Err(err),
                    None => Ok(st.tick),
                };
            }
        }

        capture_tick(&state, source.as_ref(), &config.label)?;
        tokio::task::yield_now().await;
    }
}
