//! # Drive loop: the background execution unit behind a timer.
//!
//! One driver runs per started [`Timer`](crate::Timer), on its own tokio
//! task. It pulls ticks, produces outcomes, and broadcasts them:
//!
//! ```text
//! loop {
//!   ├─► pacemaker.tick()          false → stopped externally → break
//!   ├─► caller.next()             raced against the stop signal
//!   │     ├─ Value(v) → hit_count += 1 → fanout.send_value(v) → continue
//!   │     ├─ End      → break                   (clean end of sequence)
//!   │     └─ Err(e)   → fanout.send_error(e) → exception callback → break
//! }
//! on exit (every path):
//!   fanout.cancel()               settle waiters still pending
//!   cancel callback               exactly once
//! ```
//!
//! ## Rules
//! - Ticks are strictly sequential: tick N+1 never overlaps tick N's
//!   producer call or broadcast.
//! - The hit count increments **before** the broadcast, so a woken waiter
//!   always observes a count that covers the value it received.
//! - A target failure never unwinds past the loop; it becomes a broadcast
//!   plus one exception-callback invocation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex as AsyncMutex;
use tracing::debug;

use crate::core::timer::{CancelCallback, ExceptionCallback};
use crate::pacing::Pacemaker;
use crate::sync::Fanout;
use crate::targets::{Step, TargetCaller};

/// Everything the background loop shares with its [`Timer`](crate::Timer).
pub(crate) struct Driver<T> {
    pub(crate) pacemaker: Arc<Pacemaker>,
    pub(crate) caller: Arc<AsyncMutex<TargetCaller<T>>>,
    pub(crate) fanout: Arc<Fanout<T>>,
    pub(crate) hits: Arc<AtomicU64>,
    pub(crate) exception_cb: ExceptionCallback,
    pub(crate) cancel_cb: CancelCallback,
}

impl<T> Driver<T>
where
    T: Clone + Send + 'static,
{
    /// Runs ticks until end-of-sequence, a target failure, or cancellation.
    pub(crate) async fn run(self) {
        while self.pacemaker.tick().await {
            let step = {
                let mut caller = self.caller.lock().await;
                tokio::select! {
                    step = caller.next() => Some(step),
                    _ = self.pacemaker.cancelled() => None,
                }
            };

            match step {
                Some(Ok(Step::Value(value))) => {
                    self.hits.fetch_add(1, Ordering::AcqRel);
                    self.fanout.send_value(value);
                }
                Some(Ok(Step::End)) => {
                    debug!("target sequence exhausted, timer loop ending");
                    break;
                }
                Some(Err(err)) => {
                    self.fanout.send_error(err.clone());
                    (self.exception_cb)(&err);
                    break;
                }
                // Stop was signalled while the target was producing.
                None => break,
            }
        }

        // Whatever ended the loop: settle pending waiters, then report the
        // termination exactly once.
        self.fanout.cancel();
        (self.cancel_cb)();
    }
}
