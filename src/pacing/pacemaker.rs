//! # Pacemaker: the tick source that paces a timer.
//!
//! A [`Pacemaker`] produces a lazy, potentially infinite sequence of ticks.
//! The first tick resolves immediately so a driven target runs once at
//! startup; every later tick sleeps the current delay, racing the stop
//! signal.
//!
//! ## Rules
//! - The delay is read fresh at **each** wait; [`Pacemaker::set_delay`]
//!   applies to the next wait, never to one already in flight.
//! - [`Pacemaker::stop`] is idempotent. Once stopped, [`Pacemaker::tick`]
//!   keeps returning `false` and never panics.
//! - Operations linked via [`Pacemaker::stop_on`] trigger `stop()` the
//!   moment any of them settles, whatever its outcome. Their own result is
//!   discarded and never surfaces through the pacemaker.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::AbortHandle;
use tokio::time;
use tokio_util::sync::CancellationToken;

/// Paces timer iterations: emits ticks every `delay`, until stopped.
///
/// All methods take `&self`, so one instance can be shared (`Arc`) between
/// the facade that reconfigures it and the loop that consumes its ticks.
pub struct Pacemaker {
    /// Current tick delay; read at the start of every wait.
    delay: Mutex<Duration>,
    /// True until the first tick has been taken.
    first_tick: AtomicBool,
    /// Stop signal; cancelled exactly once, by whichever stop path runs first.
    cancel: CancellationToken,
    /// Abort handles for operations linked via `stop_on`.
    linked: Arc<Mutex<Vec<AbortHandle>>>,
}

impl Pacemaker {
    /// Creates a pacemaker with the given tick delay.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay: Mutex::new(delay),
            first_tick: AtomicBool::new(true),
            cancel: CancellationToken::new(),
            linked: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns the current tick delay.
    pub fn delay(&self) -> Duration {
        *self.delay.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces the tick delay.
    ///
    /// Takes effect at the next tick wait; a wait already in flight keeps
    /// the delay it started with.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap_or_else(PoisonError::into_inner) = delay;
    }

    /// True until [`Pacemaker::stop`] has run, directly or via a linked
    /// operation.
    pub fn is_running(&self) -> bool {
        !self.cancel.is_cancelled()
    }

    /// Resolves once the pacemaker has been stopped.
    ///
    /// Lets a consumer race its own suspension points against the stop
    /// signal, the same way [`Pacemaker::tick`] races its sleep.
    pub async fn cancelled(&self) {
        self.cancel.cancelled().await;
    }

    /// Waits for the next tick. Returns `false` once stopped.
    ///
    /// The first call resolves immediately; later calls sleep the current
    /// delay, racing the stop signal. A stopped pacemaker keeps returning
    /// `false` on every call.
    pub async fn tick(&self) -> bool {
        if self.cancel.is_cancelled() {
            return false;
        }
        if self.first_tick.swap(false, Ordering::AcqRel) {
            return true;
        }
        let delay = self.delay();
        tokio::select! {
            _ = time::sleep(delay) => true,
            _ = self.cancel.cancelled() => false,
        }
    }

    /// Links externally owned operations to the stop signal.
    ///
    /// Each operation is spawned onto the current runtime; the moment any of
    /// them settles (value, error, or cancellation) the pacemaker stops and
    /// every other linked operation is aborted. Must be called from within a
    /// tokio runtime.
    pub fn stop_on<I, F>(&self, operations: I)
    where
        I: IntoIterator<Item = F>,
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        for op in operations {
            let watched = tokio::spawn(async move {
                let _ = op.await;
            });
            self.linked
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(watched.abort_handle());

            let linked = Arc::clone(&self.linked);
            let cancel = self.cancel.clone();
            tokio::spawn(async move {
                let _ = watched.await;
                stop_now(&linked, &cancel);
            });
        }
    }

    /// Stops the tick sequence. Idempotent; never panics.
    ///
    /// Aborts every linked operation and raises the stop signal, waking any
    /// wait currently in flight.
    pub fn stop(&self) {
        stop_now(&self.linked, &self.cancel);
    }
}

/// Aborts every linked operation and raises the stop signal.
///
/// Shared between [`Pacemaker::stop`] and the watcher tasks spawned by
/// [`Pacemaker::stop_on`], so a settling linked operation tears down its
/// siblings exactly like an explicit stop does.
fn stop_now(linked: &Mutex<Vec<AbortHandle>>, cancel: &CancellationToken) {
    for handle in linked
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .drain(..)
    {
        handle.abort();
    }
    cancel.cancel();
}
