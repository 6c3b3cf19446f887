//! # Fanout: delivers one outcome to every registered waiter.
//!
//! One broadcast cycle: any number of waiters register a slot via
//! [`Fanout::wait`]; a single broadcast settles every registered slot with
//! the same outcome and empties the set. The cell is then ready for the
//! next cycle, indefinitely.
//!
//! ## Rules
//! - Registration and broadcast hold the **same** lock: a registration
//!   lands wholly in the current cycle or wholly in the next, never both,
//!   never neither. No lost wakeups, no double delivery.
//! - Every slot registered before a broadcast receives exactly that
//!   broadcast's outcome, exactly once. Slots registered after are
//!   untouched by it.
//! - No buffering: a waiter that does not re-register before the next
//!   broadcast misses it.

use std::sync::{Mutex, PoisonError};

use tokio::sync::oneshot;

use crate::error::{TargetError, TimerError};

/// Outcome delivered to the waiters of one broadcast cycle.
enum Outcome<T> {
    Value(T),
    Error(TargetError),
    Canceled,
}

/// Shares one outcome across all currently registered waiters.
///
/// One instance per timer; the slot set ends every cycle empty.
pub struct Fanout<T> {
    slots: Mutex<Vec<oneshot::Sender<Outcome<T>>>>,
}

impl<T> Fanout<T> {
    /// Creates an empty fanout cell.
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(Vec::new()),
        }
    }

    /// Registers a waiter slot and suspends until the next broadcast.
    ///
    /// Resolves to the broadcast value, the broadcast error, or
    /// [`TimerError::Canceled`] when the broadcast was a cancellation (or
    /// the broadcasting side went away entirely).
    pub async fn wait(&self) -> Result<T, TimerError> {
        let (tx, rx) = oneshot::channel();
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);

        match rx.await {
            Ok(Outcome::Value(value)) => Ok(value),
            Ok(Outcome::Error(err)) => Err(TimerError::Target(err)),
            Ok(Outcome::Canceled) | Err(_) => Err(TimerError::Canceled),
        }
    }

    /// Delivers a value to every registered waiter and clears the set.
    pub fn send_value(&self, value: T)
    where
        T: Clone,
    {
        self.broadcast(|| Outcome::Value(value.clone()));
    }

    /// Delivers a target failure to every registered waiter and clears the set.
    pub fn send_error(&self, err: TargetError) {
        self.broadcast(|| Outcome::Error(err.clone()));
    }

    /// Settles every registered waiter with a cancellation outcome.
    pub fn cancel(&self) {
        self.broadcast(|| Outcome::Canceled);
    }

    /// Settles and drains every registered slot under the registration lock.
    fn broadcast(&self, outcome: impl Fn() -> Outcome<T>) {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        for tx in slots.drain(..) {
            // A slot whose waiter stopped listening (e.g. a timed-out join)
            // is simply skipped.
            let _ = tx.send(outcome());
        }
    }
}

impl<T> Default for Fanout<T> {
    fn default() -> Self {
        Self::new()
    }
}
