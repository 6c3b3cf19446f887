//! Error types used by the timer runtime and user-supplied targets.
//!
//! This module defines two main types:
//!
//! - [`TimerError`] — errors surfaced by the timer runtime itself.
//! - [`TargetError`] — a failure raised by a user-supplied target.
//!
//! [`TimerError`] provides `as_label` for logging/metrics and
//! [`TimerError::is_cancellation`] to tell normal termination apart from
//! actual faults.

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// A failure raised by a user-supplied target.
///
/// The original error value is kept behind an `Arc` so that one failure can
/// be delivered verbatim to every waiter of the tick that produced it.
#[derive(Error, Debug, Clone)]
#[error("{0}")]
pub struct TargetError(Arc<dyn std::error::Error + Send + Sync + 'static>);

impl TargetError {
    /// Wraps an arbitrary error value.
    pub fn new<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self(Arc::new(err))
    }

    /// Creates an error from a plain message.
    ///
    /// # Example
    /// ```
    /// use tickvisor::TargetError;
    ///
    /// let err = TargetError::msg("boom");
    /// assert_eq!(err.to_string(), "boom");
    /// ```
    pub fn msg(message: impl Into<String>) -> Self {
        Self(Arc::new(Message(message.into())))
    }

    /// Borrows the underlying error value.
    pub fn get_ref(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.0.as_ref()
    }
}

impl From<String> for TargetError {
    fn from(message: String) -> Self {
        Self::msg(message)
    }
}

impl From<&str> for TargetError {
    fn from(message: &str) -> Self {
        Self::msg(message)
    }
}

/// Plain-text target failure.
#[derive(Error, Debug)]
#[error("{0}")]
struct Message(String);

/// # Errors surfaced by the timer runtime.
///
/// Cancellation-shaped variants ([`TimerError::Canceled`],
/// [`TimerError::NotRunning`]) represent normal termination for callers that
/// did not demand a specific outcome; see [`TimerError::is_cancellation`].
#[non_exhaustive]
#[derive(Error, Debug, Clone)]
pub enum TimerError {
    /// `start()` was called while a drive loop handle already exists.
    #[error("timer is already running")]
    AlreadyRunning,

    /// An operation that needs a live drive loop found none.
    #[error("timer is not running")]
    NotRunning,

    /// `start()` was called outside a tokio runtime.
    #[error("no tokio runtime is available to drive the timer")]
    NoRuntime,

    /// A bounded `wait()` ran out of time before reaching its target hit count.
    #[error("wait timed out after {timeout:?}")]
    Timeout {
        /// The overall timeout that was exceeded.
        timeout: Duration,
    },

    /// The timer stopped while the caller was waiting on it.
    #[error("timer was cancelled")]
    Canceled,

    /// The target failed; the original error is preserved.
    #[error("target failed: {0}")]
    Target(#[from] TargetError),
}

impl TimerError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use tickvisor::TimerError;
    ///
    /// assert_eq!(TimerError::NotRunning.as_label(), "timer_not_running");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            TimerError::AlreadyRunning => "timer_already_running",
            TimerError::NotRunning => "timer_not_running",
            TimerError::NoRuntime => "timer_no_runtime",
            TimerError::Timeout { .. } => "timer_wait_timeout",
            TimerError::Canceled => "timer_canceled",
            TimerError::Target(_) => "target_failed",
        }
    }

    /// True for outcomes that mean the timer stopped rather than faulted.
    ///
    /// Iteration and selector-less waits treat these as normal completion.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, TimerError::Canceled | TimerError::NotRunning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_error_keeps_the_original_value() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let err = TargetError::new(io);
        assert!(err.to_string().contains("disk on fire"));
        assert!(err.get_ref().is::<std::io::Error>());
    }

    #[test]
    fn test_target_error_clones_share_the_payload() {
        let err = TargetError::msg("boom");
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }

    #[test]
    fn test_cancellation_classification() {
        assert!(TimerError::Canceled.is_cancellation());
        assert!(TimerError::NotRunning.is_cancellation());
        assert!(!TimerError::AlreadyRunning.is_cancellation());
        assert!(!TimerError::Target(TargetError::msg("x")).is_cancellation());
    }
}
