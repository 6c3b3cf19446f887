//! # Timer: the orchestrating state machine.
//!
//! A [`Timer`] composes the three leaf pieces and exposes the public
//! surface: start/stop, one-tick joins, hit-count waits, and iteration.
//!
//! ## Architecture
//! ```text
//! Timer::start() ──► spawns Driver (background tokio task)
//!
//!   Driver loop:
//!     Pacemaker ── tick ──► TargetCaller::next() ──► outcome
//!                                                      │
//!                               hit_count += 1 (value) │
//!                                                      ▼
//!                                                   Fanout ──► join()/wait()/iter()
//!                                                              (any number of waiters)
//! ```
//!
//! ## Lifecycle
//! ```text
//! NotStarted ── start() ──► Running ── cancel()/End/failure ──► Stopped
//! ```
//! Stopped is terminal per run: restarting afterwards is not a supported
//! usage pattern, although the structure does not forbid rebuilding the
//! handle.
//!
//! ## Rules
//! - `hit_count` never resets while the instance lives.
//! - Every instance constructs its **own** default callbacks; defaults are
//!   never shared between instances.
//! - `cancel()` waits only for outcome delivery, never for loop teardown.
//! - Dropping a running timer signals its loop the same way `cancel()` does.

use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use futures::Stream;
use tokio::runtime::Handle;
use tokio::sync::Mutex as AsyncMutex;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::{debug, error};

use crate::core::driver::Driver;
use crate::error::{TargetError, TimerError};
use crate::pacing::Pacemaker;
use crate::sync::Fanout;
use crate::targets::{Target, TargetCaller};

/// Callback invoked when the target fails.
pub(crate) type ExceptionCallback = Arc<dyn Fn(&TargetError) + Send + Sync>;

/// Callback invoked exactly once when the drive loop exits.
pub(crate) type CancelCallback = Arc<dyn Fn() + Send + Sync>;

/// Selector for [`Timer::wait`].
///
/// An absolute target takes precedence over a relative one when both are
/// set. With neither set, the wait runs until the timer stops.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use tickvisor::WaitFor;
///
/// // Wait for two more hits, giving up after five seconds.
/// let selector = WaitFor::hits(2).with_timeout(Duration::from_secs(5));
/// assert_eq!(selector.hits, Some(2));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct WaitFor {
    /// Absolute hit count to reach. Takes precedence over [`WaitFor::hits`].
    pub hit_count: Option<u64>,
    /// Additional hits relative to the count at call time. Zero and
    /// negative deltas are already satisfied.
    pub hits: Option<i64>,
    /// Overall deadline shared by every join this wait performs.
    pub timeout: Option<Duration>,
}

impl WaitFor {
    /// Waits until the timer fully stops.
    pub fn stopped() -> Self {
        Self::default()
    }

    /// Waits until the absolute hit count reaches `n`.
    pub fn hit_count(n: u64) -> Self {
        Self {
            hit_count: Some(n),
            ..Self::default()
        }
    }

    /// Waits for `n` more hits, measured from the point of call.
    pub fn hits(n: i64) -> Self {
        Self {
            hits: Some(n),
            ..Self::default()
        }
    }

    /// Bounds the whole wait with one overall timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Resolves the target hit count; `None` means "until the timer stops".
    fn resolve(&self, current: u64) -> Option<u64> {
        match (self.hit_count, self.hits) {
            (Some(absolute), _) => Some(absolute),
            (None, Some(delta)) => Some(current.saturating_add_signed(delta)),
            (None, None) => None,
        }
    }
}

/// Periodically drives a [`Target`] and broadcasts each outcome to any
/// number of independently timed waiters.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use tickvisor::{Target, Timer, WaitFor};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut beat = 0u32;
///     let timer = Timer::new(
///         Duration::from_millis(10),
///         Target::call(move || {
///             beat += 1;
///             Ok(beat)
///         }),
///     );
///
///     timer.start()?;
///     timer.wait(WaitFor::hit_count(3)).await?;
///     assert!(timer.hit_count() >= 3);
///
///     timer.cancel();
///     assert!(!timer.is_running());
///     Ok(())
/// }
/// ```
pub struct Timer<T: 'static> {
    pacemaker: Arc<Pacemaker>,
    caller: Arc<AsyncMutex<TargetCaller<T>>>,
    fanout: Arc<Fanout<T>>,
    hits: Arc<AtomicU64>,
    handle: Mutex<Option<JoinHandle<()>>>,
    exception_cb: ExceptionCallback,
    cancel_cb: CancelCallback,
}

impl<T: 'static> Timer<T> {
    /// Creates a timer driving `target` every `delay`.
    ///
    /// Each instance constructs its own default callbacks: the default
    /// exception callback records the failure at error level, the default
    /// cancel callback does nothing. Replace them per instance via
    /// [`Timer::with_exception_callback`] / [`Timer::with_cancel_callback`].
    pub fn new(delay: Duration, target: Target<T>) -> Self {
        Self {
            pacemaker: Arc::new(Pacemaker::new(delay)),
            caller: Arc::new(AsyncMutex::new(TargetCaller::new(target))),
            fanout: Arc::new(Fanout::new()),
            hits: Arc::new(AtomicU64::new(0)),
            handle: Mutex::new(None),
            exception_cb: Arc::new(|err: &TargetError| {
                error!(error = %err, "unhandled target failure in timer loop");
            }),
            cancel_cb: Arc::new(|| {}),
        }
    }

    /// Replaces the callback invoked when the target fails.
    pub fn with_exception_callback<F>(mut self, f: F) -> Self
    where
        F: Fn(&TargetError) + Send + Sync + 'static,
    {
        self.exception_cb = Arc::new(f);
        self
    }

    /// Replaces the callback invoked exactly once when the drive loop
    /// exits, whatever the reason (end of sequence, failure, or cancel).
    pub fn with_cancel_callback<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.cancel_cb = Arc::new(f);
        self
    }

    /// Current tick delay.
    pub fn delay(&self) -> Duration {
        self.pacemaker.delay()
    }

    /// Replaces the tick delay; effective from the next tick wait.
    pub fn set_delay(&self, delay: Duration) {
        self.pacemaker.set_delay(delay);
    }

    /// Number of successful ticks so far.
    ///
    /// Monotonically non-decreasing for the life of the instance.
    pub fn hit_count(&self) -> u64 {
        self.hits.load(Ordering::Acquire)
    }

    /// True iff a drive loop handle exists and has not finished.
    pub fn is_running(&self) -> bool {
        self.handle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Waits for exactly one new broadcast from the drive loop.
    ///
    /// Fails with [`TimerError::NotRunning`] when no live handle exists;
    /// resolves to the tick's value, its error, or
    /// [`TimerError::Canceled`] when the timer stops first.
    pub async fn join(&self) -> Result<T, TimerError> {
        if !self.is_running() {
            return Err(TimerError::NotRunning);
        }
        self.fanout.wait().await
    }

    /// Waits until the selector's target hit count is reached, or until the
    /// timer stops when no target was given.
    ///
    /// Joins repeatedly, each join bounded by the remaining slice of the
    /// selector's overall timeout. Returns the last joined value, or `None`
    /// when zero joins were needed.
    ///
    /// With a target: a timeout surfaces as [`TimerError::Timeout`] and a
    /// concurrent stop as [`TimerError::Canceled`]. Without one, both are
    /// normal completion and the last value seen (if any) is returned.
    pub async fn wait(&self, selector: WaitFor) -> Result<Option<T>, TimerError> {
        let bound = selector
            .timeout
            .map(|timeout| (Instant::now() + timeout, timeout));
        let mut last = None;

        match selector.resolve(self.hit_count()) {
            Some(target) => {
                while self.hit_count() < target {
                    last = Some(self.join_before(bound).await?);
                }
            }
            None => loop {
                match self.join_before(bound).await {
                    Ok(value) => last = Some(value),
                    Err(err) if err.is_cancellation() => break,
                    Err(TimerError::Timeout { .. }) => break,
                    Err(err) => return Err(err),
                }
            },
        }
        Ok(last)
    }

    /// One join bounded by the remaining slice of the shared deadline.
    async fn join_before(&self, bound: Option<(Instant, Duration)>) -> Result<T, TimerError> {
        match bound {
            None => self.join().await,
            Some((deadline, timeout)) => {
                let remaining = deadline.saturating_duration_since(Instant::now());
                match time::timeout(remaining, self.join()).await {
                    Ok(outcome) => outcome,
                    Err(_elapsed) => Err(TimerError::Timeout { timeout }),
                }
            }
        }
    }

    /// Iterates broadcasts: each item is one [`Timer::join`].
    ///
    /// The stream ends without error once the timer stops; a target failure
    /// is yielded as an `Err` item and the stream ends on the next poll.
    pub fn iter(&self) -> impl Stream<Item = Result<T, TimerError>> + '_ {
        futures::stream::unfold(self, |timer| async move {
            match timer.join().await {
                Ok(value) => Some((Ok(value), timer)),
                Err(err) if err.is_cancellation() => None,
                Err(err) => Some((Err(err), timer)),
            }
        })
    }

    /// Unschedules the timer. A no-op when it is not running.
    ///
    /// Signals the drive loop to stop at its next suspension point, settles
    /// every pending waiter with a cancellation outcome, and drops the
    /// handle. Does not wait for the loop to tear down.
    pub fn cancel(&self) {
        if self.shutdown() {
            debug!("timer cancelled");
        }
    }

    /// An alias for [`Timer::cancel`].
    pub fn stop(&self) {
        self.cancel();
    }

    /// Links externally owned operations: the timer stops at its next
    /// suspension point once any of them settles, whatever its outcome.
    ///
    /// The linked operation's own result never surfaces through the timer.
    pub fn stop_on<I, F>(&self, operations: I)
    where
        I: IntoIterator<Item = F>,
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        self.pacemaker.stop_on(operations);
    }

    /// Signals the drive loop and settles pending waiters.
    ///
    /// Returns false when there was no handle to drop.
    fn shutdown(&self) -> bool {
        let handle = self
            .handle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match handle {
            Some(_) => {
                self.pacemaker.stop();
                self.fanout.cancel();
                true
            }
            None => false,
        }
    }
}

impl<T> Timer<T>
where
    T: Clone + Send + 'static,
{
    /// Schedules the drive loop on the current tokio runtime.
    ///
    /// Fails with [`TimerError::AlreadyRunning`] if a handle already
    /// exists, and with [`TimerError::NoRuntime`] outside a runtime.
    pub fn start(&self) -> Result<(), TimerError> {
        let mut slot = self.handle.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            return Err(TimerError::AlreadyRunning);
        }
        let runtime = Handle::try_current().map_err(|_| TimerError::NoRuntime)?;

        let driver = Driver {
            pacemaker: Arc::clone(&self.pacemaker),
            caller: Arc::clone(&self.caller),
            fanout: Arc::clone(&self.fanout),
            hits: Arc::clone(&self.hits),
            exception_cb: Arc::clone(&self.exception_cb),
            cancel_cb: Arc::clone(&self.cancel_cb),
        };
        *slot = Some(runtime.spawn(driver.run()));
        debug!(delay = ?self.pacemaker.delay(), "timer started");
        Ok(())
    }
}

impl<T: 'static> Drop for Timer<T> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl<T: 'static> fmt::Debug for Timer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timer")
            .field("delay", &self.delay())
            .field("hit_count", &self.hit_count())
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use tokio::sync::oneshot;

    fn counter_target() -> Target<u64> {
        let mut count = 0u64;
        Target::call(move || {
            count += 1;
            Ok(count)
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_target_runs_immediately_on_start() {
        let timer = Timer::new(Duration::from_secs(3600), counter_target());
        timer.start().unwrap();

        // The very first tick fires without any delay elapsing.
        let before = Instant::now();
        assert_eq!(timer.join().await.unwrap(), 1);
        assert_eq!(Instant::now(), before);
        assert_eq!(timer.hit_count(), 1);
    }

    #[tokio::test]
    async fn test_second_start_fails_while_running() {
        let timer = Timer::new(Duration::from_secs(3600), counter_target());
        timer.start().unwrap();
        assert!(matches!(timer.start(), Err(TimerError::AlreadyRunning)));
        assert!(timer.is_running());

        timer.cancel();
        timer.cancel(); // idempotent
        assert!(!timer.is_running());
        assert!(matches!(timer.join().await, Err(TimerError::NotRunning)));
    }

    #[test]
    fn test_start_without_a_runtime_fails() {
        let timer = Timer::new(Duration::ZERO, counter_target());
        assert!(matches!(timer.start(), Err(TimerError::NoRuntime)));
    }

    #[tokio::test]
    async fn test_join_requires_a_running_timer() {
        let timer = Timer::new(Duration::ZERO, counter_target());
        assert!(matches!(timer.join().await, Err(TimerError::NotRunning)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_waiters_observe_the_same_tick() {
        let timer = Timer::new(Duration::from_secs(1), counter_target());
        timer.start().unwrap();
        assert_eq!(timer.join().await.unwrap(), 1);

        let (a, b) = tokio::join!(timer.join(), timer.join());
        let (a, b) = (a.unwrap(), b.unwrap());
        assert_eq!(a, 2);
        assert_eq!(a, b);

        // No backlog: observing the next tick needs a fresh wait.
        assert_eq!(timer.join().await.unwrap(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_absolute_hit_count() {
        let timer = Timer::new(Duration::from_millis(10), counter_target());
        timer.start().unwrap();
        for _ in 0..3 {
            timer.join().await.unwrap();
        }

        // Already satisfied: zero joins, no value.
        assert_eq!(timer.wait(WaitFor::hit_count(2)).await.unwrap(), None);
        assert_eq!(timer.hit_count(), 3);

        assert_eq!(timer.wait(WaitFor::hit_count(5)).await.unwrap(), Some(5));

        // Absolute takes precedence over relative when both are given.
        let both = WaitFor {
            hit_count: Some(6),
            hits: Some(100),
            timeout: None,
        };
        assert_eq!(timer.wait(both).await.unwrap(), Some(6));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_relative_delta() {
        let timer = Timer::new(Duration::from_millis(10), counter_target());
        timer.start().unwrap();
        assert_eq!(timer.join().await.unwrap(), 1);
        assert_eq!(timer.join().await.unwrap(), 2);

        assert_eq!(timer.wait(WaitFor::hits(3)).await.unwrap(), Some(5));
        assert_eq!(timer.hit_count(), 5);

        // Zero and negative deltas are already satisfied.
        assert_eq!(timer.wait(WaitFor::hits(0)).await.unwrap(), None);
        assert_eq!(timer.wait(WaitFor::hits(-100)).await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_selector_wait_times_out() {
        let timer = Timer::new(Duration::from_secs(3600), counter_target());
        timer.start().unwrap();

        let outcome = timer
            .wait(WaitFor::hit_count(5).with_timeout(Duration::ZERO))
            .await;
        assert!(matches!(outcome, Err(TimerError::Timeout { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_selectorless_wait_returns_last_value_at_deadline() {
        let timer = Timer::new(Duration::from_millis(10), counter_target());
        timer.start().unwrap();

        let value = timer
            .wait(WaitFor::stopped().with_timeout(Duration::from_millis(35)))
            .await
            .unwrap();
        assert!(value.is_some());
    }

    #[tokio::test]
    async fn test_selectorless_wait_completes_on_concurrent_cancel() {
        let timer = Arc::new(Timer::new(Duration::from_secs(3600), counter_target()));
        timer.start().unwrap();

        let waiter = tokio::spawn({
            let timer = Arc::clone(&timer);
            async move { timer.wait(WaitFor::stopped()).await }
        });
        time::sleep(Duration::from_millis(50)).await;

        timer.cancel();
        assert!(waiter.await.unwrap().is_ok());
        assert!(!timer.is_running());
    }

    #[tokio::test]
    async fn test_stop_on_linked_operation_stops_the_timer() {
        for fail_the_operation in [false, true] {
            let timer = Timer::new(Duration::from_secs(3600), counter_target());
            timer.start().unwrap();

            let (tx, rx) = oneshot::channel::<()>();
            timer.stop_on([async move { rx.await }]);
            if fail_the_operation {
                drop(tx);
            } else {
                tx.send(()).unwrap();
            }

            // The linked outcome stops the timer without surfacing an error.
            let outcome = time::timeout(Duration::from_secs(5), timer.wait(WaitFor::stopped()))
                .await
                .unwrap();
            assert!(outcome.is_ok());

            tokio::task::yield_now().await;
            assert!(!timer.is_running());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_after_eleven_values() {
        let exception_calls = Arc::new(AtomicU64::new(0));
        let cancel_calls = Arc::new(AtomicU64::new(0));

        let exceptions = Arc::clone(&exception_calls);
        let cancels = Arc::clone(&cancel_calls);
        let timer = Timer::new(
            Duration::from_millis(5),
            Target::iter((0u64..).map(|idx| {
                if idx > 10 {
                    Err(TargetError::msg("something went wrong"))
                } else {
                    Ok(idx)
                }
            })),
        )
        .with_exception_callback(move |_| {
            exceptions.fetch_add(1, Ordering::SeqCst);
        })
        .with_cancel_callback(move || {
            cancels.fetch_add(1, Ordering::SeqCst);
        });
        timer.start().unwrap();

        let mut seen = Vec::new();
        let mut failure = None;
        {
            let stream = timer.iter();
            tokio::pin!(stream);
            while let Some(item) = stream.next().await {
                match item {
                    Ok(value) => seen.push(value),
                    Err(err) => failure = Some(err),
                }
            }
        }

        assert_eq!(seen, (0..=10).collect::<Vec<_>>());
        assert_eq!(timer.hit_count(), 11);
        assert!(matches!(failure, Some(TimerError::Target(_))));
        assert_eq!(exception_calls.load(Ordering::SeqCst), 1);
        assert_eq!(cancel_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_sequence_ends_the_timer_cleanly() {
        let exception_calls = Arc::new(AtomicU64::new(0));
        let cancel_calls = Arc::new(AtomicU64::new(0));

        let exceptions = Arc::clone(&exception_calls);
        let cancels = Arc::clone(&cancel_calls);
        let timer = Timer::new(Duration::from_millis(5), Target::iter((0u64..=20).map(Ok)))
            .with_exception_callback(move |_| {
                exceptions.fetch_add(1, Ordering::SeqCst);
            })
            .with_cancel_callback(move || {
                cancels.fetch_add(1, Ordering::SeqCst);
            });
        timer.start().unwrap();

        let mut seen = Vec::new();
        {
            let stream = timer.iter();
            tokio::pin!(stream);
            while let Some(item) = stream.next().await {
                seen.push(item.unwrap());
            }
        }

        assert_eq!(seen.len(), 21);
        assert_eq!(timer.hit_count(), 21);
        assert_eq!(exception_calls.load(Ordering::SeqCst), 0);
        assert_eq!(cancel_calls.load(Ordering::SeqCst), 1);
        assert!(!timer.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_async_sequence_factory_through_the_timer() {
        let timer = Timer::new(
            Duration::from_millis(5),
            Target::stream_with(|| futures::stream::iter((1u64..=5).map(Ok))),
        );
        timer.start().unwrap();

        let mut seen = Vec::new();
        {
            let stream = timer.iter();
            tokio::pin!(stream);
            while let Some(item) = stream.next().await {
                seen.push(item.unwrap());
            }
        }
        assert_eq!(seen, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_async_callable_target() {
        let mut count = 0u64;
        let timer = Timer::new(
            Duration::from_millis(10),
            Target::call_async(move || {
                count += 1;
                let value = count;
                async move { Ok(value) }
            }),
        );
        timer.start().unwrap();

        assert_eq!(timer.join().await.unwrap(), 1);
        assert_eq!(timer.join().await.unwrap(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_delay_takes_effect_on_the_next_wait() {
        let timer = Timer::new(Duration::from_secs(100), counter_target());
        timer.start().unwrap();
        assert_eq!(timer.join().await.unwrap(), 1);

        timer.set_delay(Duration::from_secs(1));
        assert_eq!(timer.delay(), Duration::from_secs(1));

        // The wait already in flight keeps the delay it started with...
        let before = Instant::now();
        assert_eq!(timer.join().await.unwrap(), 2);
        assert_eq!(
            Instant::now().duration_since(before),
            Duration::from_secs(100)
        );

        // ...and the next wait uses the new one.
        let before = Instant::now();
        assert_eq!(timer.join().await.unwrap(), 3);
        assert_eq!(
            Instant::now().duration_since(before),
            Duration::from_secs(1)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_callbacks_are_per_instance() {
        let first_cancels = Arc::new(AtomicU64::new(0));
        let second_cancels = Arc::new(AtomicU64::new(0));

        let cancels = Arc::clone(&first_cancels);
        let first = Timer::new(
            Duration::from_millis(1),
            Target::iter(std::iter::once(Err::<u64, _>(TargetError::msg("a")))),
        )
        .with_cancel_callback(move || {
            cancels.fetch_add(1, Ordering::SeqCst);
        });

        let cancels = Arc::clone(&second_cancels);
        let second = Timer::new(
            Duration::from_millis(1),
            Target::iter(std::iter::once(Err::<u64, _>(TargetError::msg("b")))),
        )
        .with_cancel_callback(move || {
            cancels.fetch_add(1, Ordering::SeqCst);
        });

        first.start().unwrap();
        second.start().unwrap();
        let (first_outcome, second_outcome) = tokio::join!(
            first.wait(WaitFor::stopped()),
            second.wait(WaitFor::stopped())
        );
        assert!(matches!(first_outcome, Err(TimerError::Target(_))));
        assert!(matches!(second_outcome, Err(TimerError::Target(_))));

        // Replacing one instance's callback never touches the other's.
        assert_eq!(first_cancels.load(Ordering::SeqCst), 1);
        assert_eq!(second_cancels.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_drop_stops_the_drive_loop() {
        let cancel_calls = Arc::new(AtomicU64::new(0));

        let cancels = Arc::clone(&cancel_calls);
        {
            let timer =
                Timer::new(Duration::from_secs(3600), counter_target()).with_cancel_callback(
                    move || {
                        cancels.fetch_add(1, Ordering::SeqCst);
                    },
                );
            timer.start().unwrap();
            timer.join().await.unwrap();
        }

        time::sleep(Duration::from_millis(50)).await;
        assert_eq!(cancel_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_debug_shows_runtime_state() {
        let timer = Timer::new(Duration::from_secs(1), counter_target());
        let rendered = format!("{timer:?}");
        assert!(rendered.contains("hit_count: 0"), "{rendered}");
    }
}
