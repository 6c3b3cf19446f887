//! # tickvisor
//!
//! **Tickvisor** is a lightweight periodic task driver for Rust.
//!
//! It repeatedly invokes a user-supplied producer (the "target") on a fixed
//! but mutable cadence, normalizes the shapes a producer can take into one
//! uniform pull interface, and broadcasts every produced outcome to any
//! number of independently timed waiters. The crate is designed as a
//! building block for services that poll, refresh, or heartbeat.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!               ┌────────────────────────────────────────────────┐
//!               │  Timer (facade + state machine)                │
//!               │  - hit_count bookkeeping                       │
//!               │  - start()/cancel()/join()/wait()/iter()       │
//!               └───────┬────────────────────────────────────────┘
//!                       │ start() spawns
//!                       ▼
//!               ┌────────────────────────────────────────────────┐
//!               │  Driver (one background tokio task)            │
//!               │                                                │
//!               │   Pacemaker ── tick ──► TargetCaller::next()   │
//!               │   (cadence,             (one pull over any     │
//!               │    stop signal)          producer shape)       │
//!               │                               │                │
//!               │                               ▼                │
//!               │                            Fanout              │
//!               │              (one outcome → every waiter)      │
//!               └───────┬───────────────┬────────────────┬───────┘
//!                       ▼               ▼                ▼
//!                    join()          wait(…)          iter()
//!                 (one tick)     (hit-count based)  (stream)
//! ```
//!
//! ### Drive loop
//! ```text
//! loop {
//!   ├─► tick (first fires immediately, later ones sleep the delay)
//!   ├─► produce next outcome
//!   │     ├─ value  → hit_count += 1 → broadcast → continue
//!   │     ├─ end    → break                   (sequence exhausted)
//!   │     └─ error  → broadcast error → exception callback → break
//!   └─ exit conditions:
//!        - cancel()/stop() or a linked operation settling (stop_on)
//!        - the target's sequence ends
//!        - the target fails
//! }
//! on exit: settle pending waiters, run the cancel callback exactly once
//! ```
//!
//! ## Features
//! | Area           | Description                                              | Key types            |
//! |----------------|----------------------------------------------------------|----------------------|
//! | **Targets**    | Drive callables, async callables, iterators, streams.    | [`Target`]           |
//! | **Waiting**    | One-tick joins, hit-count waits with shared timeouts.    | [`WaitFor`]          |
//! | **Broadcast**  | Every waiter of a tick observes the same outcome.        | [`Fanout`]           |
//! | **Pacing**     | Mutable delay, immediate first tick, cooperative stop.   | [`Pacemaker`]        |
//! | **Errors**     | Typed runtime errors; target failures kept verbatim.     | [`TimerError`], [`TargetError`] |
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use tickvisor::{Target, Timer, WaitFor};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut beat = 0u32;
//!     let timer = Timer::new(
//!         Duration::from_millis(25),
//!         Target::call(move || {
//!             beat += 1;
//!             Ok(beat)
//!         }),
//!     );
//!
//!     // The first tick fires immediately; later ones follow the delay.
//!     timer.start()?;
//!
//!     // Wait until three ticks have produced values.
//!     timer.wait(WaitFor::hit_count(3)).await?;
//!     assert!(timer.hit_count() >= 3);
//!
//!     timer.cancel();
//!     assert!(!timer.is_running());
//!     Ok(())
//! }
//! ```

mod core;
mod error;
mod pacing;
mod sync;
mod targets;

// ---- Public re-exports ----

pub use core::{Timer, WaitFor};
pub use error::{TargetError, TimerError};
pub use pacing::Pacemaker;
pub use sync::Fanout;
pub use targets::{Step, Target, TargetCaller};
