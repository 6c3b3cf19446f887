//! Tick pacing: the cadence source that drives a timer.
//!
//! ## Contents
//! - [`Pacemaker`] lazy tick sequence with a mutable delay, cooperative stop,
//!   and stop-on-completion links to externally owned operations.
//!
//! See `lib.rs` for the system-level wiring diagram.

mod pacemaker;

pub use pacemaker::Pacemaker;
