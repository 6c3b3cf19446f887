//! Synchronization primitives used by the timer runtime.
//!
//! ## Contents
//! - [`Fanout`] one-outcome-to-many-waiters broadcast cell
//!
//! See `lib.rs` for the system-level wiring diagram.

mod fanout;

pub use fanout::Fanout;
