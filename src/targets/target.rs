//! # Target: the shapes a producer can take.
//!
//! A timer drives one producer, but producers come in five shapes: plain
//! callables, async callables, synchronous sequences, asynchronous
//! sequences, and callables that yield such a sequence. [`Target`] is the
//! closed set of those shapes; [`TargetCaller`](super::TargetCaller)
//! normalizes whichever one was supplied into a single pull operation.

use std::fmt;
use std::future::Future;

use futures::future::BoxFuture;
use futures::stream::BoxStream;
use futures::{FutureExt, Stream, StreamExt};

use crate::error::TargetError;

/// Boxed synchronous producer callable.
pub(crate) type CallFn<T> = Box<dyn FnMut() -> Result<T, TargetError> + Send + 'static>;

/// Boxed asynchronous producer callable.
pub(crate) type CallAsyncFn<T> =
    Box<dyn FnMut() -> BoxFuture<'static, Result<T, TargetError>> + Send + 'static>;

/// Boxed synchronous lazy sequence.
pub(crate) type TargetIter<T> = Box<dyn Iterator<Item = Result<T, TargetError>> + Send + 'static>;

/// Boxed asynchronous lazy sequence.
pub(crate) type TargetStream<T> = BoxStream<'static, Result<T, TargetError>>;

/// The shape a target was supplied in.
///
/// Factory variants hold the callable that yields the sequence; the caller
/// rebinds them to the produced sequence on the first pull.
pub(crate) enum Shape<T> {
    Call(CallFn<T>),
    CallAsync(CallAsyncFn<T>),
    Iter(TargetIter<T>),
    Stream(TargetStream<T>),
    IterFactory(Box<dyn FnOnce() -> TargetIter<T> + Send + 'static>),
    StreamFactory(Box<dyn FnOnce() -> TargetStream<T> + Send + 'static>),
}

/// A producer of timer values, in one of five recognized shapes.
///
/// Callable shapes run anew on every tick; sequence shapes are pulled one
/// element per tick until exhausted (sequences are finite, exhaustible, and
/// not restartable). An exhausted sequence ends the driving timer cleanly.
pub struct Target<T> {
    pub(crate) shape: Shape<T>,
}

impl<T> Target<T> {
    /// A plain zero-argument callable, invoked anew on every tick.
    pub fn call<F>(f: F) -> Self
    where
        F: FnMut() -> Result<T, TargetError> + Send + 'static,
    {
        Self {
            shape: Shape::Call(Box::new(f)),
        }
    }

    /// An async zero-argument callable; its future is awaited on every tick.
    pub fn call_async<F, Fut>(mut f: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, TargetError>> + Send + 'static,
    {
        Self {
            shape: Shape::CallAsync(Box::new(move || f().boxed())),
        }
    }

    /// A synchronous lazy sequence, pulled one element per tick.
    pub fn iter<I>(iter: I) -> Self
    where
        I: Iterator<Item = Result<T, TargetError>> + Send + 'static,
    {
        Self {
            shape: Shape::Iter(Box::new(iter)),
        }
    }

    /// An asynchronous lazy sequence, pulled one element per tick.
    pub fn stream<S>(stream: S) -> Self
    where
        S: Stream<Item = Result<T, TargetError>> + Send + 'static,
    {
        Self {
            shape: Shape::Stream(stream.boxed()),
        }
    }

    /// A callable yielding the synchronous sequence to drive.
    ///
    /// Invoked exactly once, on the first tick; the produced sequence is
    /// then pulled for the rest of the timer's life.
    pub fn iter_with<F, I>(f: F) -> Self
    where
        F: FnOnce() -> I + Send + 'static,
        I: Iterator<Item = Result<T, TargetError>> + Send + 'static,
    {
        Self {
            shape: Shape::IterFactory(Box::new(move || Box::new(f()) as TargetIter<T>)),
        }
    }

    /// A callable yielding the asynchronous sequence to drive.
    ///
    /// Invoked exactly once, on the first tick.
    pub fn stream_with<F, S>(f: F) -> Self
    where
        F: FnOnce() -> S + Send + 'static,
        S: Stream<Item = Result<T, TargetError>> + Send + 'static,
    {
        Self {
            shape: Shape::StreamFactory(Box::new(move || f().boxed())),
        }
    }

    fn shape_name(&self) -> &'static str {
        match self.shape {
            Shape::Call(_) => "call",
            Shape::CallAsync(_) => "call_async",
            Shape::Iter(_) => "iter",
            Shape::Stream(_) => "stream",
            Shape::IterFactory(_) => "iter_with",
            Shape::StreamFactory(_) => "stream_with",
        }
    }
}

impl<T> fmt::Debug for Target<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Target").field(&self.shape_name()).finish()
    }
}
