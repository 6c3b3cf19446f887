//! # TargetCaller: one pull operation over every producer shape.
//!
//! Adapts a [`Target`] into a uniform "produce the next outcome" call.
//!
//! ## Rules
//! - Shape resolution runs **exactly once**, on the first
//!   [`TargetCaller::next`]: a factory shape is invoked once and permanently
//!   rebound to the sequence it produced. It is never re-probed afterwards,
//!   even if later pulls fail.
//! - Exhaustion of a sequence is the distinguished [`Step::End`] outcome,
//!   never conflated with a producer error.
//! - Any producer error propagates unchanged.

use std::iter;
use std::mem;

use futures::StreamExt;

use super::target::{Shape, Target};
use crate::error::TargetError;

/// One pull from the adapted producer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step<T> {
    /// The tick produced a value.
    Value(T),
    /// The underlying sequence is exhausted; the driving loop should end.
    End,
}

/// Adapts a producer of any recognized shape into one pull operation.
pub struct TargetCaller<T> {
    shape: Shape<T>,
}

impl<T: 'static> TargetCaller<T> {
    /// Wraps a target; the shape stays unresolved until the first pull.
    pub fn new(target: Target<T>) -> Self {
        Self {
            shape: target.shape,
        }
    }

    /// Produces the next outcome of the target.
    ///
    /// Callable shapes run once per call; sequence shapes advance one
    /// element. Returns [`Step::End`] once a sequence is exhausted, and
    /// keeps returning it on every later call.
    pub async fn next(&mut self) -> Result<Step<T>, TargetError> {
        loop {
            match &mut self.shape {
                Shape::Call(f) => return f().map(Step::Value),
                Shape::CallAsync(f) => return f().await.map(Step::Value),
                Shape::Iter(it) => {
                    return match it.next() {
                        Some(Ok(value)) => Ok(Step::Value(value)),
                        Some(Err(err)) => Err(err),
                        None => Ok(Step::End),
                    }
                }
                Shape::Stream(stream) => {
                    return match stream.next().await {
                        Some(Ok(value)) => Ok(Step::Value(value)),
                        Some(Err(err)) => Err(err),
                        None => Ok(Step::End),
                    }
                }
                Shape::IterFactory(_) | Shape::StreamFactory(_) => {
                    // First pull: run the factory once and bind its sequence
                    // for the rest of the caller's life.
                    let unbound = mem::replace(&mut self.shape, Shape::Iter(Box::new(iter::empty())));
                    self.shape = match unbound {
                        Shape::IterFactory(make) => Shape::Iter(make()),
                        Shape::StreamFactory(make) => Shape::Stream(make()),
                        already_bound => already_bound,
                    };
                }
            }
        }
    }
}
