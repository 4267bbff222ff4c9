//! Bounded, cancellable polling primitive.
//!
//! Replaces an unbounded fixed-interval loop: attempts are capped, the
//! delay between cycles is a timer raced against the cancel token, and
//! the operation itself decides per cycle whether to finish or retry.

use crate::error::{FabnetError, PollError};
use crate::process::cancel::CancelToken;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// What one polling cycle concluded.
#[derive(Debug)]
pub enum PollOutcome<T> {
    Done(T),
    Retry,
}

#[derive(Debug, Clone)]
pub struct Poller {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Poller {
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts,
        }
    }

    /// Run `op` up to `max_attempts` times, sleeping `interval` between
    /// cycles. An `Err` from `op` aborts immediately; `Retry` consumes an
    /// attempt; cancellation wins over both the sleep and the next cycle.
    pub async fn poll<T, F, Fut>(&self, cancel: &CancelToken, mut op: F) -> Result<T, FabnetError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<PollOutcome<T>, FabnetError>>,
    {
        for attempt in 1..=self.max_attempts {
            if cancel.is_cancelled() {
                return Err(PollError::Cancelled.into());
            }
            match op(attempt).await? {
                PollOutcome::Done(value) => return Ok(value),
                PollOutcome::Retry => {
                    debug!(attempt, max_attempts = self.max_attempts, "not done yet");
                    if attempt < self.max_attempts {
                        tokio::select! {
                            _ = tokio::time::sleep(self.interval) => {}
                            _ = cancel.cancelled() => return Err(PollError::Cancelled.into()),
                        }
                    }
                }
            }
        }
        Err(PollError::AttemptsExhausted {
            attempts: self.max_attempts,
        }
        .into())
    }
}
