//! # Cooperative Cancellation

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, Instant},
};

use crate::errors::{TokResult, TokenizerError};

/// A shared, cloneable cancellation flag.
///
/// Clones observe the same flag; cancelling is permanent.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a new, uncancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Has cancellation been requested?
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Return [`TokenizerError::Cancelled`] if cancellation was requested.
    pub fn check(&self) -> TokResult<()> {
        if self.is_cancelled() {
            Err(TokenizerError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// A caller's [`CancellationToken`] linked with an operation deadline.
///
/// The scope is cancelled once either the caller cancels or the
/// deadline passes, whichever happens first.
#[derive(Debug, Clone)]
pub struct CancelScope<'a> {
    parent: &'a CancellationToken,
    deadline: Option<Instant>,
}

impl<'a> CancelScope<'a> {
    /// Link `parent` with a timeout starting now.
    ///
    /// ## Arguments
    /// * `parent` - the caller's token.
    /// * `timeout` - the operation timeout; [`Duration::ZERO`] means none.
    pub fn new(
        parent: &'a CancellationToken,
        timeout: Duration,
    ) -> Self {
        let deadline = if timeout.is_zero() {
            None
        } else {
            Instant::now().checked_add(timeout)
        };
        Self::with_deadline(parent, deadline)
    }

    /// Link `parent` with an explicit deadline.
    pub fn with_deadline(
        parent: &'a CancellationToken,
        deadline: Option<Instant>,
    ) -> Self {
        Self { parent, deadline }
    }

    /// The deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Did the caller cancel, or has the deadline passed?
    pub fn is_cancelled(&self) -> bool {
        self.parent.is_cancelled() || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Return [`TokenizerError::Cancelled`] if the scope is cancelled.
    pub fn check(&self) -> TokResult<()> {
        if self.is_cancelled() {
            Err(TokenizerError::Cancelled)
        } else {
            Ok(())
        }
    }
}
