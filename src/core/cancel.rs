//! Caller-driven cancellation
//!
//! Every suspension point in the gateway (rate-limit wait, endpoint slot,
//! transport call, backoff sleep) races against a [`CancellationToken`].
//! Dropping the in-progress future cancels as well; slots and in-flight
//! counters are RAII guards, so both paths release them.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

/// Cloneable cancellation signal shared by a caller and the gateway
#[derive(Debug, Clone)]
pub struct CancellationToken {
    sender: Arc<watch::Sender<bool>>,
    receiver: watch::Receiver<bool>,
}

/// Returned when a cancellable wait lost the race against its token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

impl CancellationToken {
    pub fn new() -> Self {
        let (sender, receiver) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
            receiver,
        }
    }

    /// Signal cancellation to every clone of this token
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Resolves once the token is cancelled
    pub async fn cancelled(&self) {
        let mut receiver = self.receiver.clone();
        // The sender lives as long as any clone of the token, so the wait only
        // ends by observing `true`.
        if receiver.wait_for(|cancelled| *cancelled).await.is_err() {
            std::future::pending::<()>().await;
        }
    }

    /// Run `future` unless the token fires first
    pub async fn run<F>(&self, future: F) -> Result<F::Output, Cancelled>
    where
        F: Future,
    {
        if self.is_cancelled() {
            return Err(Cancelled);
        }
        tokio::select! {
            biased;
            _ = self.cancelled() => Err(Cancelled),
            output = future => Ok(output),
        }
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}
