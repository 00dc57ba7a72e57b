// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Signal protocol
//!
//! Every control request carries its own one-shot reply slot. The worker
//! writes exactly one [`Transition`] into it; a request dropped unanswered
//! (because the worker terminated) resolves to [`SignalError::Terminated`].

use crate::error::SignalError;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;
use wh_core::{Signal, Transition};

/// Sending half of a worker's control inbox
pub(crate) type Inbox = mpsc::Sender<ControlRequest>;

/// A signal paired with its single-use reply slot
#[derive(Debug)]
pub(crate) struct ControlRequest {
    pub signal: Signal,
    reply: oneshot::Sender<Transition>,
}

impl ControlRequest {
    pub fn new(signal: Signal) -> (Self, oneshot::Receiver<Transition>) {
        let (reply, rx) = oneshot::channel();
        (Self { signal, reply }, rx)
    }

    /// Write the acknowledgment; a caller that stopped waiting is not an error
    pub fn acknowledge(self, transition: Transition) {
        if self.reply.send(transition).is_err() {
            tracing::debug!(signal = %self.signal, "caller stopped waiting, reply dropped");
        }
    }
}

/// Result of a bounded-wait signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalOutcome {
    /// The worker replied before the deadline
    Acknowledged(Transition),
    /// No reply yet; an enqueued request is still processed later
    TimedOut,
}

impl SignalOutcome {
    pub fn transition(&self) -> Option<&Transition> {
        match self {
            Self::Acknowledged(transition) => Some(transition),
            Self::TimedOut => None,
        }
    }

    pub fn is_timed_out(&self) -> bool {
        matches!(self, Self::TimedOut)
    }
}

fn terminated(name: &str) -> SignalError {
    SignalError::Terminated {
        name: name.to_string(),
    }
}

/// Enqueue a signal and wait for its acknowledgment
pub(crate) async fn signal(
    inbox: &Inbox,
    name: &str,
    signal: Signal,
) -> Result<Transition, SignalError> {
    let (request, reply) = ControlRequest::new(signal);
    inbox.send(request).await.map_err(|_| terminated(name))?;
    reply.await.map_err(|_| terminated(name))
}

/// Enqueue a signal and race its acknowledgment against `wait`
///
/// Enqueueing waits for inbox space like [`signal`]; only the reply is
/// bounded. A timed-out request stays enqueued and is still applied.
pub(crate) async fn try_signal(
    inbox: &Inbox,
    name: &str,
    signal: Signal,
    wait: Duration,
) -> Result<SignalOutcome, SignalError> {
    let (request, reply) = ControlRequest::new(signal);
    inbox.send(request).await.map_err(|_| terminated(name))?;

    match timeout(wait, reply).await {
        Err(_) => {
            tracing::debug!(%signal, worker = name, "signal not acknowledged before deadline");
            Ok(SignalOutcome::TimedOut)
        }
        Ok(Err(_)) => Err(terminated(name)),
        Ok(Ok(transition)) => Ok(SignalOutcome::Acknowledged(transition)),
    }
}

/// Blocking form of [`signal`] for synchronous callers
///
/// Must not be called from within an async context.
pub(crate) fn blocking_signal(
    inbox: &Inbox,
    name: &str,
    signal: Signal,
) -> Result<Transition, SignalError> {
    let (request, reply) = ControlRequest::new(signal);
    inbox.blocking_send(request).map_err(|_| terminated(name))?;
    reply.blocking_recv().map_err(|_| terminated(name))
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
