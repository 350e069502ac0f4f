//! Timeout-bounded channel over a byte-stream endpoint.
//!
//! This module provides:
//! - `TimeoutChannel`, which owns an endpoint and a fixed `TimeoutPolicy`
//! - `read_within` / `send_within` for one-off bounded calls on a borrowed endpoint
//! - `Outcome`, the tagged result of every call
//!
//! The channel never spawns tasks or threads. Each call suspends the calling
//! task until the transport is ready or the deadline passes, and every outcome
//! is handed back to the caller unchanged: retry and reconnection belong to
//! the layer above.

mod deadline;
mod outcome;
mod read;
mod send;

pub use outcome::{Outcome, TransportError};
pub use read::{MAX_READ_CHUNK, read_within};
pub use send::send_within;

use tokio::io::{AsyncRead, AsyncWrite};

use crate::config::{PolicyResolver, TimeoutPolicy};

/// A transport endpoint wrapped with read and send deadlines.
///
/// `read` and `send` borrow the channel mutably, so at most one operation is in
/// flight per channel. To read and send from independent tasks, split the
/// transport first and wrap each half in its own channel.
#[derive(Debug)]
pub struct TimeoutChannel<E> {
    endpoint: E,
    policy: TimeoutPolicy,
}

impl<E> TimeoutChannel<E> {
    /// Wrap `endpoint` with `policy`.
    pub fn new(endpoint: E, policy: TimeoutPolicy) -> Self {
        Self { endpoint, policy }
    }

    /// Wrap `endpoint` with the default 50 ms read / 1000 ms send policy.
    pub fn with_default_policy(endpoint: E) -> Self {
        Self::new(endpoint, TimeoutPolicy::default())
    }

    /// Wrap `endpoint` with the policy produced by `resolver`.
    pub fn from_resolver(endpoint: E, resolver: &PolicyResolver) -> Self {
        Self::new(endpoint, resolver.resolve())
    }

    /// The policy fixed at construction.
    pub fn policy(&self) -> TimeoutPolicy {
        self.policy
    }

    /// Get a reference to the endpoint.
    pub fn get_ref(&self) -> &E {
        &self.endpoint
    }

    /// Get a mutable reference to the endpoint.
    pub fn get_mut(&mut self) -> &mut E {
        &mut self.endpoint
    }

    /// Unwrap the endpoint.
    pub fn into_inner(self) -> E {
        self.endpoint
    }
}

impl<E: AsyncRead + Unpin> TimeoutChannel<E> {
    /// Read up to `max_bytes`, bounded by the policy's read timeout.
    pub async fn read(&mut self, max_bytes: usize) -> Outcome<Vec<u8>> {
        read_within(&mut self.endpoint, max_bytes, self.policy.read_timeout()).await
    }
}

impl<E: AsyncWrite + Unpin> TimeoutChannel<E> {
    /// Send all of `bytes`, bounded by the policy's send timeout.
    pub async fn send(&mut self, bytes: &[u8]) -> Outcome<usize> {
        send_within(&mut self.endpoint, bytes, self.policy.send_timeout()).await
    }
}
