//! Result of a single read or send.

use std::io;

use thiserror::Error;

/// How a bounded read or send ended.
///
/// A timeout is an expected outcome, not an error: it carries no cause and
/// callers decide whether to try again. Nothing survives past the call that
/// produced it.
#[derive(Debug)]
pub enum Outcome<T> {
    /// The operation finished before its deadline.
    Completed(T),

    /// The deadline passed first.
    ///
    /// `accepted` is the number of bytes the transport took before the
    /// deadline. It is always zero for reads, since any data at all completes
    /// a read.
    TimedOut { accepted: usize },

    /// The transport failed; `accepted` bytes had been taken before it did.
    TransportError { accepted: usize, error: TransportError },
}

impl<T> Outcome<T> {
    /// True if the operation completed.
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed(_))
    }

    /// True if the deadline passed.
    pub fn is_timed_out(&self) -> bool {
        matches!(self, Outcome::TimedOut { .. })
    }

    /// True if the transport failed.
    pub fn is_transport_error(&self) -> bool {
        matches!(self, Outcome::TransportError { .. })
    }

    /// The completed value, discarding timeouts and failures.
    pub fn completed(self) -> Option<T> {
        match self {
            Outcome::Completed(value) => Some(value),
            _ => None,
        }
    }

    /// Map the completed value.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Outcome::Completed(value) => Outcome::Completed(f(value)),
            Outcome::TimedOut { accepted } => Outcome::TimedOut { accepted },
            Outcome::TransportError { accepted, error } => Outcome::TransportError { accepted, error },
        }
    }
}

/// The underlying link failed.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The endpoint reported end-of-stream or accepted zero bytes.
    #[error("Peer disconnected")]
    Disconnected,

    /// The endpoint returned an I/O error.
    #[error("Transport failure: {0}")]
    Io(#[from] io::Error),
}

impl TransportError {
    /// True if the error means the peer is gone, however the transport phrased it.
    pub fn is_disconnect(&self) -> bool {
        match self {
            TransportError::Disconnected => true,
            TransportError::Io(e) => matches!(
                e.kind(),
                io::ErrorKind::BrokenPipe
                    | io::ErrorKind::ConnectionReset
                    | io::ErrorKind::ConnectionAborted
                    | io::ErrorKind::NotConnected
                    | io::ErrorKind::UnexpectedEof
            ),
        }
    }
}
