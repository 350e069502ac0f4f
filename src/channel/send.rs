//! Bounded send.

use std::io::ErrorKind;
use std::time::Duration;

use log::{debug, trace, warn};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use super::deadline::Deadline;
use super::outcome::{Outcome, TransportError};

/// Write all of `bytes` to `endpoint` and flush it, waiting no longer than `timeout`.
///
/// Completes with the number of bytes written. On timeout or failure the
/// count of bytes the endpoint already accepted is reported, so the caller
/// can resume from `&bytes[accepted..]`. Nothing is retried or deduplicated.
pub async fn send_within<E>(endpoint: &mut E, bytes: &[u8], timeout: Duration) -> Outcome<usize>
where
    E: AsyncWrite + Unpin + ?Sized,
{
    if bytes.is_empty() {
        return Outcome::Completed(0);
    }

    let deadline = Deadline::after(timeout);
    let mut accepted = 0;

    while accepted < bytes.len() {
        match deadline.run(endpoint.write(&bytes[accepted..])).await {
            None => {
                debug!("Send timed out after {:?} with {}/{} bytes accepted", timeout, accepted, bytes.len());
                return Outcome::TimedOut { accepted };
            }
            Some(Ok(0)) => {
                warn!("Send failed: endpoint accepted zero bytes after {}", accepted);
                return Outcome::TransportError {
                    accepted,
                    error: TransportError::Disconnected,
                };
            }
            Some(Ok(n)) => {
                trace!("Endpoint accepted {} bytes", n);
                accepted += n;
            }
            Some(Err(e)) if e.kind() == ErrorKind::Interrupted => continue,
            Some(Err(e)) => {
                warn!("Send failed after {} bytes: {}", accepted, e);
                return Outcome::TransportError {
                    accepted,
                    error: e.into(),
                };
            }
        }
    }

    match deadline.run(endpoint.flush()).await {
        Some(Ok(())) => Outcome::Completed(accepted),
        None => {
            debug!("Send timed out after {:?} while flushing {} bytes", timeout, accepted);
            Outcome::TimedOut { accepted }
        }
        Some(Err(e)) => {
            warn!("Flush failed after {} bytes: {}", accepted, e);
            Outcome::TransportError {
                accepted,
                error: e.into(),
            }
        }
    }
}
