//! Bounded read.

use std::io::ErrorKind;
use std::time::Duration;

use log::{debug, trace, warn};
use tokio::io::{AsyncRead, AsyncReadExt};

use super::deadline::Deadline;
use super::outcome::{Outcome, TransportError};

/// Largest buffer a single read allocates, whatever `max_bytes` asks for.
pub const MAX_READ_CHUNK: usize = 64 * 1024;

/// Read at most `max_bytes` from `endpoint`, waiting no longer than `timeout`.
///
/// Returns as soon as any data is available; a short read is still
/// `Completed`. End-of-stream is reported as [`TransportError::Disconnected`].
/// A zero `timeout` polls the endpoint once and times out if nothing is
/// buffered. One call returns at most [`MAX_READ_CHUNK`] bytes.
pub async fn read_within<E>(endpoint: &mut E, max_bytes: usize, timeout: Duration) -> Outcome<Vec<u8>>
where
    E: AsyncRead + Unpin + ?Sized,
{
    if max_bytes == 0 {
        return Outcome::Completed(Vec::new());
    }

    let deadline = Deadline::after(timeout);
    let mut buf = vec![0u8; max_bytes.min(MAX_READ_CHUNK)];

    loop {
        match deadline.run(endpoint.read(&mut buf)).await {
            None => {
                debug!("Read timed out after {:?}", timeout);
                return Outcome::TimedOut { accepted: 0 };
            }
            Some(Ok(0)) => {
                warn!("Read failed: endpoint reached end of stream");
                return Outcome::TransportError {
                    accepted: 0,
                    error: TransportError::Disconnected,
                };
            }
            Some(Ok(n)) => {
                trace!("Read {} of up to {} bytes", n, buf.len());
                buf.truncate(n);
                return Outcome::Completed(buf);
            }
            Some(Err(e)) if e.kind() == ErrorKind::Interrupted => continue,
            Some(Err(e)) => {
                warn!("Read failed: {}", e);
                return Outcome::TransportError {
                    accepted: 0,
                    error: e.into(),
                };
            }
        }
    }
}
