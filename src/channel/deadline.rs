use std::future::Future;
use std::time::Duration;

use futures::FutureExt;
use tokio::time::Instant;

// Deadlines too far out for Instant arithmetic saturate to roughly thirty years.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Point in time after which a channel operation gives up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Deadline {
    /// Zero timeout: one poll, no waiting.
    Immediate,
    /// Wait until this instant.
    At(Instant),
}

impl Deadline {
    /// Start a deadline `timeout` from now.
    pub(crate) fn after(timeout: Duration) -> Self {
        if timeout.is_zero() {
            return Deadline::Immediate;
        }
        let now = Instant::now();
        Deadline::At(now.checked_add(timeout).unwrap_or_else(|| now + FAR_FUTURE))
    }

    /// Drive `op` until it finishes or the deadline passes.
    ///
    /// Returns `None` when the deadline wins. `op` is dropped at that point, so
    /// it must be cancel safe.
    ///
    /// An immediate deadline yields to the runtime once before its single poll
    /// so the I/O driver can publish readiness the OS already reports.
    pub(crate) async fn run<F: Future>(self, op: F) -> Option<F::Output> {
        match self {
            Deadline::Immediate => {
                tokio::task::yield_now().await;
                op.now_or_never()
            }
            Deadline::At(at) => tokio::time::timeout_at(at, op).await.ok(),
        }
    }
}
