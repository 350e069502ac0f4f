use std::time::Duration;

use super::{DEFAULT_READ_TIMEOUT_MS, DEFAULT_SEND_TIMEOUT_MS};

/// The two deadlines a channel enforces.
///
/// Fixed for the lifetime of a channel. A zero duration means "fail
/// immediately if the transport is not ready", never "wait forever".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeoutPolicy {
    read_timeout: Duration,
    send_timeout: Duration,
}

impl TimeoutPolicy {
    /// Create a policy from explicit durations.
    pub const fn new(read_timeout: Duration, send_timeout: Duration) -> Self {
        Self {
            read_timeout,
            send_timeout,
        }
    }

    /// Create a policy from millisecond values.
    pub const fn from_millis(read_timeout_ms: u64, send_timeout_ms: u64) -> Self {
        Self::new(
            Duration::from_millis(read_timeout_ms),
            Duration::from_millis(send_timeout_ms),
        )
    }

    /// Maximum time a read waits for inbound data.
    pub const fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    /// Maximum time a send waits for outbound capacity.
    pub const fn send_timeout(&self) -> Duration {
        self.send_timeout
    }
}

impl Default for TimeoutPolicy {
    fn default() -> Self {
        Self::from_millis(DEFAULT_READ_TIMEOUT_MS, DEFAULT_SEND_TIMEOUT_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = TimeoutPolicy::default();
        assert_eq!(policy.read_timeout(), Duration::from_millis(50));
        assert_eq!(policy.send_timeout(), Duration::from_millis(1000));
    }

    #[test]
    fn test_from_millis() {
        let policy = TimeoutPolicy::from_millis(0, 250);
        assert!(policy.read_timeout().is_zero());
        assert_eq!(policy.send_timeout(), Duration::from_millis(250));
    }

    #[test]
    fn test_policy_is_copy() {
        let policy = TimeoutPolicy::from_millis(10, 20);
        let copied = policy;
        assert_eq!(policy, copied);
    }
}
