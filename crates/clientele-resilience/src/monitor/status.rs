//! Liveness status shared between a monitor and its readers.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// Liveness of a monitored resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum LivenessStatus {
    /// No probe has completed yet.
    Uninitialized = 0,
    /// The last probe (or reconnect) succeeded.
    Healthy = 1,
    /// The last probe failed and the resource could not be rebuilt.
    Unhealthy = 2,
}

impl From<u8> for LivenessStatus {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Healthy,
            2 => Self::Unhealthy,
            _ => Self::Uninitialized,
        }
    }
}

impl LivenessStatus {
    /// Collapses the tri-state into alive / not alive.
    #[must_use]
    pub const fn is_alive(self) -> bool {
        matches!(self, Self::Healthy)
    }

    /// Returns a lowercase label for logs and status payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Healthy => "healthy",
            Self::Unhealthy => "unhealthy",
        }
    }
}

impl fmt::Display for LivenessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only view of a resource's liveness flag.
///
/// Cloning is cheap; every clone observes the same flag. Only the owning
/// [`LivenessMonitor`](super::LivenessMonitor) can change it.
#[derive(Clone)]
pub struct LivenessHandle {
    state: Arc<AtomicU8>,
}

impl LivenessHandle {
    pub(crate) const fn new(state: Arc<AtomicU8>) -> Self {
        Self { state }
    }

    /// Creates a handle pinned to a fixed status, for resources that are
    /// not monitored (a disabled cache) and for tests.
    #[must_use]
    pub fn constant(status: LivenessStatus) -> Self {
        Self::new(Arc::new(AtomicU8::new(status as u8)))
    }

    /// Returns the current status.
    #[must_use]
    pub fn status(&self) -> LivenessStatus {
        LivenessStatus::from(self.state.load(Ordering::Acquire))
    }

    /// Returns true if the resource is currently healthy.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.status().is_alive()
    }
}

impl fmt::Debug for LivenessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LivenessHandle")
            .field("status", &self.status())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_u8() {
        assert_eq!(LivenessStatus::from(0), LivenessStatus::Uninitialized);
        assert_eq!(LivenessStatus::from(1), LivenessStatus::Healthy);
        assert_eq!(LivenessStatus::from(2), LivenessStatus::Unhealthy);
        assert_eq!(LivenessStatus::from(42), LivenessStatus::Uninitialized);
    }

    #[test]
    fn test_only_healthy_is_alive() {
        assert!(LivenessStatus::Healthy.is_alive());
        assert!(!LivenessStatus::Unhealthy.is_alive());
        assert!(!LivenessStatus::Uninitialized.is_alive());
    }

    #[test]
    fn test_clones_share_state() {
        let state = Arc::new(AtomicU8::new(LivenessStatus::Uninitialized as u8));
        let handle = LivenessHandle::new(Arc::clone(&state));
        let clone = handle.clone();

        state.store(LivenessStatus::Healthy as u8, Ordering::Release);
        assert!(handle.is_alive());
        assert!(clone.is_alive());
    }

    #[test]
    fn test_constant_handle() {
        let handle = LivenessHandle::constant(LivenessStatus::Unhealthy);
        assert_eq!(handle.status(), LivenessStatus::Unhealthy);
        assert_eq!(handle.status().to_string(), "unhealthy");
    }
}
