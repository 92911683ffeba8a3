//! Core traits shared across layers.

use crate::ClienteleResult;
use async_trait::async_trait;

/// A resource whose liveness is watched by a background monitor.
///
/// `probe` answers "is it usable right now"; `reconnect` rebuilds the
/// underlying resource after a failed probe. Implementations must be cheap
/// to call repeatedly and must never panic on failure.
#[async_trait]
pub trait MonitoredResource: Send + Sync {
    /// Returns the component name used in logs and status reports.
    fn name(&self) -> &str;

    /// Checks that the resource answers.
    async fn probe(&self) -> ClienteleResult<()>;

    /// Tears down and recreates the resource.
    async fn reconnect(&self) -> ClienteleResult<()>;
}
