//! Background liveness monitoring with self-healing.
//!
//! One [`LivenessMonitor`] watches one [`MonitoredResource`]. Every tick it
//! probes the resource; a failed probe marks the resource unhealthy and
//! triggers a reconnect, and a successful reconnect marks it healthy again.
//! The first tick runs as soon as the monitor is spawned.

mod status;

pub use status::*;

use clientele_core::MonitoredResource;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Periodic prober for a single resource.
pub struct LivenessMonitor {
    resource: Arc<dyn MonitoredResource>,
    interval: Duration,
    state: Arc<AtomicU8>,
}

impl LivenessMonitor {
    /// Creates a monitor for `resource`, probing every `interval`.
    ///
    /// The status starts as [`LivenessStatus::Uninitialized`].
    #[must_use]
    pub fn new(resource: Arc<dyn MonitoredResource>, interval: Duration) -> Self {
        Self {
            resource,
            interval,
            state: Arc::new(AtomicU8::new(LivenessStatus::Uninitialized as u8)),
        }
    }

    /// Returns a read-only handle on this monitor's status flag.
    #[must_use]
    pub fn handle(&self) -> LivenessHandle {
        LivenessHandle::new(Arc::clone(&self.state))
    }

    /// Returns the monitored component's name.
    #[must_use]
    pub fn component(&self) -> &str {
        self.resource.name()
    }

    /// Runs a single probe cycle and returns the resulting status.
    pub async fn check_once(&self) -> LivenessStatus {
        let component = self.resource.name();

        match self.resource.probe().await {
            Ok(()) => {
                if self.set_status(LivenessStatus::Healthy) == LivenessStatus::Healthy {
                    debug!(component, "Resource is alive");
                } else {
                    info!(component, "Resource is alive");
                }
                LivenessStatus::Healthy
            }
            Err(e) => {
                self.set_status(LivenessStatus::Unhealthy);
                warn!(component, error = %e, "Resource is not alive, trying to reconnect");

                match self.resource.reconnect().await {
                    Ok(()) => {
                        self.set_status(LivenessStatus::Healthy);
                        info!(component, "Resource reconnected");
                        LivenessStatus::Healthy
                    }
                    Err(e) => {
                        warn!(component, error = %e, "Reconnect failed");
                        LivenessStatus::Unhealthy
                    }
                }
            }
        }
    }

    /// Spawns the monitor loop on the current runtime.
    pub fn spawn(self) -> MonitorTask {
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
        let handle = self.handle();
        let component = self.component().to_string();

        info!(
            component = %component,
            interval_secs = self.interval.as_secs_f64(),
            "Starting liveness monitor"
        );

        let join = tokio::spawn(self.run(shutdown_rx));

        MonitorTask {
            component,
            handle,
            shutdown_tx,
            join,
        }
    }

    async fn run(self, mut shutdown_rx: broadcast::Receiver<()>) {
        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    info!(component = self.resource.name(), "Received shutdown signal");
                    break;
                }

                _ = ticker.tick() => {
                    self.check_once().await;
                }
            }
        }
    }

    fn set_status(&self, status: LivenessStatus) -> LivenessStatus {
        LivenessStatus::from(self.state.swap(status as u8, Ordering::AcqRel))
    }
}

/// A running monitor loop.
pub struct MonitorTask {
    component: String,
    handle: LivenessHandle,
    shutdown_tx: broadcast::Sender<()>,
    join: JoinHandle<()>,
}

impl MonitorTask {
    /// Returns the monitored component's name.
    #[must_use]
    pub fn component(&self) -> &str {
        &self.component
    }

    /// Returns a read-only handle on the status flag.
    #[must_use]
    pub fn handle(&self) -> LivenessHandle {
        self.handle.clone()
    }

    /// Signals the loop to stop and waits for it to exit.
    ///
    /// A probe already in flight is allowed to finish.
    pub async fn stop(self) {
        let _ = self.shutdown_tx.send(());
        if let Err(e) = self.join.await {
            warn!(component = %self.component, error = %e, "Liveness monitor task failed");
        } else {
            info!(component = %self.component, "Liveness monitor stopped");
        }
    }
}
