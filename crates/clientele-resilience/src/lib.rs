//! # Clientele Resilience
//!
//! Resilience patterns for the Clientele customer service.
//! Provides background liveness monitoring with self-healing, and
//! timeouts for backing store calls.

pub mod monitor;
pub mod timeout;

pub use monitor::*;
pub use timeout::*;
