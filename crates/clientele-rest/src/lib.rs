//! # Clientele REST
//!
//! REST API layer using Axum for the Clientele customer service.
//! Provides HTTP endpoints for customer registration and lookup, plus
//! health and component monitoring.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
