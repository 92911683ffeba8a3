//! # Clientele Server Library
//!
//! Wiring and startup for the Clientele server: builds the application
//! context, serves the REST API and tears everything down on shutdown.

pub mod app;
pub mod context;
pub mod logging;
pub mod startup;

pub use app::*;
pub use context::*;
