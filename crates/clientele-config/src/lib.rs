//! # Clientele Config
//!
//! Configuration management for the Clientele customer service.
//! Supports layered configuration from TOML files and environment variables.

mod app_config;
mod loader;
mod validation;

pub use app_config::*;
pub use loader::*;
pub use validation::*;
