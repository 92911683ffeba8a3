//! # Clientele Service
//!
//! Customer service layer: validation, the read-through lookup policy and
//! the in-process cache that backs it.

pub mod cache;
pub mod customer_service;
pub mod dto;
pub mod r#impl;

pub use cache::*;
pub use customer_service::*;
pub use dto::*;
pub use r#impl::*;
