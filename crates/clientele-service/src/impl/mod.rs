//! Service trait implementations.

mod customer_service_impl;

pub use customer_service_impl::*;
