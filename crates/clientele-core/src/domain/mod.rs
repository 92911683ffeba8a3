//! Domain entities.

pub mod customer;

pub use customer::*;
