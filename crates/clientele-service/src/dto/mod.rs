//! Data transfer objects for the service layer.

mod customer_dto;

pub use customer_dto::*;
