//! Repository trait definitions.

use async_trait::async_trait;
use clientele_core::{ClienteleResult, Customer, NewCustomer};

/// Customer repository trait.
///
/// Implementations report a missing backing store as
/// `ClienteleError::BackingStoreUnavailable` and a duplicate name as
/// `ClienteleError::Conflict`.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Inserts a customer, assigning its identifier.
    async fn insert_customer(&self, customer: &NewCustomer) -> ClienteleResult<Customer>;

    /// Finds a customer by exact name.
    async fn find_customer_by_name(&self, name: &str) -> ClienteleResult<Option<Customer>>;

    /// Returns every customer, ordered by name.
    async fn find_all_customers(&self) -> ClienteleResult<Vec<Customer>>;

    /// Checks that the backing store answers.
    async fn ping(&self) -> ClienteleResult<()>;
}
