//! # Clientele Repository
//!
//! Backing store access for customers.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn CustomerRepository>
//! MySqlCustomerRepository
//!   ↓  Arc<DatabaseConnection>   (swappable pool, watched by a liveness monitor)
//! MySQL
//! ```

pub mod mysql;
pub mod pool;
pub mod traits;

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;

pub use mysql::*;
pub use pool::*;
pub use traits::*;

#[cfg(any(test, feature = "test-utils"))]
pub use memory::*;

#[cfg(test)]
mod tests {
    use super::*;
    use clientele_core::{ClienteleError, NewCustomer};

    #[tokio::test]
    async fn test_in_memory_insert_and_find() {
        let repo = InMemoryCustomerRepository::new();
        let created = repo
            .insert_customer(&NewCustomer::new("Fernanda Lima", "Limeira"))
            .await
            .unwrap();

        let found = repo.find_customer_by_name("Fernanda Lima").await.unwrap();
        assert_eq!(found, Some(created));
        assert_eq!(repo.calls().inserts, 1);
        assert_eq!(repo.calls().finds_by_name, 1);
    }

    #[tokio::test]
    async fn test_in_memory_rejects_duplicate_name() {
        let repo = InMemoryCustomerRepository::new();
        repo.seed("Amanda", "Campinas");

        let result = repo
            .insert_customer(&NewCustomer::new("Amanda", "Sorocaba"))
            .await;
        assert!(matches!(result, Err(ClienteleError::Conflict(_))));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_in_memory_outage() {
        let repo = InMemoryCustomerRepository::new();
        repo.set_available(false);

        assert!(matches!(
            repo.find_all_customers().await,
            Err(ClienteleError::BackingStoreUnavailable)
        ));
        assert!(repo.ping().await.is_err());

        repo.set_available(true);
        assert!(repo.find_all_customers().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_in_memory_lists_in_name_order() {
        let repo = InMemoryCustomerRepository::new();
        repo.seed("Thiago", "Santos");
        repo.seed("Amanda", "Campinas");

        let names: Vec<_> = repo
            .find_all_customers()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Amanda", "Thiago"]);
    }
}
