//! MySQL customer repository implementation.

use crate::{traits::CustomerRepository, DatabaseConnection};
use async_trait::async_trait;
use clientele_core::{ClienteleError, ClienteleResult, Customer, CustomerId, NewCustomer};
use clientele_resilience::with_timeout;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// MySQL customer repository implementation.
///
/// Every query is bounded by the connection's query timeout.
#[derive(Clone)]
pub struct MySqlCustomerRepository {
    connection: Arc<DatabaseConnection>,
}

impl MySqlCustomerRepository {
    /// Creates a new MySQL customer repository.
    #[must_use]
    pub fn new(connection: Arc<DatabaseConnection>) -> Self {
        Self { connection }
    }
}

/// Database row representation of a customer.
#[derive(Debug, FromRow)]
struct CustomerRow {
    id: String, // CHAR(36)
    name: String,
    city: String,
}

impl TryFrom<CustomerRow> for Customer {
    type Error = ClienteleError;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| ClienteleError::Internal(format!("Invalid UUID in database: {e}")))?;

        Ok(Customer {
            id: CustomerId::from_uuid(id),
            name: row.name,
            city: row.city,
        })
    }
}

#[async_trait]
impl CustomerRepository for MySqlCustomerRepository {
    async fn insert_customer(&self, customer: &NewCustomer) -> ClienteleResult<Customer> {
        let pool = self.connection.current()?;
        let id = CustomerId::new();
        debug!(customer_id = %id, name = %customer.name, "Inserting customer");

        with_timeout(self.connection.query_timeout(), || async {
            sqlx::query("INSERT INTO customers (id, name, city) VALUES (?, ?, ?)")
                .bind(id.into_inner().to_string())
                .bind(&customer.name)
                .bind(&customer.city)
                .execute(pool.inner())
                .await?;
            Ok::<_, ClienteleError>(())
        })
        .await?;

        Ok(Customer::from_new(id, customer.clone()))
    }

    async fn find_customer_by_name(&self, name: &str) -> ClienteleResult<Option<Customer>> {
        let pool = self.connection.current()?;
        debug!("Finding customer by name: {}", name);

        let row = with_timeout(self.connection.query_timeout(), || async {
            let row = sqlx::query_as::<_, CustomerRow>(
                "SELECT id, name, city FROM customers WHERE name = ?",
            )
            .bind(name)
            .fetch_optional(pool.inner())
            .await?;
            Ok::<_, ClienteleError>(row)
        })
        .await?;

        row.map(Customer::try_from).transpose()
    }

    async fn find_all_customers(&self) -> ClienteleResult<Vec<Customer>> {
        let pool = self.connection.current()?;
        debug!("Finding all customers");

        let rows = with_timeout(self.connection.query_timeout(), || async {
            let rows = sqlx::query_as::<_, CustomerRow>(
                "SELECT id, name, city FROM customers ORDER BY name",
            )
            .fetch_all(pool.inner())
            .await?;
            Ok::<_, ClienteleError>(rows)
        })
        .await?;

        rows.into_iter().map(Customer::try_from).collect()
    }

    async fn ping(&self) -> ClienteleResult<()> {
        self.connection.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clientele_config::DatabaseConfig;

    fn disconnected_repository() -> MySqlCustomerRepository {
        MySqlCustomerRepository::new(Arc::new(DatabaseConnection::disconnected(
            DatabaseConfig::default(),
        )))
    }

    #[test]
    fn test_row_conversion() {
        let id = Uuid::now_v7();
        let customer = Customer::try_from(CustomerRow {
            id: id.to_string(),
            name: "Amanda".to_string(),
            city: "Campinas".to_string(),
        })
        .unwrap();

        assert_eq!(customer.id.into_inner(), id);
        assert_eq!(customer.name, "Amanda");
    }

    #[test]
    fn test_row_conversion_rejects_bad_id() {
        let result = Customer::try_from(CustomerRow {
            id: "nope".to_string(),
            name: "Amanda".to_string(),
            city: "Campinas".to_string(),
        });
        assert!(matches!(result, Err(ClienteleError::Internal(_))));
    }

    #[tokio::test]
    async fn test_calls_without_pool_report_unavailable() {
        let repo = disconnected_repository();

        assert!(matches!(
            repo.find_customer_by_name("Amanda").await,
            Err(ClienteleError::BackingStoreUnavailable)
        ));
        assert!(matches!(
            repo.find_all_customers().await,
            Err(ClienteleError::BackingStoreUnavailable)
        ));
        assert!(matches!(
            repo.insert_customer(&NewCustomer::new("Amanda", "Campinas")).await,
            Err(ClienteleError::BackingStoreUnavailable)
        ));
        assert!(repo.ping().await.is_err());
    }
}
