//! In-memory customer repository for tests.

use crate::traits::CustomerRepository;
use async_trait::async_trait;
use clientele_core::{ClienteleError, ClienteleResult, Customer, CustomerId, NewCustomer};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Call counters recorded by [`InMemoryCustomerRepository`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepositoryCalls {
    pub inserts: usize,
    pub finds_by_name: usize,
    pub find_alls: usize,
}

/// In-memory repository that counts calls and can simulate an outage.
pub struct InMemoryCustomerRepository {
    customers: Mutex<BTreeMap<String, Customer>>,
    available: AtomicBool,
    inserts: AtomicUsize,
    finds_by_name: AtomicUsize,
    find_alls: AtomicUsize,
}

impl Default for InMemoryCustomerRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCustomerRepository {
    /// Creates an empty, available repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            customers: Mutex::new(BTreeMap::new()),
            available: AtomicBool::new(true),
            inserts: AtomicUsize::new(0),
            finds_by_name: AtomicUsize::new(0),
            find_alls: AtomicUsize::new(0),
        }
    }

    /// Seeds a customer directly, bypassing counters. Returns the stored entity.
    pub fn seed(&self, name: &str, city: &str) -> Customer {
        let customer = Customer {
            id: CustomerId::new(),
            name: name.to_string(),
            city: city.to_string(),
        };
        self.customers
            .lock()
            .insert(customer.name.clone(), customer.clone());
        customer
    }

    /// Simulates the backing store going away or coming back.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Returns how many times each operation was invoked.
    #[must_use]
    pub fn calls(&self) -> RepositoryCalls {
        RepositoryCalls {
            inserts: self.inserts.load(Ordering::SeqCst),
            finds_by_name: self.finds_by_name.load(Ordering::SeqCst),
            find_alls: self.find_alls.load(Ordering::SeqCst),
        }
    }

    /// Returns the number of stored customers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.customers.lock().len()
    }

    /// Returns true if no customer is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.customers.lock().is_empty()
    }

    fn ensure_available(&self) -> ClienteleResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(ClienteleError::BackingStoreUnavailable)
        }
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn insert_customer(&self, customer: &NewCustomer) -> ClienteleResult<Customer> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.ensure_available()?;

        let mut stored = self.customers.lock();
        if stored.contains_key(&customer.name) {
            return Err(ClienteleError::conflict(format!(
                "Duplicate entry '{}' for key 'uq_customers_name'",
                customer.name
            )));
        }

        let created = Customer::from_new(CustomerId::new(), customer.clone());
        stored.insert(created.name.clone(), created.clone());
        Ok(created)
    }

    async fn find_customer_by_name(&self, name: &str) -> ClienteleResult<Option<Customer>> {
        self.finds_by_name.fetch_add(1, Ordering::SeqCst);
        self.ensure_available()?;
        Ok(self.customers.lock().get(name).cloned())
    }

    async fn find_all_customers(&self) -> ClienteleResult<Vec<Customer>> {
        self.find_alls.fetch_add(1, Ordering::SeqCst);
        self.ensure_available()?;
        Ok(self.customers.lock().values().cloned().collect())
    }

    async fn ping(&self) -> ClienteleResult<()> {
        self.ensure_available()
    }
}
