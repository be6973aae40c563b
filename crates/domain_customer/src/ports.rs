//! Customer Domain Ports
//!
//! This module defines the storage port for the customer domain. The engine
//! only ever talks to `CustomerStore`; adapters provide the persistence.
//!
//! # Architecture
//!
//! - **PostgreSQL Adapter**: `infra_db::PostgresCustomerStore`
//! - **In-memory Adapter**: [`memory::InMemoryCustomerStore`], used by tests
//!   and by the HTTP tests of `interface_api`
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use domain_customer::{CustomerService, InMemoryCustomerStore};
//!
//! let store = Arc::new(InMemoryCustomerStore::new());
//! let service = CustomerService::new(store);
//! let customers = service.list_all().await?;
//! ```

use async_trait::async_trait;

use core_kernel::{CustomerId, DomainPort, HealthCheckable, PortError};

use crate::address::NewAddress;
use crate::customer::{Customer, NewCustomer};
use crate::phone::NewPhone;

/// Storage port for customers and their owned phones and addresses
///
/// Every read returns customers with both child collections loaded,
/// children in ascending id order.
#[async_trait]
pub trait CustomerStore: DomainPort + HealthCheckable {
    /// Returns every stored customer
    async fn list_all(&self) -> Result<Vec<Customer>, PortError>;

    /// Retrieves a customer by ID
    ///
    /// # Returns
    ///
    /// `None` if no customer has this id
    async fn get_by_id(&self, id: CustomerId) -> Result<Option<Customer>, PortError>;

    /// Inserts the scalar row of a new customer
    ///
    /// # Returns
    ///
    /// The store-assigned id. A document number already held by another
    /// row yields `PortError::Conflict` where the store enforces it.
    async fn insert_customer(&self, customer: NewCustomer) -> Result<CustomerId, PortError>;

    /// Inserts phones already stamped with their parent id
    async fn insert_phones(&self, phones: Vec<NewPhone>) -> Result<(), PortError>;

    /// Inserts addresses already stamped with their parent id
    async fn insert_addresses(&self, addresses: Vec<NewAddress>) -> Result<(), PortError>;

    /// Discards every phone and address of the customer and inserts the new sets
    ///
    /// # Arguments
    ///
    /// * `customer_id` - Owner of both collections
    /// * `phones` - Complete new phone set, fresh ids are assigned
    /// * `addresses` - Complete new address set, fresh ids are assigned
    async fn replace_children(
        &self,
        customer_id: CustomerId,
        phones: Vec<NewPhone>,
        addresses: Vec<NewAddress>,
    ) -> Result<(), PortError>;

    /// Persists the scalar fields of an existing customer
    ///
    /// Child collections on `customer` are ignored.
    async fn update(&self, customer: &Customer) -> Result<(), PortError>;

    /// Removes the customer together with its phones and addresses
    async fn delete(&self, customer: &Customer) -> Result<(), PortError>;
}

/// Extension trait for CustomerStore with convenience methods
#[async_trait]
pub trait CustomerStoreExt: CustomerStore {
    /// Returns true if a customer other than `except` holds the document number
    ///
    /// Scans the full list, so it offers no protection against a
    /// concurrent insert of the same number.
    async fn document_number_taken(
        &self,
        document_number: i64,
        except: Option<CustomerId>,
    ) -> Result<bool, PortError> {
        let customers = self.list_all().await?;
        Ok(customers
            .iter()
            .any(|c| c.document_number == document_number && Some(c.id) != except))
    }
}

impl<T: CustomerStore + ?Sized> CustomerStoreExt for T {}

/// In-memory implementation of CustomerStore
///
/// Assigns sequential ids starting at 1 and cascades deletes to children.
/// It enforces no uniqueness constraint. Faults can be injected to exercise
/// the error paths of the engine.
pub mod memory {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use chrono::Utc;
    use tokio::sync::RwLock;

    use core_kernel::{AdapterHealth, AddressId, HealthCheckResult, PhoneId};
    use crate::address::Address;
    use crate::phone::Phone;

    #[derive(Debug, Default)]
    struct State {
        customers: BTreeMap<CustomerId, Customer>,
        phones: BTreeMap<PhoneId, Phone>,
        addresses: BTreeMap<AddressId, Address>,
        last_customer_id: i32,
        last_phone_id: i32,
        last_address_id: i32,
    }

    impl State {
        fn assemble(&self, customer: &Customer) -> Customer {
            let mut loaded = customer.clone();
            loaded.phones = self
                .phones
                .values()
                .filter(|p| p.customer_id == customer.id)
                .cloned()
                .collect();
            loaded.addresses = self
                .addresses
                .values()
                .filter(|a| a.customer_id == customer.id)
                .cloned()
                .collect();
            loaded
        }

        fn ensure_parent(&self, customer_id: CustomerId) -> Result<(), PortError> {
            if self.customers.contains_key(&customer_id) {
                Ok(())
            } else {
                Err(PortError::not_found("Customer", customer_id))
            }
        }

        fn push_phone(&mut self, phone: NewPhone) {
            self.last_phone_id += 1;
            let id = PhoneId::new(self.last_phone_id);
            self.phones.insert(
                id,
                Phone {
                    id,
                    customer_id: phone.customer_id,
                    number: phone.number,
                    phone_type: phone.phone_type,
                },
            );
        }

        fn push_address(&mut self, address: NewAddress) {
            self.last_address_id += 1;
            let id = AddressId::new(self.last_address_id);
            self.addresses.insert(
                id,
                Address {
                    id,
                    customer_id: address.customer_id,
                    description: address.description,
                },
            );
        }
    }

    /// In-memory customer store
    #[derive(Debug, Default, Clone)]
    pub struct InMemoryCustomerStore {
        state: Arc<RwLock<State>>,
        fail_phone_inserts: Arc<AtomicBool>,
        fail_address_inserts: Arc<AtomicBool>,
        unavailable: Arc<AtomicBool>,
    }

    impl InMemoryCustomerStore {
        /// Creates an empty store
        pub fn new() -> Self {
            Self::default()
        }

        /// Makes every following `insert_phones` call fail
        pub fn fail_phone_inserts(&self, fail: bool) {
            self.fail_phone_inserts.store(fail, Ordering::SeqCst);
        }

        /// Makes every following `insert_addresses` call fail
        pub fn fail_address_inserts(&self, fail: bool) {
            self.fail_address_inserts.store(fail, Ordering::SeqCst);
        }

        /// Simulates a lost backend: every operation fails and health is unhealthy
        pub fn set_unavailable(&self, unavailable: bool) {
            self.unavailable.store(unavailable, Ordering::SeqCst);
        }

        /// Number of stored customer rows, children excluded
        pub async fn customer_count(&self) -> usize {
            self.state.read().await.customers.len()
        }

        /// Number of stored phones across all customers
        pub async fn phone_count(&self) -> usize {
            self.state.read().await.phones.len()
        }

        /// Number of stored addresses across all customers
        pub async fn address_count(&self) -> usize {
            self.state.read().await.addresses.len()
        }

        fn check_available(&self) -> Result<(), PortError> {
            if self.unavailable.load(Ordering::SeqCst) {
                Err(PortError::connection("in-memory store is unavailable"))
            } else {
                Ok(())
            }
        }
    }

    impl DomainPort for InMemoryCustomerStore {}

    #[async_trait]
    impl HealthCheckable for InMemoryCustomerStore {
        async fn health_check(&self) -> HealthCheckResult {
            let (status, message) = if self.unavailable.load(Ordering::SeqCst) {
                (AdapterHealth::Unhealthy, "Store marked unavailable")
            } else {
                (AdapterHealth::Healthy, "In-memory store")
            };

            HealthCheckResult {
                adapter_id: "in-memory-customer-store".to_string(),
                status,
                latency_ms: 0,
                message: Some(message.to_string()),
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl CustomerStore for InMemoryCustomerStore {
        async fn list_all(&self) -> Result<Vec<Customer>, PortError> {
            self.check_available()?;
            let state = self.state.read().await;
            Ok(state.customers.values().map(|c| state.assemble(c)).collect())
        }

        async fn get_by_id(&self, id: CustomerId) -> Result<Option<Customer>, PortError> {
            self.check_available()?;
            let state = self.state.read().await;
            Ok(state.customers.get(&id).map(|c| state.assemble(c)))
        }

        async fn insert_customer(&self, customer: NewCustomer) -> Result<CustomerId, PortError> {
            self.check_available()?;
            let mut state = self.state.write().await;
            state.last_customer_id += 1;
            let id = CustomerId::new(state.last_customer_id);

            state.customers.insert(
                id,
                Customer {
                    id,
                    document_type: customer.document_type,
                    document_number: customer.document_number,
                    given_names: customer.given_names,
                    first_surname: customer.first_surname,
                    second_surname: customer.second_surname,
                    gender: customer.gender,
                    birth_date: customer.birth_date,
                    email: customer.email,
                    phones: Vec::new(),
                    addresses: Vec::new(),
                },
            );
            Ok(id)
        }

        async fn insert_phones(&self, phones: Vec<NewPhone>) -> Result<(), PortError> {
            self.check_available()?;
            if self.fail_phone_inserts.load(Ordering::SeqCst) {
                return Err(PortError::internal("phone insert failed"));
            }

            let mut state = self.state.write().await;
            for phone in &phones {
                state.ensure_parent(phone.customer_id)?;
            }
            for phone in phones {
                state.push_phone(phone);
            }
            Ok(())
        }

        async fn insert_addresses(&self, addresses: Vec<NewAddress>) -> Result<(), PortError> {
            self.check_available()?;
            if self.fail_address_inserts.load(Ordering::SeqCst) {
                return Err(PortError::internal("address insert failed"));
            }

            let mut state = self.state.write().await;
            for address in &addresses {
                state.ensure_parent(address.customer_id)?;
            }
            for address in addresses {
                state.push_address(address);
            }
            Ok(())
        }

        async fn replace_children(
            &self,
            customer_id: CustomerId,
            phones: Vec<NewPhone>,
            addresses: Vec<NewAddress>,
        ) -> Result<(), PortError> {
            self.check_available()?;
            let mut state = self.state.write().await;
            state.ensure_parent(customer_id)?;

            state.phones.retain(|_, p| p.customer_id != customer_id);
            state.addresses.retain(|_, a| a.customer_id != customer_id);
            for phone in phones {
                state.push_phone(NewPhone { customer_id, ..phone });
            }
            for address in addresses {
                state.push_address(NewAddress { customer_id, ..address });
            }
            Ok(())
        }

        async fn update(&self, customer: &Customer) -> Result<(), PortError> {
            self.check_available()?;
            let mut state = self.state.write().await;
            let stored = state
                .customers
                .get_mut(&customer.id)
                .ok_or_else(|| PortError::not_found("Customer", customer.id))?;

            *stored = Customer {
                phones: Vec::new(),
                addresses: Vec::new(),
                ..customer.clone()
            };
            Ok(())
        }

        async fn delete(&self, customer: &Customer) -> Result<(), PortError> {
            self.check_available()?;
            let mut state = self.state.write().await;
            if state.customers.remove(&customer.id).is_none() {
                return Err(PortError::not_found("Customer", customer.id));
            }
            state.phones.retain(|_, p| p.customer_id != customer.id);
            state.addresses.retain(|_, a| a.customer_id != customer.id);
            Ok(())
        }
    }
}
