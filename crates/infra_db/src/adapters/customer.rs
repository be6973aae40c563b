//! PostgreSQL Customer Adapter
//!
//! This module provides the database-backed implementation of the
//! `CustomerStore` port using the `CustomerRepository`.
//!
//! # Overview
//!
//! The `PostgresCustomerStore`:
//!
//! - Translates domain values into repository rows
//! - Loads children for a batch of customers in two queries
//! - Translates `DatabaseError` into `PortError`; the unique constraint on
//!   `document_number` surfaces as `PortError::Conflict`
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use infra_db::adapters::PostgresCustomerStore;
//! use domain_customer::{CustomerService, CustomerStore};
//!
//! let store: Arc<dyn CustomerStore> = Arc::new(PostgresCustomerStore::new(pool));
//! let service = CustomerService::new(store);
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::{debug, info, instrument};

use core_kernel::{
    AdapterHealth, AddressId, CustomerId, DomainPort, HealthCheckResult, HealthCheckable,
    PhoneId, PortError,
};
use domain_customer::{
    Address, Customer, CustomerStore, DocumentType, NewAddress, NewCustomer, NewPhone, Phone,
};

use crate::error::DatabaseError;
use crate::repositories::customer::{
    AddressRow, CustomerFields, CustomerRepository, CustomerRow, NewAddressRow, NewPhoneRow,
    PhoneRow,
};

const ADAPTER_ID: &str = "postgres-customer-store";

/// PostgreSQL-backed implementation of the CustomerStore trait
///
/// # Health Checking
///
/// `health_check` runs `SELECT 1` through the pool and reports its latency.
#[derive(Debug, Clone)]
pub struct PostgresCustomerStore {
    repository: CustomerRepository,
}

impl PostgresCustomerStore {
    /// Creates a new PostgreSQL customer store
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CustomerRepository::new(pool),
        }
    }

    /// Returns a reference to the underlying repository
    pub fn repository(&self) -> &CustomerRepository {
        &self.repository
    }

    async fn load_children(&self, rows: Vec<CustomerRow>) -> Result<Vec<Customer>, PortError> {
        let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
        let phones = self.repository.phones_for(&ids).await?;
        let addresses = self.repository.addresses_for(&ids).await?;

        let mut phones_by_owner: HashMap<i32, Vec<Phone>> = HashMap::new();
        for phone in phones {
            phones_by_owner
                .entry(phone.customer_id)
                .or_default()
                .push(Phone::from(phone));
        }
        let mut addresses_by_owner: HashMap<i32, Vec<Address>> = HashMap::new();
        for address in addresses {
            addresses_by_owner
                .entry(address.customer_id)
                .or_default()
                .push(Address::from(address));
        }

        rows.into_iter()
            .map(|row| {
                let id = row.id;
                let mut customer = Customer::try_from(row)?;
                customer.phones = phones_by_owner.remove(&id).unwrap_or_default();
                customer.addresses = addresses_by_owner.remove(&id).unwrap_or_default();
                Ok(customer)
            })
            .collect()
    }
}

impl DomainPort for PostgresCustomerStore {}

#[async_trait]
impl HealthCheckable for PostgresCustomerStore {
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();
        let result = self.repository.ping().await;
        let latency_ms = start.elapsed().as_millis() as u64;

        let (status, message) = match result {
            Ok(()) => (AdapterHealth::Healthy, None),
            Err(e) => (AdapterHealth::Unhealthy, Some(format!("Database error: {}", e))),
        };

        HealthCheckResult {
            adapter_id: ADAPTER_ID.to_string(),
            status,
            latency_ms,
            message,
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl CustomerStore for PostgresCustomerStore {
    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<Customer>, PortError> {
        debug!("Listing all customers");
        let rows = self.repository.list_customers().await?;
        self.load_children(rows).await
    }

    #[instrument(skip(self), fields(customer_id = %id))]
    async fn get_by_id(&self, id: CustomerId) -> Result<Option<Customer>, PortError> {
        debug!("Fetching customer by ID");
        match self.repository.get_customer(id.value()).await? {
            Some(row) => Ok(self.load_children(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    #[instrument(skip(self, customer), fields(document_number = customer.document_number))]
    async fn insert_customer(&self, customer: NewCustomer) -> Result<CustomerId, PortError> {
        let id = self
            .repository
            .insert_customer(&CustomerFields::from(customer))
            .await?;

        info!(customer_id = id, "Customer row inserted");
        Ok(CustomerId::new(id))
    }

    #[instrument(skip(self, phones), fields(count = phones.len()))]
    async fn insert_phones(&self, phones: Vec<NewPhone>) -> Result<(), PortError> {
        let rows: Vec<NewPhoneRow> = phones.into_iter().map(NewPhoneRow::from).collect();
        self.repository.insert_phones(&rows).await?;
        Ok(())
    }

    #[instrument(skip(self, addresses), fields(count = addresses.len()))]
    async fn insert_addresses(&self, addresses: Vec<NewAddress>) -> Result<(), PortError> {
        let rows: Vec<NewAddressRow> = addresses.into_iter().map(NewAddressRow::from).collect();
        self.repository.insert_addresses(&rows).await?;
        Ok(())
    }

    #[instrument(skip(self, phones, addresses), fields(customer_id = %customer_id))]
    async fn replace_children(
        &self,
        customer_id: CustomerId,
        phones: Vec<NewPhone>,
        addresses: Vec<NewAddress>,
    ) -> Result<(), PortError> {
        let phones: Vec<NewPhoneRow> = phones.into_iter().map(NewPhoneRow::from).collect();
        let addresses: Vec<NewAddressRow> = addresses.into_iter().map(NewAddressRow::from).collect();

        self.repository
            .replace_children(customer_id.value(), &phones, &addresses)
            .await?;
        debug!(phones = phones.len(), addresses = addresses.len(), "Children replaced");
        Ok(())
    }

    #[instrument(skip(self, customer), fields(customer_id = %customer.id))]
    async fn update(&self, customer: &Customer) -> Result<(), PortError> {
        self.repository
            .update_customer(customer.id.value(), &CustomerFields::from(customer))
            .await
            .map_err(|e| match e {
                DatabaseError::NotFound(_) => PortError::not_found("Customer", customer.id),
                other => PortError::from(other),
            })
    }

    #[instrument(skip(self, customer), fields(customer_id = %customer.id))]
    async fn delete(&self, customer: &Customer) -> Result<(), PortError> {
        self.repository
            .delete_customer(customer.id.value())
            .await
            .map_err(|e| match e {
                DatabaseError::NotFound(_) => PortError::not_found("Customer", customer.id),
                other => PortError::from(other),
            })
    }
}

// ============================================================================
// Row conversions
// ============================================================================

impl TryFrom<CustomerRow> for Customer {
    type Error = PortError;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        let document_type: DocumentType = row.document_type.parse().map_err(|_| {
            PortError::transformation(format!(
                "customer {} has unknown document type '{}'",
                row.id, row.document_type
            ))
        })?;

        Ok(Customer {
            id: CustomerId::new(row.id),
            document_type,
            document_number: row.document_number,
            given_names: row.given_names,
            first_surname: row.first_surname,
            second_surname: row.second_surname,
            gender: row.gender,
            birth_date: row.birth_date,
            email: row.email,
            phones: Vec::new(),
            addresses: Vec::new(),
        })
    }
}

impl From<PhoneRow> for Phone {
    fn from(row: PhoneRow) -> Self {
        Phone {
            id: PhoneId::new(row.id),
            customer_id: CustomerId::new(row.customer_id),
            number: row.number,
            phone_type: row.phone_type,
        }
    }
}

impl From<AddressRow> for Address {
    fn from(row: AddressRow) -> Self {
        Address {
            id: AddressId::new(row.id),
            customer_id: CustomerId::new(row.customer_id),
            description: row.description,
        }
    }
}

impl From<NewCustomer> for CustomerFields {
    fn from(customer: NewCustomer) -> Self {
        CustomerFields {
            document_type: customer.document_type.code().to_string(),
            document_number: customer.document_number,
            given_names: customer.given_names,
            first_surname: customer.first_surname,
            second_surname: customer.second_surname,
            gender: customer.gender,
            birth_date: customer.birth_date,
            email: customer.email,
        }
    }
}

impl From<&Customer> for CustomerFields {
    fn from(customer: &Customer) -> Self {
        CustomerFields {
            document_type: customer.document_type.code().to_string(),
            document_number: customer.document_number,
            given_names: customer.given_names.clone(),
            first_surname: customer.first_surname.clone(),
            second_surname: customer.second_surname.clone(),
            gender: customer.gender.clone(),
            birth_date: customer.birth_date,
            email: customer.email.clone(),
        }
    }
}

impl From<NewPhone> for NewPhoneRow {
    fn from(phone: NewPhone) -> Self {
        NewPhoneRow {
            customer_id: phone.customer_id.value(),
            number: phone.number,
            phone_type: phone.phone_type,
        }
    }
}

impl From<NewAddress> for NewAddressRow {
    fn from(address: NewAddress) -> Self {
        NewAddressRow {
            customer_id: address.customer_id.value(),
            description: address.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(document_type: &str) -> CustomerRow {
        CustomerRow {
            id: 3,
            document_type: document_type.to_string(),
            document_number: 1_128_400_500,
            given_names: "Daniela".to_string(),
            first_surname: "Vélez".to_string(),
            second_surname: None,
            gender: "F".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2012, 8, 9).unwrap(),
            email: "daniela@example.com".to_string(),
        }
    }

    #[test]
    fn test_customer_row_conversion() {
        let customer = Customer::try_from(row("TI")).unwrap();

        assert_eq!(customer.id, CustomerId::new(3));
        assert_eq!(customer.document_type, DocumentType::IdentityCard);
        assert!(customer.phones.is_empty());
    }

    #[test]
    fn test_unknown_document_type_is_transformation_error() {
        let err = Customer::try_from(row("XX")).unwrap_err();
        assert!(matches!(err, PortError::Transformation { .. }));
    }

    #[test]
    fn test_fields_store_document_code() {
        let customer = Customer::try_from(row("TI")).unwrap();
        let fields = CustomerFields::from(&customer);

        assert_eq!(fields.document_type, "TI");
        assert_eq!(fields.document_number, 1_128_400_500);
    }

    #[test]
    fn test_new_phone_row_keeps_parent() {
        let row = NewPhoneRow::from(NewPhone {
            customer_id: CustomerId::new(12),
            number: "3205556677".to_string(),
            phone_type: "mobile".to_string(),
        });

        assert_eq!(row.customer_id, 12);
        assert_eq!(row.phone_type, "mobile");
    }
}
