//! Customer engine
//!
//! Orchestrates validation, uniqueness checks and store writes for the
//! register, update and delete operations, and runs the in-memory searches
//! over the full customer list.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use core_kernel::{Clock, CustomerId, DateRange, PortError, SystemClock};
use crate::customer::{Customer, CustomerCandidate};
use crate::error::CustomerError;
use crate::ports::{CustomerStore, CustomerStoreExt};
use crate::reports::{FirstAddressSummary, PhoneCountSummary};
use crate::validation::CustomerValidator;

/// Service for customer persistence and queries
///
/// Holds no mutable state; cloning shares the same store and clock.
#[derive(Clone)]
pub struct CustomerService {
    store: Arc<dyn CustomerStore>,
    clock: Arc<dyn Clock>,
}

impl CustomerService {
    /// Creates a service over the given store using the system clock
    pub fn new(store: Arc<dyn CustomerStore>) -> Self {
        Self {
            store,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replaces the clock used to compute ages
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Returns the underlying store
    pub fn store(&self) -> &Arc<dyn CustomerStore> {
        &self.store
    }

    /// Registers a new customer with its phones and addresses
    ///
    /// This method:
    /// 1. Validates the candidate
    /// 2. Rejects a document number already held by any customer
    /// 3. Inserts the customer row
    /// 4. Inserts the phones, then the addresses, stamped with the new id
    /// 5. Re-reads the stored customer
    ///
    /// # Errors
    ///
    /// `ValidationFailed` and `DuplicateDocumentNumber` are raised before any
    /// write. A `PersistenceFailed` raised by step 4 leaves the customer row
    /// from step 3 in place without children.
    #[instrument(skip(self, candidate), fields(document_number = candidate.document_number))]
    pub async fn register(&self, candidate: CustomerCandidate) -> Result<Customer, CustomerError> {
        let document_type = CustomerValidator::validate(&candidate, self.clock.today())
            .inspect_err(|failure| warn!(reason = failure.kind(), "Rejected customer registration"))?;

        if self
            .store
            .document_number_taken(candidate.document_number, None)
            .await?
        {
            warn!("Rejected customer registration: duplicate document number");
            return Err(CustomerError::DuplicateDocumentNumber(candidate.document_number));
        }

        let id = self
            .store
            .insert_customer(candidate.to_new_customer(document_type))
            .await
            .map_err(|e| duplicate_or_persistence(e, candidate.document_number))?;

        if let Err(e) = self.store.insert_phones(candidate.stamped_phones(id)).await {
            warn!(customer_id = %id, error = %e, "Phone insert failed, customer row left without children");
            return Err(CustomerError::persistence(e));
        }
        if let Err(e) = self.store.insert_addresses(candidate.stamped_addresses(id)).await {
            warn!(customer_id = %id, error = %e, "Address insert failed, customer row left without addresses");
            return Err(CustomerError::persistence(e));
        }

        let customer = self.reload(id).await?;
        info!(customer_id = %id, "Customer registered");
        Ok(customer)
    }

    /// Replaces every field and both child collections of a customer
    ///
    /// The customer's own document number does not count as a duplicate.
    /// Children receive fresh ids.
    #[instrument(skip(self, candidate), fields(customer_id = %id))]
    pub async fn update(
        &self,
        id: CustomerId,
        candidate: CustomerCandidate,
    ) -> Result<Customer, CustomerError> {
        let mut customer = self
            .store
            .get_by_id(id)
            .await?
            .ok_or(CustomerError::NotFound(id))?;

        let document_type = CustomerValidator::validate(&candidate, self.clock.today())
            .inspect_err(|failure| warn!(reason = failure.kind(), "Rejected customer update"))?;

        if self
            .store
            .document_number_taken(candidate.document_number, Some(id))
            .await?
        {
            warn!("Rejected customer update: duplicate document number");
            return Err(CustomerError::DuplicateDocumentNumber(candidate.document_number));
        }

        customer.apply(&candidate, document_type);
        self.store.update(&customer).await.map_err(|e| match e {
            PortError::NotFound { .. } => CustomerError::NotFound(id),
            other => duplicate_or_persistence(other, candidate.document_number),
        })?;

        self.store
            .replace_children(id, candidate.stamped_phones(id), candidate.stamped_addresses(id))
            .await?;

        let customer = self.reload(id).await?;
        info!("Customer updated");
        Ok(customer)
    }

    /// Deletes a customer and, through the store, its phones and addresses
    ///
    /// # Returns
    ///
    /// The customer as it was loaded before deletion
    #[instrument(skip(self), fields(customer_id = %id))]
    pub async fn delete(&self, id: CustomerId) -> Result<Customer, CustomerError> {
        let customer = self
            .store
            .get_by_id(id)
            .await?
            .ok_or(CustomerError::NotFound(id))?;

        self.store.delete(&customer).await.map_err(|e| match e {
            PortError::NotFound { .. } => CustomerError::NotFound(id),
            other => CustomerError::persistence(other),
        })?;

        info!("Customer deleted");
        Ok(customer)
    }

    /// Retrieves a single customer
    #[instrument(skip(self), fields(customer_id = %id))]
    pub async fn get(&self, id: CustomerId) -> Result<Customer, CustomerError> {
        debug!("Fetching customer");
        self.store
            .get_by_id(id)
            .await?
            .ok_or(CustomerError::NotFound(id))
    }

    /// Returns every customer, unfiltered
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Customer>, CustomerError> {
        let customers = self.store.list_all().await?;
        debug!(count = customers.len(), "Listed customers");
        Ok(customers)
    }

    /// Searches by given names and document number fragment
    ///
    /// # Arguments
    ///
    /// * `name` - Case-insensitive substring of the given names
    /// * `document_fragment` - Substring of the decimal document number
    ///
    /// Both filters must match when present. Blank filters are ignored.
    ///
    /// # Returns
    ///
    /// Matches sorted by upper-cased full name, possibly empty
    #[instrument(skip(self))]
    pub async fn search(
        &self,
        name: Option<&str>,
        document_fragment: Option<&str>,
    ) -> Result<Vec<Customer>, CustomerError> {
        let name = non_blank(name).map(str::to_lowercase);
        let fragment = non_blank(document_fragment);

        let mut matches: Vec<Customer> = self
            .store
            .list_all()
            .await?
            .into_iter()
            .filter(|c| {
                name.as_deref()
                    .map_or(true, |n| c.given_names.to_lowercase().contains(n))
            })
            .filter(|c| fragment.map_or(true, |f| c.document_number_text().contains(f)))
            .collect();

        matches.sort_by_cached_key(Customer::name_sort_key);
        debug!(count = matches.len(), "Search completed");
        Ok(matches)
    }

    /// Customers whose document number contains the fragment, highest number first
    #[instrument(skip(self))]
    pub async fn search_by_document_fragment(
        &self,
        fragment: &str,
    ) -> Result<Vec<Customer>, CustomerError> {
        let mut matches: Vec<Customer> = self
            .store
            .list_all()
            .await?
            .into_iter()
            .filter(|c| c.document_number_text().contains(fragment))
            .collect();

        matches.sort_by(|a, b| b.document_number.cmp(&a.document_number));
        Ok(matches)
    }

    /// Customers born inside the inclusive range, oldest first
    ///
    /// Ties on birth date are ordered by given names.
    #[instrument(skip(self), fields(start = %range.start, end = %range.end))]
    pub async fn search_by_birth_date_range(
        &self,
        range: DateRange,
    ) -> Result<Vec<Customer>, CustomerError> {
        let mut matches: Vec<Customer> = self
            .store
            .list_all()
            .await?
            .into_iter()
            .filter(|c| range.contains(c.birth_date))
            .collect();

        matches.sort_by(|a, b| {
            a.birth_date
                .cmp(&b.birth_date)
                .then_with(|| a.given_names.cmp(&b.given_names))
        });
        Ok(matches)
    }

    /// Customers with more than one phone
    #[instrument(skip(self))]
    pub async fn customers_with_multiple_phones(
        &self,
    ) -> Result<Vec<PhoneCountSummary>, CustomerError> {
        let customers = self.store.list_all().await?;
        Ok(customers
            .iter()
            .filter(|c| c.phones.len() > 1)
            .map(PhoneCountSummary::from)
            .collect())
    }

    /// Customers with more than one address, with their first address
    #[instrument(skip(self))]
    pub async fn customers_with_multiple_addresses(
        &self,
    ) -> Result<Vec<FirstAddressSummary>, CustomerError> {
        let customers = self.store.list_all().await?;
        Ok(customers
            .iter()
            .filter(|c| c.addresses.len() > 1)
            .map(FirstAddressSummary::from)
            .collect())
    }

    async fn reload(&self, id: CustomerId) -> Result<Customer, CustomerError> {
        self.store
            .get_by_id(id)
            .await?
            .ok_or_else(|| CustomerError::persistence(PortError::not_found("Customer", id)))
    }
}

fn non_blank(filter: Option<&str>) -> Option<&str> {
    filter.filter(|f| !f.trim().is_empty())
}

fn duplicate_or_persistence(error: PortError, document_number: i64) -> CustomerError {
    if error.is_conflict() {
        warn!(document_number, "Store rejected duplicate document number");
        CustomerError::DuplicateDocumentNumber(document_number)
    } else {
        CustomerError::persistence(error)
    }
}
