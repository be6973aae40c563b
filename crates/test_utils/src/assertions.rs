//! Custom Test Assertions
//!
//! Assertion helpers for customers and engine results with messages that
//! name the offending record.

use domain_customer::{Customer, CustomerError, ValidationFailure};

/// Asserts that every phone and address points back at its customer
pub fn assert_children_owned(customer: &Customer) {
    for phone in &customer.phones {
        assert_eq!(
            phone.customer_id, customer.id,
            "Phone {} belongs to {}, expected {}",
            phone.id, phone.customer_id, customer.id
        );
    }
    for address in &customer.addresses {
        assert_eq!(
            address.customer_id, customer.id,
            "Address {} belongs to {}, expected {}",
            address.id, address.customer_id, customer.id
        );
    }
}

/// Asserts that phones and addresses are in ascending id order
pub fn assert_children_ordered(customer: &Customer) {
    assert!(
        customer.phones.windows(2).all(|w| w[0].id < w[1].id),
        "Phones of customer {} are not ordered by id",
        customer.id
    );
    assert!(
        customer.addresses.windows(2).all(|w| w[0].id < w[1].id),
        "Addresses of customer {} are not ordered by id",
        customer.id
    );
}

/// Asserts that the customer satisfies the minimum-children invariant
pub fn assert_has_children(customer: &Customer) {
    assert!(!customer.phones.is_empty(), "Customer {} has no phone", customer.id);
    assert!(!customer.addresses.is_empty(), "Customer {} has no address", customer.id);
}

/// Asserts that a result failed with the given validation failure
///
/// # Panics
///
/// Panics if the result is `Ok` or carries any other error
pub fn assert_validation_failure<T: std::fmt::Debug>(
    result: Result<T, CustomerError>,
    expected: ValidationFailure,
) {
    match result {
        Err(CustomerError::ValidationFailed(failure)) => assert_eq!(
            failure, expected,
            "Expected validation failure {:?}, got {:?}",
            expected, failure
        ),
        other => panic!("Expected validation failure {:?}, got {:?}", expected, other),
    }
}

/// Asserts that customers are ordered by their upper-cased full name
pub fn assert_sorted_by_name(customers: &[Customer]) {
    let keys: Vec<String> = customers.iter().map(Customer::name_sort_key).collect();
    assert!(
        keys.windows(2).all(|w| w[0] <= w[1]),
        "Customers not sorted by name: {:?}",
        keys
    );
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use domain_customer::{CustomerService, InMemoryCustomerStore};

    use super::*;
    use crate::{CandidateBuilder, CustomerFixtures};

    fn service() -> CustomerService {
        CustomerService::new(Arc::new(InMemoryCustomerStore::new()))
            .with_clock(CustomerFixtures::clock())
    }

    #[tokio::test]
    async fn test_registered_customer_passes_structural_assertions() {
        let customer = service()
            .register(CandidateBuilder::new().with_phones(&["1", "2"]).build())
            .await
            .unwrap();

        assert_has_children(&customer);
        assert_children_owned(&customer);
        assert_children_ordered(&customer);
    }

    #[tokio::test]
    async fn test_assert_validation_failure_matches_reason() {
        let result = service()
            .register(CandidateBuilder::new().without_addresses().build())
            .await;

        assert_validation_failure(result, ValidationFailure::MissingAddress);
    }

    #[tokio::test]
    #[should_panic(expected = "Expected validation failure")]
    async fn test_assert_validation_failure_rejects_success() {
        let result = service().register(CandidateBuilder::new().build()).await;

        assert_validation_failure(result, ValidationFailure::MissingPhone);
    }
}
