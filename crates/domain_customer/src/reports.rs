//! Read-side projections over customers

use serde::{Deserialize, Serialize};

use crate::customer::Customer;

/// A customer's full name with the size of their phone list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneCountSummary {
    pub full_name: String,
    pub phone_count: usize,
}

impl From<&Customer> for PhoneCountSummary {
    fn from(customer: &Customer) -> Self {
        Self {
            full_name: customer.full_name(),
            phone_count: customer.phones.len(),
        }
    }
}

/// A customer's full name with the description of their first address
///
/// First means lowest store-assigned address id. `first_address` is empty
/// only if the customer has no address at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirstAddressSummary {
    pub full_name: String,
    pub first_address: String,
}

impl From<&Customer> for FirstAddressSummary {
    fn from(customer: &Customer) -> Self {
        Self {
            full_name: customer.full_name(),
            first_address: customer
                .first_address()
                .map(|a| a.description.clone())
                .unwrap_or_default(),
        }
    }
}
