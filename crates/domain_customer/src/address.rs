//! Address types

use serde::{Deserialize, Serialize};

use core_kernel::{AddressId, CustomerId};

/// A stored address owned by a customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub id: AddressId,
    /// Owning customer; write-side context only
    pub customer_id: CustomerId,
    /// Free-text postal description
    pub description: String,
}

/// An address ready to insert, already stamped with its parent id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAddress {
    pub customer_id: CustomerId,
    pub description: String,
}
