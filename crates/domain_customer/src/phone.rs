//! Phone types

use serde::{Deserialize, Serialize};

use core_kernel::{CustomerId, PhoneId};

/// A stored phone owned by a customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phone {
    pub id: PhoneId,
    /// Owning customer; write-side context only
    pub customer_id: CustomerId,
    pub number: String,
    /// Free-form kind, e.g. "mobile" or "home"
    pub phone_type: String,
}

/// A phone ready to insert, already stamped with its parent id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPhone {
    pub customer_id: CustomerId,
    pub number: String,
    pub phone_type: String,
}
