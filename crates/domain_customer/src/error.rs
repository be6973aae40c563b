//! Customer domain errors
//!
//! Validation and uniqueness failures are raised before any write. A
//! `PersistenceFailed` may be raised after the customer row was written,
//! see `CustomerService::register`.

use thiserror::Error;

use core_kernel::{CustomerId, PortError};

/// Reason a candidate customer was rejected by the validation rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("The customer must have at least one phone")]
    MissingPhone,

    #[error("The customer must have at least one address")]
    MissingAddress,

    #[error("The document type does not match the customer's age")]
    InvalidDocumentTypeForAge,

    #[error("The email format is not valid")]
    InvalidEmailFormat,
}

impl ValidationFailure {
    /// Stable machine-readable name of the failure
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationFailure::MissingPhone => "MissingPhone",
            ValidationFailure::MissingAddress => "MissingAddress",
            ValidationFailure::InvalidDocumentTypeForAge => "InvalidDocumentTypeForAge",
            ValidationFailure::InvalidEmailFormat => "InvalidEmailFormat",
        }
    }
}

/// Errors that can occur in the customer engine
#[derive(Debug, Error)]
pub enum CustomerError {
    /// The candidate broke a validation rule
    #[error("{0}")]
    ValidationFailed(ValidationFailure),

    /// Another customer already holds the document number
    #[error("A customer with document number {0} already exists")]
    DuplicateDocumentNumber(i64),

    /// No customer has the given id
    #[error("Customer not found: {0}")]
    NotFound(CustomerId),

    /// The store failed while reading or writing
    #[error("Persistence failed: {0}")]
    PersistenceFailed(#[source] PortError),
}

impl CustomerError {
    /// Creates a NotFound error
    pub fn not_found(id: CustomerId) -> Self {
        CustomerError::NotFound(id)
    }

    /// Wraps a store error
    pub fn persistence(error: PortError) -> Self {
        CustomerError::PersistenceFailed(error)
    }

    /// Returns true for failures caused by the caller's input
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            CustomerError::ValidationFailed(_) | CustomerError::DuplicateDocumentNumber(_)
        )
    }
}

impl From<ValidationFailure> for CustomerError {
    fn from(failure: ValidationFailure) -> Self {
        CustomerError::ValidationFailed(failure)
    }
}

impl From<PortError> for CustomerError {
    fn from(error: PortError) -> Self {
        CustomerError::PersistenceFailed(error)
    }
}
