//! Customer validation rules
//!
//! Stateless checks applied to a candidate before any write.
//!
//! # Validation Rules
//!
//! 1. Minimum children: at least one phone, then at least one address
//! 2. Document type by age:
//!    - `RC` up to 7 years old
//!    - `TI` from 8 to 17
//!    - `CC` from 18
//! 3. Email format: `^[^@\s]+@[^@\s]+\.[^@\s]+$`
//!
//! Rules run in that order and the first failure wins.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use core_kernel::age_on;
use crate::customer::{CustomerCandidate, DocumentType};
use crate::error::ValidationFailure;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
});

/// Validator for customer candidates
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use domain_customer::validation::CustomerValidator;
///
/// assert!(CustomerValidator::is_valid_email("a@b.co"));
/// assert!(!CustomerValidator::is_valid_email("a@b"));
///
/// let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// let birth = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
/// assert!(CustomerValidator::document_type_matches_age("RC", birth, today));
/// ```
pub struct CustomerValidator;

impl CustomerValidator {
    /// Runs every rule against the candidate
    ///
    /// # Arguments
    ///
    /// * `candidate` - The customer data to check
    /// * `today` - Reference date for the age computation
    ///
    /// # Returns
    ///
    /// The parsed document type when every rule passes, otherwise the
    /// first failure found.
    pub fn validate(
        candidate: &CustomerCandidate,
        today: NaiveDate,
    ) -> Result<DocumentType, ValidationFailure> {
        Self::check_minimum_children(candidate)?;
        let document_type = Self::check_document_type(candidate, today)?;
        Self::check_email(&candidate.email)?;
        Ok(document_type)
    }

    /// Phones are checked before addresses
    pub fn check_minimum_children(candidate: &CustomerCandidate) -> Result<(), ValidationFailure> {
        if candidate.phones.is_empty() {
            return Err(ValidationFailure::MissingPhone);
        }
        if candidate.addresses.is_empty() {
            return Err(ValidationFailure::MissingAddress);
        }
        Ok(())
    }

    fn check_document_type(
        candidate: &CustomerCandidate,
        today: NaiveDate,
    ) -> Result<DocumentType, ValidationFailure> {
        let age = age_on(candidate.birth_date, today);
        match candidate.document_type.parse::<DocumentType>() {
            Ok(document_type) if document_type == DocumentType::for_age(age) => Ok(document_type),
            _ => Err(ValidationFailure::InvalidDocumentTypeForAge),
        }
    }

    fn check_email(email: &str) -> Result<(), ValidationFailure> {
        if Self::is_valid_email(email) {
            Ok(())
        } else {
            Err(ValidationFailure::InvalidEmailFormat)
        }
    }

    /// Returns true if the code is the one accepted for the holder's age
    ///
    /// Unknown codes never match.
    pub fn document_type_matches_age(code: &str, birth_date: NaiveDate, today: NaiveDate) -> bool {
        let age = age_on(birth_date, today);
        code.parse::<DocumentType>()
            .map(|document_type| document_type == DocumentType::for_age(age))
            .unwrap_or(false)
    }

    /// Returns true if the email has a local part, a domain and a dot-suffix
    pub fn is_valid_email(email: &str) -> bool {
        EMAIL_RE.is_match(email)
    }
}
