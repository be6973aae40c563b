//! Test Data Builders
//!
//! Provides a builder for customer candidates with valid defaults, so tests
//! only spell out the fields they care about.

use chrono::NaiveDate;

use domain_customer::customer::{AddressInput, CustomerCandidate, PhoneInput};

use crate::fixtures::CustomerFixtures;

/// Builder for constructing customer candidates
///
/// Starts from `CustomerFixtures::adult_candidate()`.
pub struct CandidateBuilder {
    candidate: CustomerCandidate,
}

impl Default for CandidateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CandidateBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            candidate: CustomerFixtures::adult_candidate(),
        }
    }

    /// Sets the document type code
    pub fn with_document_type(mut self, code: impl Into<String>) -> Self {
        self.candidate.document_type = code.into();
        self
    }

    /// Sets the document number
    pub fn with_document_number(mut self, number: i64) -> Self {
        self.candidate.document_number = number;
        self
    }

    /// Sets the given names
    pub fn with_given_names(mut self, names: impl Into<String>) -> Self {
        self.candidate.given_names = names.into();
        self
    }

    /// Sets both surnames
    pub fn with_surnames(mut self, first: impl Into<String>, second: Option<&str>) -> Self {
        self.candidate.first_surname = first.into();
        self.candidate.second_surname = second.map(str::to_string);
        self
    }

    /// Sets the birth date
    pub fn with_birth_date(mut self, date: NaiveDate) -> Self {
        self.candidate.birth_date = date;
        self
    }

    /// Sets the email
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.candidate.email = email.into();
        self
    }

    /// Replaces the phone list with the given numbers, all of type "mobile"
    pub fn with_phones(mut self, numbers: &[&str]) -> Self {
        self.candidate.phones = numbers.iter().map(|n| PhoneInput::new(*n, "mobile")).collect();
        self
    }

    /// Replaces the address list
    pub fn with_addresses(mut self, descriptions: &[&str]) -> Self {
        self.candidate.addresses = descriptions.iter().map(|d| AddressInput::new(*d)).collect();
        self
    }

    /// Removes every phone
    pub fn without_phones(mut self) -> Self {
        self.candidate.phones.clear();
        self
    }

    /// Removes every address
    pub fn without_addresses(mut self) -> Self {
        self.candidate.addresses.clear();
        self
    }

    /// Builds the candidate
    pub fn build(self) -> CustomerCandidate {
        self.candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_are_valid_adult() {
        let candidate = CandidateBuilder::new().build();
        assert_eq!(candidate.document_type, "CC");
        assert_eq!(candidate.phones.len(), 1);
        assert_eq!(candidate.addresses.len(), 1);
    }

    #[test]
    fn test_builder_overrides() {
        let candidate = CandidateBuilder::new()
            .with_given_names("Juan")
            .with_surnames("Pérez", None)
            .with_phones(&["1", "2"])
            .without_addresses()
            .build();

        assert_eq!(candidate.given_names, "Juan");
        assert!(candidate.second_surname.is_none());
        assert_eq!(candidate.phones.len(), 2);
        assert!(candidate.addresses.is_empty());
    }
}
