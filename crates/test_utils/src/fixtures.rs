//! Pre-built Test Fixtures
//!
//! Provides ready-to-use candidates and dates. Every age-dependent fixture is
//! relative to `REFERENCE_DATE`, so pair them with `CustomerFixtures::clock()`.

use std::sync::Arc;

use chrono::NaiveDate;
use fake::faker::address::en::StreetName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::CellNumber;
use fake::Fake;
use once_cell::sync::Lazy;

use core_kernel::{Clock, FixedClock};
use domain_customer::customer::{AddressInput, CustomerCandidate, PhoneInput};

/// The "today" every fixture is computed against
pub static REFERENCE_DATE: Lazy<NaiveDate> =
    Lazy::new(|| NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());

/// Fixture for customer test data
pub struct CustomerFixtures;

impl CustomerFixtures {
    /// Clock pinned to `REFERENCE_DATE`
    pub fn clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock(*REFERENCE_DATE))
    }

    /// Birth date of a 34 year old
    pub fn adult_birth_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(1990, 3, 15).unwrap()
    }

    /// Birth date of a 13 year old
    pub fn minor_birth_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2011, 1, 20).unwrap()
    }

    /// Birth date of a 4 year old
    pub fn child_birth_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 5, 5).unwrap()
    }

    /// A valid `CC` candidate with one phone and one address
    pub fn adult_candidate() -> CustomerCandidate {
        CustomerCandidate {
            document_type: "CC".to_string(),
            document_number: 1_036_600_123,
            given_names: "Ana María".to_string(),
            first_surname: "Restrepo".to_string(),
            second_surname: Some("Gómez".to_string()),
            gender: "F".to_string(),
            birth_date: Self::adult_birth_date(),
            email: "ana.restrepo@example.com".to_string(),
            phones: vec![PhoneInput::new("3001234567", "mobile")],
            addresses: vec![AddressInput::new("Calle 10 # 43-12, Medellín")],
        }
    }

    /// A valid `TI` candidate
    pub fn minor_candidate() -> CustomerCandidate {
        CustomerCandidate {
            document_type: "TI".to_string(),
            document_number: 1_011_200_300,
            given_names: "Tomás".to_string(),
            first_surname: "Quintero".to_string(),
            second_surname: None,
            gender: "M".to_string(),
            birth_date: Self::minor_birth_date(),
            email: "tomas.quintero@example.com".to_string(),
            phones: vec![PhoneInput::new("6043334455", "home")],
            addresses: vec![AddressInput::new("Carrera 80 # 30-15, Medellín")],
        }
    }

    /// A valid `RC` candidate
    pub fn child_candidate() -> CustomerCandidate {
        CustomerCandidate {
            document_type: "RC".to_string(),
            document_number: 1_099_000_777,
            given_names: "Sara".to_string(),
            first_surname: "Londoño".to_string(),
            second_surname: Some("Ríos".to_string()),
            gender: "F".to_string(),
            birth_date: Self::child_birth_date(),
            email: "familia.londono@example.com".to_string(),
            phones: vec![PhoneInput::new("3119876543", "mobile")],
            addresses: vec![AddressInput::new("Transversal 39 # 72-10, Medellín")],
        }
    }

    /// A valid adult candidate with random names and contact data
    pub fn random_adult_candidate() -> CustomerCandidate {
        let document_number: i64 = (10_000_000i64..9_999_999_999).fake();
        let street: String = StreetName().fake();

        CustomerCandidate {
            document_type: "CC".to_string(),
            document_number,
            given_names: FirstName().fake(),
            first_surname: LastName().fake(),
            second_surname: Some(LastName().fake()),
            gender: "X".to_string(),
            birth_date: Self::adult_birth_date(),
            email: SafeEmail().fake(),
            phones: vec![PhoneInput::new(CellNumber().fake::<String>(), "mobile")],
            addresses: vec![AddressInput::new(format!("{} 12", street))],
        }
    }
}
