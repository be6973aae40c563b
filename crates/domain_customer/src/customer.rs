//! Customer entity and the candidate record accepted by register/update
//!
//! A `Customer` is the persisted aggregate: scalar identity and contact
//! fields plus the phones and addresses it exclusively owns. A
//! `CustomerCandidate` is the unvalidated input of register/update; it never
//! carries ids, and its child lists are always the complete set.
//!
//! # Examples
//!
//! ```rust
//! use chrono::NaiveDate;
//! use domain_customer::customer::{CustomerCandidate, PhoneInput, AddressInput};
//!
//! let candidate = CustomerCandidate {
//!     document_type: "CC".to_string(),
//!     document_number: 1_020_304_050,
//!     given_names: "Ana María".to_string(),
//!     first_surname: "Restrepo".to_string(),
//!     second_surname: None,
//!     gender: "F".to_string(),
//!     birth_date: NaiveDate::from_ymd_opt(1990, 4, 12).unwrap(),
//!     email: "ana.restrepo@example.com".to_string(),
//!     phones: vec![PhoneInput::new("3001234567", "mobile")],
//!     addresses: vec![AddressInput::new("Calle 10 # 43-12, Medellín")],
//! };
//!
//! assert_eq!(candidate.phones.len(), 1);
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{CoreError, CustomerId};
use crate::address::{Address, NewAddress};
use crate::phone::{NewPhone, Phone};

/// Civil document category, gated by the holder's age
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    /// Registro civil, for children up to 7 years old
    #[serde(rename = "RC")]
    CivilRegistry,
    /// Tarjeta de identidad, for minors from 8 to 17
    #[serde(rename = "TI")]
    IdentityCard,
    /// Cédula de ciudadanía, for adults from 18
    #[serde(rename = "CC")]
    CitizenshipCard,
}

impl DocumentType {
    /// Returns the only document type accepted for a holder of `age` years
    pub fn for_age(age: i32) -> Self {
        match age {
            i32::MIN..=7 => DocumentType::CivilRegistry,
            8..=17 => DocumentType::IdentityCard,
            _ => DocumentType::CitizenshipCard,
        }
    }

    /// Returns the short code stored and exchanged on the wire
    pub fn code(&self) -> &'static str {
        match self {
            DocumentType::CivilRegistry => "RC",
            DocumentType::IdentityCard => "TI",
            DocumentType::CitizenshipCard => "CC",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for DocumentType {
    type Err = CoreError;

    /// Parses an exact, case-sensitive code
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RC" => Ok(DocumentType::CivilRegistry),
            "TI" => Ok(DocumentType::IdentityCard),
            "CC" => Ok(DocumentType::CitizenshipCard),
            other => Err(CoreError::validation(format!("Unknown document type: {}", other))),
        }
    }
}

/// A persisted customer with its phones and addresses loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Store-assigned identifier, immutable after creation
    pub id: CustomerId,
    pub document_type: DocumentType,
    /// Unique across all customers
    pub document_number: i64,
    pub given_names: String,
    pub first_surname: String,
    pub second_surname: Option<String>,
    pub gender: String,
    pub birth_date: NaiveDate,
    pub email: String,
    /// Owned phones, ascending by id
    pub phones: Vec<Phone>,
    /// Owned addresses, ascending by id
    pub addresses: Vec<Address>,
}

impl Customer {
    /// Returns `"{given} {first} {second}"`
    ///
    /// A missing second surname renders as an empty string, so the result
    /// keeps a trailing space in that case.
    pub fn full_name(&self) -> String {
        format!(
            "{} {} {}",
            self.given_names,
            self.first_surname,
            self.second_surname.as_deref().unwrap_or("")
        )
    }

    /// Key used to order name searches: the upper-cased full name
    pub fn name_sort_key(&self) -> String {
        self.full_name().to_uppercase()
    }

    /// Returns the document number as its decimal string
    pub fn document_number_text(&self) -> String {
        self.document_number.to_string()
    }

    /// Returns the address with the lowest store-assigned id
    pub fn first_address(&self) -> Option<&Address> {
        self.addresses.iter().min_by_key(|a| a.id)
    }

    /// Overwrites every scalar field with the candidate's values
    ///
    /// Children are left untouched; they are replaced through the store.
    pub fn apply(&mut self, candidate: &CustomerCandidate, document_type: DocumentType) {
        self.document_type = document_type;
        self.document_number = candidate.document_number;
        self.given_names = candidate.given_names.clone();
        self.first_surname = candidate.first_surname.clone();
        self.second_surname = candidate.second_surname.clone();
        self.gender = candidate.gender.clone();
        self.birth_date = candidate.birth_date;
        self.email = candidate.email.clone();
    }
}

/// Scalar fields of a customer that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub document_type: DocumentType,
    pub document_number: i64,
    pub given_names: String,
    pub first_surname: String,
    pub second_surname: Option<String>,
    pub gender: String,
    pub birth_date: NaiveDate,
    pub email: String,
}

/// A phone as submitted by a caller, without ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneInput {
    pub number: String,
    pub phone_type: String,
}

impl PhoneInput {
    pub fn new(number: impl Into<String>, phone_type: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            phone_type: phone_type.into(),
        }
    }

    /// Attaches the owning customer id
    pub fn stamp(&self, customer_id: CustomerId) -> NewPhone {
        NewPhone {
            customer_id,
            number: self.number.clone(),
            phone_type: self.phone_type.clone(),
        }
    }
}

/// An address as submitted by a caller, without ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressInput {
    pub description: String,
}

impl AddressInput {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }

    /// Attaches the owning customer id
    pub fn stamp(&self, customer_id: CustomerId) -> NewAddress {
        NewAddress {
            customer_id,
            description: self.description.clone(),
        }
    }
}

/// Unvalidated input of register and update
///
/// `document_type` stays a raw string so that an unrecognised code is
/// reported by the document-type rule like any other mismatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerCandidate {
    pub document_type: String,
    pub document_number: i64,
    pub given_names: String,
    pub first_surname: String,
    pub second_surname: Option<String>,
    pub gender: String,
    pub birth_date: NaiveDate,
    pub email: String,
    #[serde(default)]
    pub phones: Vec<PhoneInput>,
    #[serde(default)]
    pub addresses: Vec<AddressInput>,
}

impl CustomerCandidate {
    /// Builds the scalar row to insert, using an already validated type
    pub fn to_new_customer(&self, document_type: DocumentType) -> NewCustomer {
        NewCustomer {
            document_type,
            document_number: self.document_number,
            given_names: self.given_names.clone(),
            first_surname: self.first_surname.clone(),
            second_surname: self.second_surname.clone(),
            gender: self.gender.clone(),
            birth_date: self.birth_date,
            email: self.email.clone(),
        }
    }

    /// Stamps every phone with the owning customer id
    pub fn stamped_phones(&self, customer_id: CustomerId) -> Vec<NewPhone> {
        self.phones.iter().map(|p| p.stamp(customer_id)).collect()
    }

    /// Stamps every address with the owning customer id
    pub fn stamped_addresses(&self, customer_id: CustomerId) -> Vec<NewAddress> {
        self.addresses.iter().map(|a| a.stamp(customer_id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::AddressId;

    fn sample_customer(second_surname: Option<&str>) -> Customer {
        Customer {
            id: CustomerId::new(1),
            document_type: DocumentType::CitizenshipCard,
            document_number: 71_234_567,
            given_names: "Carlos".to_string(),
            first_surname: "Gómez".to_string(),
            second_surname: second_surname.map(str::to_string),
            gender: "M".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1980, 3, 3).unwrap(),
            email: "carlos@example.com".to_string(),
            phones: vec![],
            addresses: vec![],
        }
    }

    #[test]
    fn test_document_type_for_age_buckets() {
        assert_eq!(DocumentType::for_age(0), DocumentType::CivilRegistry);
        assert_eq!(DocumentType::for_age(7), DocumentType::CivilRegistry);
        assert_eq!(DocumentType::for_age(8), DocumentType::IdentityCard);
        assert_eq!(DocumentType::for_age(17), DocumentType::IdentityCard);
        assert_eq!(DocumentType::for_age(18), DocumentType::CitizenshipCard);
        assert_eq!(DocumentType::for_age(-2), DocumentType::CivilRegistry);
    }

    #[test]
    fn test_document_type_parse_is_case_sensitive() {
        assert_eq!("TI".parse::<DocumentType>().unwrap(), DocumentType::IdentityCard);
        assert!("cc".parse::<DocumentType>().is_err());
        assert!("PA".parse::<DocumentType>().is_err());
    }

    #[test]
    fn test_document_type_serializes_as_code() {
        let json = serde_json::to_string(&DocumentType::CitizenshipCard).unwrap();
        assert_eq!(json, "\"CC\"");
    }

    #[test]
    fn test_full_name_with_second_surname() {
        let customer = sample_customer(Some("Pérez"));
        assert_eq!(customer.full_name(), "Carlos Gómez Pérez");
    }

    #[test]
    fn test_full_name_keeps_trailing_space() {
        let customer = sample_customer(None);
        assert_eq!(customer.full_name(), "Carlos Gómez ");
    }

    #[test]
    fn test_first_address_is_lowest_id() {
        let mut customer = sample_customer(None);
        customer.addresses = vec![
            Address { id: AddressId::new(9), customer_id: customer.id, description: "later".into() },
            Address { id: AddressId::new(4), customer_id: customer.id, description: "first".into() },
        ];

        assert_eq!(customer.first_address().unwrap().description, "first");
    }
}
