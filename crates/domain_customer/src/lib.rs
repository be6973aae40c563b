//! Customer Management Domain
//!
//! This crate manages customer master records together with the phones and
//! addresses each customer owns exclusively.
//!
//! # Customer Model
//!
//! - **Customer**: identity document, names, gender, birth date and email
//! - **Phone**: number and free-form type, owned by one customer
//! - **Address**: free-text description, owned by one customer
//!
//! Register and update always carry the complete child sets; an update
//! discards the stored phones and addresses and recreates them.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use chrono::NaiveDate;
//! use core_kernel::FixedClock;
//! use domain_customer::{CustomerService, InMemoryCustomerStore};
//! use domain_customer::customer::{AddressInput, CustomerCandidate, PhoneInput};
//!
//! let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! runtime.block_on(async {
//!     let service = CustomerService::new(Arc::new(InMemoryCustomerStore::new()))
//!         .with_clock(Arc::new(FixedClock(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())));
//!
//!     let customer = service
//!         .register(CustomerCandidate {
//!             document_type: "CC".to_string(),
//!             document_number: 43_567_890,
//!             given_names: "Luz Elena".to_string(),
//!             first_surname: "Ospina".to_string(),
//!             second_surname: Some("Gil".to_string()),
//!             gender: "F".to_string(),
//!             birth_date: NaiveDate::from_ymd_opt(1975, 11, 2).unwrap(),
//!             email: "luz.ospina@example.com".to_string(),
//!             phones: vec![PhoneInput::new("6044441234", "home")],
//!             addresses: vec![AddressInput::new("Calle 33 # 65-20, Medellín")],
//!         })
//!         .await
//!         .unwrap();
//!
//!     assert_eq!(customer.full_name(), "Luz Elena Ospina Gil");
//! });
//! ```

pub mod customer;
pub mod phone;
pub mod address;
pub mod error;
pub mod validation;
pub mod ports;
pub mod service;
pub mod reports;

pub use customer::{Customer, CustomerCandidate, DocumentType, NewCustomer, PhoneInput, AddressInput};
pub use phone::{Phone, NewPhone};
pub use address::{Address, NewAddress};
pub use error::{CustomerError, ValidationFailure};
pub use validation::CustomerValidator;
pub use ports::{CustomerStore, CustomerStoreExt};
pub use ports::memory::InMemoryCustomerStore;
pub use service::CustomerService;
pub use reports::{PhoneCountSummary, FirstAddressSummary};
