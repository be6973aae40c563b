//! Property-Based Test Generators
//!
//! Provides proptest strategies for customer data that respect the
//! validation rules unless stated otherwise.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use domain_customer::customer::{AddressInput, CustomerCandidate, DocumentType, PhoneInput};

/// Strategy for any of the three document codes
pub fn document_code_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("RC"), Just("TI"), Just("CC")]
}

/// Strategy for birth dates between 0 and 100 years before `today`
pub fn birth_date_strategy(today: NaiveDate) -> impl Strategy<Value = NaiveDate> {
    (0i64..36_525).prop_map(move |days| today - Duration::days(days))
}

/// Strategy for emails accepted by the email rule
pub fn valid_email_strategy() -> impl Strategy<Value = String> {
    ("[a-z][a-z0-9._]{0,15}", "[a-z]{2,12}", "[a-z]{2,4}")
        .prop_map(|(local, domain, tld)| format!("{}@{}.{}", local, domain, tld))
}

/// Strategy for phone inputs
pub fn phone_strategy() -> impl Strategy<Value = PhoneInput> {
    ("[0-9]{7,10}", prop_oneof![Just("mobile"), Just("home"), Just("work")])
        .prop_map(|(number, kind)| PhoneInput::new(number, kind))
}

/// Strategy for address inputs
pub fn address_strategy() -> impl Strategy<Value = AddressInput> {
    "[A-Za-z]{4,10} [0-9]{1,3} # [0-9]{1,2}-[0-9]{1,2}"
        .prop_map(|description: String| AddressInput::new(description))
}

/// Strategy for candidates that pass every rule on `today`
///
/// The document code is derived from the generated birth date.
pub fn valid_candidate_strategy(today: NaiveDate) -> impl Strategy<Value = CustomerCandidate> {
    (
        1i64..9_999_999_999,
        "[A-Z][a-z]{2,10}",
        "[A-Z][a-z]{2,10}",
        proptest::option::of("[A-Z][a-z]{2,10}"),
        birth_date_strategy(today),
        valid_email_strategy(),
        proptest::collection::vec(phone_strategy(), 1..4),
        proptest::collection::vec(address_strategy(), 1..4),
    )
        .prop_map(
            move |(document_number, given, first, second, birth_date, email, phones, addresses)| {
                let age = core_kernel::age_on(birth_date, today);
                CustomerCandidate {
                    document_type: DocumentType::for_age(age).code().to_string(),
                    document_number,
                    given_names: given,
                    first_surname: first,
                    second_surname: second,
                    gender: "X".to_string(),
                    birth_date,
                    email,
                    phones,
                    addresses,
                }
            },
        )
}
