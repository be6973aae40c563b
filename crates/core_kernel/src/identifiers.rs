//! Strongly-typed identifiers for domain entities
//!
//! Identifiers are assigned by the store (database sequences), so they wrap
//! plain integers. The newtypes keep a phone id from being passed where a
//! customer id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

macro_rules! define_id {
    ($name:ident, $label:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Wraps a store-assigned value
            pub const fn new(value: i32) -> Self {
                Self(value)
            }

            /// Returns the underlying integer
            pub const fn value(&self) -> i32 {
                self.0
            }

            /// Returns the entity label used in log and error messages
            pub fn label() -> &'static str {
                $label
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().parse()?))
            }
        }

        impl From<i32> for $name {
            fn from(value: i32) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> i32 {
                id.0
            }
        }
    };
}

define_id!(CustomerId, "Customer");
define_id!(PhoneId, "Phone");
define_id!(AddressId, "Address");
