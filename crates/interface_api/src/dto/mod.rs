//! Request and response bodies
//!
//! Field names on the wire are the Spanish names clients already use.

pub mod customer;
