//! Domain logic for the ratewise store-rating platform.
//!
//! Everything in this crate is transport- and storage-independent: role
//! definitions, the authorization predicate, rating aggregation, input
//! validation, and shared types. The API and repository layers build on
//! these without pulling HTTP or SQL concerns down here.

pub mod authorize;
pub mod error;
pub mod pagination;
pub mod rating;
pub mod roles;
pub mod types;
pub mod validate;
