//! Repository implementations
//!
//! Repositories encapsulate SQL queries and map between database rows and
//! plain row types. Queries use the SQLx runtime API, so building the
//! crate needs no live database.

pub mod claims;

pub use claims::ClaimsRepository;
