//! Domain logic for the bestiary catalog.
//!
//! Everything in this crate is pure: no I/O, no database handles. The `db`
//! and `api` crates build on these types.

pub mod codec;
pub mod creature;
pub mod error;
pub mod export;
pub mod query;
pub mod random;
pub mod stats;
pub mod types;
