//! Row structs read from the store.
//!
//! Rows keep the stored representation (delimited list columns) and convert
//! into the decoded domain types from `bestiary_core`.

pub mod creature;
