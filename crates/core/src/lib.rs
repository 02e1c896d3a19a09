//! Domain rules for the RaiseHub marketplace.
//!
//! This crate has no I/O. Everything here is shared by the repository and
//! API layers: role names, status constants, validation, milestone merging
//! and fund allocation, and funding arithmetic.

pub mod blog;
pub mod campaign;
pub mod error;
pub mod funding;
pub mod milestone;
pub mod profile;
pub mod roles;
pub mod search;
pub mod startup;
pub mod types;
