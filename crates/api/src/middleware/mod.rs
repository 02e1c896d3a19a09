//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Resolves the caller from the `user_id` header.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` role.
//! - [`rbac::RequireFounder`] -- Requires the `founder` role.
//! - [`rbac::RequireInvestor`] -- Requires the `investor` role.

pub mod auth;
pub mod rbac;
