//! Well-known role name constants.
//!
//! These must match the seed data in `20261001000002_create_users.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_FOUNDER: &str = "founder";
pub const ROLE_INVESTOR: &str = "investor";

/// Roles a user may pick at signup. Admins are provisioned out of band.
pub const SELF_SERVICE_ROLES: &[&str] = &[ROLE_FOUNDER, ROLE_INVESTOR];

/// Check whether a role may be chosen at signup.
pub fn is_self_service_role(role: &str) -> bool {
    SELF_SERVICE_ROLES.contains(&role)
}
