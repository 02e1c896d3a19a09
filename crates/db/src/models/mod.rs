//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod blog;
pub mod campaign;
pub mod investment;
pub mod milestone;
pub mod nft;
pub mod profile;
pub mod startup;
pub mod stats;
pub mod user;
