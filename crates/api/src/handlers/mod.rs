pub mod admin;
pub mod auth;
pub mod blog;
pub mod campaign;
pub mod nft;
pub mod profile;
pub mod startup;
