//! Client for the chain endpoint that mints investment certificate NFTs.
//!
//! - [`config`] -- RPC endpoint settings loaded from the environment.
//! - [`minter`] -- the [`NftMinter`] seam and its request/receipt types.
//! - [`rpc`] -- JSON-RPC 2.0 implementation over HTTP.

pub mod config;
pub mod minter;
pub mod rpc;

pub use config::ChainConfig;
pub use minter::{CertificateMetadata, MintReceipt, MintRequest, NftMinter};
pub use rpc::{ChainError, ChainRpcClient};
