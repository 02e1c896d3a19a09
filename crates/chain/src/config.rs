use std::time::Duration;

/// Default JSON-RPC method used to mint a certificate.
pub const DEFAULT_MINT_METHOD: &str = "nft_mintInvestmentCertificate";

/// Default request timeout for chain calls, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Chain RPC settings.
#[derive(Debug, Clone)]
pub struct ChainConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,
    /// Method name invoked for minting.
    pub mint_method: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ChainConfig {
    /// Load chain settings from environment variables.
    ///
    /// Returns `None` when `CHAIN_RPC_URL` is unset or blank, which disables
    /// minting.
    ///
    /// | Env Var                  | Default                           |
    /// |--------------------------|-----------------------------------|
    /// | `CHAIN_RPC_URL`          | unset                             |
    /// | `CHAIN_MINT_METHOD`      | `nft_mintInvestmentCertificate`   |
    /// | `CHAIN_RPC_TIMEOUT_SECS` | `15`                              |
    pub fn from_env() -> Option<Self> {
        let rpc_url = std::env::var("CHAIN_RPC_URL")
            .ok()
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())?;

        let mint_method = std::env::var("CHAIN_MINT_METHOD")
            .unwrap_or_else(|_| DEFAULT_MINT_METHOD.into());

        let timeout_secs: u64 = std::env::var("CHAIN_RPC_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("CHAIN_RPC_TIMEOUT_SECS must be a valid u64");

        Some(Self {
            rpc_url,
            mint_method,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
