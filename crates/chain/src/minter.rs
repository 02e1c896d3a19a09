//! The minting seam used by the API layer.
//!
//! Handlers hold an `Arc<dyn NftMinter>` so tests can swap the RPC client
//! for an in-process fake.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

use crate::rpc::ChainError;

/// Certificate attributes embedded in the minted token.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CertificateMetadata {
    pub name: String,
    pub description: String,
    pub investment_id: i64,
    pub campaign_id: i64,
    pub campaign_title: String,
    pub startup_name: String,
    pub amount: i64,
    /// RFC 3339 timestamp of the investment.
    pub invested_at: String,
}

/// One mint call: the recipient wallet and the certificate it receives.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MintRequest {
    pub to: String,
    pub metadata: CertificateMetadata,
}

/// Result of a successful mint.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MintReceipt {
    /// Token ids may come back as JSON numbers or strings; both are kept as text.
    #[serde(deserialize_with = "string_or_number")]
    pub token_id: String,
    pub tx_hash: String,
}

/// Mints investment certificates.
#[async_trait]
pub trait NftMinter: Send + Sync {
    async fn mint(&self, request: &MintRequest) -> Result<MintReceipt, ChainError>;
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}
