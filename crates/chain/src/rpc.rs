//! JSON-RPC 2.0 client for the minting endpoint.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::ChainConfig;
use crate::minter::{MintReceipt, MintRequest, NftMinter};

/// Errors from the chain RPC layer.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("Chain request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint returned a non-2xx status code.
    #[error("Chain endpoint error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The endpoint answered with a JSON-RPC error object.
    #[error("Chain RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The response was not a valid JSON-RPC reply.
    #[error("Malformed chain response: {0}")]
    Malformed(String),
}

#[derive(Debug, Serialize)]
struct RpcRequest<'a, P: Serialize> {
    jsonrpc: &'static str,
    id: String,
    method: &'a str,
    params: P,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

/// HTTP JSON-RPC client for one chain endpoint.
pub struct ChainRpcClient {
    client: reqwest::Client,
    rpc_url: String,
    mint_method: String,
}

impl ChainRpcClient {
    /// Build a client with the configured request timeout.
    pub fn new(config: &ChainConfig) -> Result<Self, ChainError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(client, config))
    }

    /// Build a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: &ChainConfig) -> Self {
        Self {
            client,
            rpc_url: config.rpc_url.clone(),
            mint_method: config.mint_method.clone(),
        }
    }

    /// Invoke `method` with `params` and decode the `result` member.
    pub async fn call<P, T>(&self, method: &str, params: P) -> Result<T, ChainError>
    where
        P: Serialize + Send,
        T: DeserializeOwned,
    {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: uuid::Uuid::new_v4().to_string(),
            method,
            params,
        };
        tracing::debug!(method, id = %request.id, "Sending chain RPC request");

        let response = self
            .client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ChainError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        decode_response(&body)
    }
}

#[async_trait]
impl NftMinter for ChainRpcClient {
    async fn mint(&self, request: &MintRequest) -> Result<MintReceipt, ChainError> {
        let receipt: MintReceipt = self.call(&self.mint_method, [request]).await?;
        tracing::info!(
            to = %request.to,
            token_id = %receipt.token_id,
            tx_hash = %receipt.tx_hash,
            "Certificate minted",
        );
        Ok(receipt)
    }
}

/// Decode a JSON-RPC reply body into its `result`, surfacing RPC errors.
fn decode_response<T: DeserializeOwned>(body: &str) -> Result<T, ChainError> {
    let reply: RpcResponse =
        serde_json::from_str(body).map_err(|e| ChainError::Malformed(e.to_string()))?;

    if let Some(error) = reply.error {
        return Err(ChainError::Rpc {
            code: error.code,
            message: error.message,
        });
    }

    let result = reply
        .result
        .ok_or_else(|| ChainError::Malformed("reply has neither result nor error".into()))?;
    serde_json::from_value(result).map_err(|e| ChainError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn decodes_mint_result() {
        let body = r#"{"jsonrpc":"2.0","id":"1","result":{"tokenId":"7","txHash":"0xabc"}}"#;
        let receipt: MintReceipt = decode_response(body).unwrap();
        assert_eq!(receipt.token_id, "7");
        assert_eq!(receipt.tx_hash, "0xabc");
    }

    #[test]
    fn surfaces_rpc_error_object() {
        let body = r#"{"jsonrpc":"2.0","id":"1","error":{"code":-32000,"message":"out of gas"}}"#;
        let err = decode_response::<MintReceipt>(body).unwrap_err();
        assert_matches!(err, ChainError::Rpc { code: -32000, ref message } if message == "out of gas");
    }

    #[test]
    fn missing_result_is_malformed() {
        let body = r#"{"jsonrpc":"2.0","id":"1"}"#;
        assert_matches!(
            decode_response::<MintReceipt>(body),
            Err(ChainError::Malformed(_))
        );
    }

    #[test]
    fn non_json_body_is_malformed() {
        assert_matches!(
            decode_response::<MintReceipt>("<html>bad gateway</html>"),
            Err(ChainError::Malformed(_))
        );
    }

    #[test]
    fn result_with_wrong_shape_is_malformed() {
        let body = r#"{"jsonrpc":"2.0","id":"1","result":{"hash":"0x1"}}"#;
        assert_matches!(
            decode_response::<MintReceipt>(body),
            Err(ChainError::Malformed(_))
        );
    }

    #[test]
    fn request_serializes_params_as_array() {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: "abc".into(),
            method: "nft_mint",
            params: [serde_json::json!({"to": "0x1"})],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["jsonrpc"], "2.0");
        assert_eq!(json["method"], "nft_mint");
        assert_eq!(json["params"][0]["to"], "0x1");
    }
}
