//! Handlers for the `/nft` resource: investment certificate minting.

use std::time::Duration;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use raisehub_chain::config::DEFAULT_TIMEOUT_SECS;
use raisehub_chain::{CertificateMetadata, MintRequest};
use raisehub_core::error::CoreError;
use raisehub_core::profile::validate_wallet_address;
use raisehub_core::types::DbId;
use raisehub_db::repositories::{
    CampaignRepo, InvestmentRepo, NftMintRepo, ProfileRepo, StartupRepo,
};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireInvestor;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /nft/mint/{investment_id}`.
///
/// Without a wallet the investor's profile wallet is used.
#[derive(Debug, Default, Deserialize)]
pub struct MintBody {
    pub wallet_address: Option<String>,
}

/// Parse the optional mint body. An empty body means "use the profile wallet".
fn parse_mint_body(raw: &[u8]) -> AppResult<MintBody> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(MintBody::default());
    }
    serde_json::from_slice(raw)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {e}")))
}

/// How long a `pending` record may sit before another request may take it
/// over: the longer of the chain call timeout and the request timeout.
fn pending_stale_after(state: &AppState) -> Duration {
    let rpc_timeout = state
        .config
        .chain
        .as_ref()
        .map_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS), |c| c.timeout);
    rpc_timeout.max(Duration::from_secs(state.config.request_timeout_secs))
}

/// POST /api/nft/mint/{investment_id}
///
/// The body is optional; without one the profile wallet is used.
pub async fn mint(
    RequireInvestor(investor): RequireInvestor,
    State(state): State<AppState>,
    Path(investment_id): Path<DbId>,
    raw_body: Bytes,
) -> AppResult<impl IntoResponse> {
    let minter = state
        .minter
        .clone()
        .ok_or_else(|| AppError::ServiceUnavailable("NFT minting is not configured".into()))?;
    let body = parse_mint_body(&raw_body)?;

    // Someone else's investment is reported as missing.
    let investment = InvestmentRepo::find_by_id(&state.pool, investment_id)
        .await?
        .filter(|i| i.investor_id == investor.user_id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Investment",
            id: investment_id,
        }))?;

    let wallet = match body.wallet_address.map(|w| w.trim().to_string()) {
        Some(w) if !w.is_empty() => w,
        _ => ProfileRepo::find_by_user(&state.pool, investor.user_id)
            .await?
            .and_then(|p| p.wallet_address)
            .ok_or_else(|| {
                AppError::BadRequest(
                    "No wallet address given and none saved on the profile".into(),
                )
            })?,
    };
    validate_wallet_address(&wallet)?;

    // Everything that can fail is loaded before the record is claimed, so a
    // claim is only left behind by a request that dies mid-mint.
    let campaign = CampaignRepo::find_by_id(&state.pool, investment.campaign_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Campaign",
            id: investment.campaign_id,
        }))?;
    let startup = StartupRepo::find_by_id(&state.pool, campaign.startup_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Startup",
            id: campaign.startup_id,
        }))?;

    let claimed = NftMintRepo::claim_pending(
        &state.pool,
        investment_id,
        investor.user_id,
        &wallet,
        pending_stale_after(&state),
    )
    .await?;
    let Some(record) = claimed else {
        let status = NftMintRepo::find_by_investment(&state.pool, investment_id)
            .await?
            .map(|existing| existing.status)
            .unwrap_or_default();
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Certificate for this investment is already {status}"
        ))));
    };

    let request = MintRequest {
        to: wallet,
        metadata: CertificateMetadata {
            name: format!("{} investment certificate #{}", startup.name, investment.id),
            description: format!(
                "Proof of a {} investment in the campaign \"{}\"",
                investment.amount, campaign.title
            ),
            investment_id: investment.id,
            campaign_id: campaign.id,
            campaign_title: campaign.title,
            startup_name: startup.name,
            amount: investment.amount,
            invested_at: investment.created_at.to_rfc3339(),
        },
    };

    match minter.mint(&request).await {
        Ok(receipt) => {
            let minted =
                NftMintRepo::mark_minted(&state.pool, record.id, &receipt.token_id, &receipt.tx_hash)
                    .await?;
            tracing::info!(
                user_id = investor.user_id,
                investment_id,
                token_id = %receipt.token_id,
                tx_hash = %receipt.tx_hash,
                "Investment certificate minted"
            );
            Ok((StatusCode::CREATED, Json(DataResponse { data: minted })))
        }
        Err(e) => {
            let message = e.to_string();
            NftMintRepo::mark_failed(&state.pool, record.id, &message).await?;
            tracing::warn!(
                user_id = investor.user_id,
                investment_id,
                error = %message,
                "Investment certificate mint failed"
            );
            Err(AppError::BadGateway(format!("Minting failed: {message}")))
        }
    }
}

/// GET /api/nft/my-nfts
pub async fn my_nfts(
    RequireInvestor(investor): RequireInvestor,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let mints = NftMintRepo::list_by_investor(&state.pool, investor.user_id).await?;
    Ok(Json(DataResponse { data: mints }))
}
