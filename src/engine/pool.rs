// Raydium CLMM pool creation.
//
// The pool-creation transaction is built server-side by the pool-builder
// API (parameters in, serialized transaction out — no private key leaves
// the process), then signed locally and submitted through our own RPC.
// Fee tier is fixed; only tick spacing comes from the creator.

use std::time::Duration;

use log::info;

use crate::atoms::constants::{
    AMM_CONFIG_ID, EXPLORER_TX_URL, POOL_COMPUTE_MICRO_LAMPORTS, POOL_COMPUTE_UNITS,
    PROTOCOL_FEE_RATE, SOL_MINT, TRADE_FEE_RATE,
};
use crate::atoms::error::{LaunchError, LaunchResult};
use crate::engine::config::LaunchConfig;
use crate::engine::sol::rpc::{confirm_transaction, send_transaction};
use crate::engine::sol::wallet::{missing_wallet, WalletAdapter};

#[derive(Debug, Clone)]
pub struct PoolCreation {
    pub signature: String,
    pub explorer_url: String,
}

/// Validate that a creator-supplied numeric input is a positive finite
/// number. Runs before any network call.
fn validate_positive(value: f64, message: &str) -> LaunchResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(LaunchError::Pool(message.to_string()));
    }
    Ok(())
}

/// Fetch a serialized pool-creation transaction from the pool-builder API.
/// Raw bytes on success; JSON error body on failure, propagated unchanged.
async fn fetch_pool_tx(
    pool_api_url: &str,
    wallet_pubkey: &str,
    token_mint: &str,
    initial_price: f64,
    token_amount: f64,
    sol_amount: f64,
    tick_spacing: u16,
) -> LaunchResult<Vec<u8>> {
    let client = reqwest::Client::new();

    let body = serde_json::json!({
        "publicKey": wallet_pubkey,
        "mint1": token_mint,
        "mint2": SOL_MINT,
        "ammConfig": {
            "id": AMM_CONFIG_ID,
            "protocolFeeRate": PROTOCOL_FEE_RATE,
            "tradeFeeRate": TRADE_FEE_RATE,
            "tickSpacing": tick_spacing,
        },
        "initialPrice": initial_price,
        "tokenAmount": token_amount,
        "solAmount": sol_amount,
        "startTime": chrono::Utc::now().timestamp(),
        "computeBudget": {
            "units": POOL_COMPUTE_UNITS,
            "microLamports": POOL_COMPUTE_MICRO_LAMPORTS,
        },
    });

    info!(
        "[pool] Requesting pool tx: mint={} price={} tokenAmount={} solAmount={} tickSpacing={}",
        token_mint, initial_price, token_amount, sol_amount, tick_spacing
    );

    let resp = client
        .post(pool_api_url)
        .header("Content-Type", "application/json")
        .json(&body)
        .timeout(Duration::from_secs(30))
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        let err_text = resp.text().await.unwrap_or_else(|_| "Unknown error".into());
        if let Ok(err_json) = serde_json::from_str::<serde_json::Value>(&err_text) {
            let msg = err_json
                .get("message")
                .or(err_json.get("error"))
                .and_then(|v| v.as_str())
                .unwrap_or(&err_text);
            return Err(LaunchError::Pool(format!("Pool builder error ({}): {}", status, msg)));
        }
        return Err(LaunchError::Pool(format!("Pool builder error ({}): {}", status, err_text)));
    }

    let tx_bytes = resp.bytes().await?;
    if tx_bytes.is_empty() {
        return Err(LaunchError::Pool("Pool builder returned empty transaction".into()));
    }

    info!("[pool] Pool builder returned {} byte transaction", tx_bytes.len());
    Ok(tx_bytes.to_vec())
}

/// Create a liquidity pool pairing `token_mint` with native SOL.
/// Full flow: validate inputs → fetch tx → sign → send → confirm.
pub async fn create_pool(
    config: &LaunchConfig,
    wallet: Option<&dyn WalletAdapter>,
    token_mint: &str,
    initial_price: f64,
    token_amount: f64,
    sol_amount: f64,
    tick_spacing: u16,
) -> LaunchResult<PoolCreation> {
    validate_positive(initial_price, "Invalid initial price")?;
    validate_positive(token_amount, "Invalid token amount")?;
    validate_positive(sol_amount, "Invalid SOL amount")?;

    let wallet = wallet.ok_or_else(missing_wallet)?;

    let tx_bytes = fetch_pool_tx(
        &config.pool_api_url,
        wallet.pubkey(),
        token_mint,
        initial_price,
        token_amount,
        sol_amount,
        tick_spacing,
    )
    .await?;

    let signed = wallet.sign_transaction(tx_bytes).await?;
    let signed_b64 = base64::Engine::encode(&base64::engine::general_purpose::STANDARD, &signed);

    let signature = send_transaction(&config.rpc_url, &signed_b64, 3, true).await?;
    confirm_transaction(&config.rpc_url, &signature).await?;

    let explorer_url = format!("{}/{}", EXPLORER_TX_URL, signature);
    info!("[pool] Pool created: {} ({})", signature, explorer_url);

    Ok(PoolCreation { signature, explorer_url })
}
