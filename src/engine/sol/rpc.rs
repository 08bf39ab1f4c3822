// Solana JSON-RPC client.
// rpc_call, get_balance, get_latest_blockhash, rent queries, airdrop,
// send_transaction, confirm_transaction, get_mint_info, account_exists.

use std::time::Duration;

use log::{info, warn};

use crate::atoms::error::{LaunchError, LaunchResult};

/// Make a Solana JSON-RPC call.
pub(crate) async fn rpc_call(
    rpc_url: &str,
    method: &str,
    params: serde_json::Value,
) -> LaunchResult<serde_json::Value> {
    let client = reqwest::Client::new();
    let body = serde_json::json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": method,
        "params": params
    });

    let resp = client
        .post(rpc_url)
        .json(&body)
        .timeout(Duration::from_secs(30))
        .send()
        .await?;

    let json: serde_json::Value = resp.json().await?;

    if let Some(error) = json.get("error") {
        return Err(LaunchError::Other(format!("Solana RPC error: {}", error)));
    }

    json.get("result")
        .cloned()
        .ok_or_else(|| LaunchError::Other("Solana RPC: missing 'result' field".into()))
}

/// Payer balance in lamports.
pub(crate) async fn get_balance(rpc_url: &str, address: &str) -> LaunchResult<u64> {
    let result = rpc_call(rpc_url, "getBalance", serde_json::json!([address])).await?;
    result
        .get("value")
        .and_then(|v| v.as_u64())
        .ok_or_else(|| LaunchError::Other("Failed to parse SOL balance".into()))
}

/// Fresh finalized blockhash, base58.
pub(crate) async fn get_latest_blockhash(rpc_url: &str) -> LaunchResult<String> {
    let result = rpc_call(
        rpc_url,
        "getLatestBlockhash",
        serde_json::json!([{ "commitment": "finalized" }]),
    )
    .await?;
    result
        .pointer("/value/blockhash")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| LaunchError::Other("Failed to get recent blockhash".into()))
}

/// Rent-exempt reserve for an account of `space` bytes.
pub(crate) async fn get_rent_exempt_reserve(rpc_url: &str, space: u64) -> LaunchResult<u64> {
    let result = rpc_call(
        rpc_url,
        "getMinimumBalanceForRentExemption",
        serde_json::json!([space]),
    )
    .await?;
    result
        .as_u64()
        .ok_or_else(|| LaunchError::Other("Failed to parse rent-exempt reserve".into()))
}

/// True when the account exists on-chain.
pub(crate) async fn account_exists(rpc_url: &str, address: &str) -> bool {
    rpc_call(
        rpc_url,
        "getAccountInfo",
        serde_json::json!([address, { "encoding": "base64" }]),
    )
    .await
    .map(|r| r.get("value").is_some_and(|v| !v.is_null()))
    .unwrap_or(false)
}

/// Parsed mint account info (decimals, mintAuthority, supply…).
pub(crate) async fn get_mint_info(rpc_url: &str, mint: &str) -> LaunchResult<serde_json::Value> {
    let result = rpc_call(
        rpc_url,
        "getAccountInfo",
        serde_json::json!([mint, { "encoding": "jsonParsed" }]),
    )
    .await?;

    result
        .pointer("/value/data/parsed/info")
        .cloned()
        .ok_or_else(|| LaunchError::Other(format!("Failed to get mint information for {}", mint)))
}

/// Request a faucet airdrop and wait for it to land. Only meaningful on
/// devnet/testnet endpoints; mainnet RPCs reject the method.
pub(crate) async fn request_airdrop(rpc_url: &str, address: &str, lamports: u64) -> LaunchResult<()> {
    info!("[sol] Requesting airdrop of {} lamports to {}", lamports, address);
    let result = rpc_call(rpc_url, "requestAirdrop", serde_json::json!([address, lamports])).await?;
    let sig = result
        .as_str()
        .ok_or_else(|| LaunchError::Other("Airdrop did not return a signature".into()))?;
    confirm_transaction(rpc_url, sig).await?;
    info!("[sol] Airdrop successful, proceeding");
    Ok(())
}

/// Submit a base64-encoded signed transaction. `max_retries` is the RPC
/// node's internal resend count — no retry layer exists above it.
pub(crate) async fn send_transaction(
    rpc_url: &str,
    signed_b64: &str,
    max_retries: u8,
    skip_preflight: bool,
) -> LaunchResult<String> {
    let result = rpc_call(
        rpc_url,
        "sendTransaction",
        serde_json::json!([
            signed_b64,
            {
                "encoding": "base64",
                "skipPreflight": skip_preflight,
                "preflightCommitment": "confirmed",
                "maxRetries": max_retries
            }
        ]),
    )
    .await?;
    result
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| LaunchError::Other("sendTransaction did not return a signature".into()))
}

/// Poll getSignatureStatuses until the transaction confirms or the window
/// closes. An on-chain error payload surfaces verbatim.
pub(crate) async fn confirm_transaction(rpc_url: &str, signature: &str) -> LaunchResult<()> {
    const ATTEMPTS: u32 = 15;
    for attempt in 0..ATTEMPTS {
        tokio::time::sleep(Duration::from_secs(2)).await;

        let status = rpc_call(
            rpc_url,
            "getSignatureStatuses",
            serde_json::json!([[signature]]),
        )
        .await;

        let Ok(status_val) = status else {
            warn!("[sol] Status poll {} failed for {}", attempt + 1, signature);
            continue;
        };

        let entry = status_val
            .pointer("/value/0")
            .filter(|v| !v.is_null())
            .cloned();
        let Some(entry) = entry else { continue };

        if let Some(err) = entry.get("err").filter(|e| !e.is_null()) {
            return Err(LaunchError::Transaction(format!("Transaction failed: {}", err)));
        }
        let conf = entry
            .get("confirmationStatus")
            .and_then(|v| v.as_str())
            .unwrap_or("processed");
        if conf == "confirmed" || conf == "finalized" {
            return Ok(());
        }
    }
    Err(LaunchError::Transaction(format!(
        "Transaction failed: {} not confirmed within the polling window",
        signature
    )))
}
