// Mint operations — create_mint and mint_supply.
//
// Each operation builds one legacy transaction (one or two instructions),
// fetches a fresh blockhash, collects signatures, submits, and awaits
// confirmation. Failures surface with descriptive messages; nothing is
// retried beyond the RPC node's own resend count.

use ed25519_dalek::SigningKey;
use log::{info, warn};

use crate::atoms::constants::{
    AIRDROP_LAMPORTS, ATA_PROGRAM_ID, GAS_BUFFER_LAMPORTS, LAMPORTS_PER_SOL, MINT_ACCOUNT_SIZE,
    TOKEN_PROGRAM_ID,
};
use crate::atoms::error::{LaunchError, LaunchResult};
use crate::engine::config::is_dev_endpoint;

use super::rpc::{
    account_exists, confirm_transaction, get_balance, get_latest_blockhash, get_mint_info,
    get_rent_exempt_reserve, request_airdrop, send_transaction,
};
use super::tx::{build_transaction, decode_pubkey, derive_ata, sign_slot};
use super::wallet::{missing_wallet, WalletAdapter};

const SYSTEM_PROGRAM: [u8; 32] = [0u8; 32];

/// SystemProgram::CreateAccount — discriminator 0 (LE u32), lamports,
/// space, owner program id.
fn create_account_data(lamports: u64, space: u64, owner: &[u8; 32]) -> Vec<u8> {
    let mut data = vec![0u8, 0, 0, 0];
    data.extend_from_slice(&lamports.to_le_bytes());
    data.extend_from_slice(&space.to_le_bytes());
    data.extend_from_slice(owner);
    data
}

/// Token::InitializeMint2 — index 20, decimals, mint authority, and a
/// COption<Pubkey> freeze authority. Launched tokens never carry one,
/// so the tag byte is always 0.
fn initialize_mint2_data(decimals: u8, mint_authority: &[u8; 32]) -> Vec<u8> {
    let mut data = vec![20u8, decimals];
    data.extend_from_slice(mint_authority);
    data.push(0);
    data
}

/// Token::MintTo — index 7 + amount (LE u64).
fn mint_to_data(amount: u64) -> Vec<u8> {
    let mut data = vec![7u8];
    data.extend_from_slice(&amount.to_le_bytes());
    data
}

fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}

/// Balance precondition shared by both operations: the payer must hold
/// `required` lamports. On devnet/testnet an automatic faucet top-up is
/// attempted first; everywhere else (or if the faucet fails) the shortfall
/// is an insufficient-balance error naming the required amount.
async fn ensure_funded(rpc_url: &str, payer: &str, required: u64) -> LaunchResult<()> {
    let balance = get_balance(rpc_url, payer).await?;
    info!(
        "[sol] Balance check for {}: have {} SOL, need {} SOL",
        payer,
        lamports_to_sol(balance),
        lamports_to_sol(required)
    );
    if balance >= required {
        return Ok(());
    }

    if is_dev_endpoint(rpc_url) {
        match request_airdrop(rpc_url, payer, AIRDROP_LAMPORTS).await {
            Ok(()) => return Ok(()),
            Err(e) => {
                warn!("[sol] Airdrop failed: {}", e);
            }
        }
    }
    Err(LaunchError::InsufficientBalance { required_sol: lamports_to_sol(required) })
}

/// Create a new fungible-token identity: one transaction carrying a
/// SystemProgram::CreateAccount for the mint account plus InitializeMint2
/// with the payer as mint authority and no freeze authority.
///
/// Returns the new mint's base58 address. The mint keypair partial-signs
/// its own slot; the wallet adapter signs the fee-payer slot.
pub async fn create_mint(
    rpc_url: &str,
    wallet: Option<&dyn WalletAdapter>,
    decimals: u8,
) -> LaunchResult<String> {
    let wallet = wallet.ok_or_else(missing_wallet)?;
    let payer_address = wallet.pubkey().to_string();
    let payer = decode_pubkey(&payer_address)?;

    let mint_rent = get_rent_exempt_reserve(rpc_url, MINT_ACCOUNT_SIZE).await?;
    ensure_funded(rpc_url, &payer_address, mint_rent + GAS_BUFFER_LAMPORTS).await?;

    // Fresh mint keypair — it signs the transaction once and is never
    // needed again (the payer keeps mint authority).
    let mut mint_seed = [0u8; 32];
    getrandom::getrandom(&mut mint_seed)
        .map_err(|e| LaunchError::Other(format!("Entropy source failed: {}", e)))?;
    let mint_key = SigningKey::from_bytes(&mint_seed);
    let mint_pubkey: [u8; 32] = *mint_key.verifying_key().as_bytes();
    let mint_address = bs58::encode(mint_pubkey).into_string();

    info!("[sol] Creating mint {} (payer {})", mint_address, payer_address);

    let blockhash_b58 = get_latest_blockhash(rpc_url).await?;
    let blockhash = decode_pubkey(&blockhash_b58)?;

    let token_program = decode_pubkey(TOKEN_PROGRAM_ID)?;

    // Signers first: payer (fee), mint (new account).
    let accounts = vec![
        (payer, true, true),
        (mint_pubkey, true, true),
        (SYSTEM_PROGRAM, false, false),
        (token_program, false, false),
    ];
    let instructions = vec![
        // CreateAccount: fund the mint account, owned by the token program.
        (2u8, vec![0u8, 1], create_account_data(mint_rent, MINT_ACCOUNT_SIZE, &token_program)),
        // InitializeMint2 touches only the mint account.
        (3u8, vec![1u8], initialize_mint2_data(decimals, &payer)),
    ];

    let tx = build_transaction(&blockhash, &accounts, &instructions);
    let tx = sign_slot(&tx, 1, &mint_seed)?;
    let signed = wallet.sign_transaction(tx).await?;
    let signed_b64 = base64::Engine::encode(&base64::engine::general_purpose::STANDARD, &signed);

    let signature = send_transaction(rpc_url, &signed_b64, 5, false).await?;
    confirm_transaction(rpc_url, &signature).await?;

    info!("[sol] Token created: {} (tx {})", mint_address, signature);
    Ok(mint_address)
}

/// Mint `amount` whole tokens of `mint` to the destination's associated
/// account, creating that account first when it does not exist.
///
/// Returns the transaction signature.
pub async fn mint_supply(
    rpc_url: &str,
    wallet: Option<&dyn WalletAdapter>,
    mint: &str,
    destination: &str,
    amount: f64,
    decimals: u8,
) -> LaunchResult<String> {
    let wallet = wallet.ok_or_else(missing_wallet)?;
    let payer_address = wallet.pubkey().to_string();
    let payer = decode_pubkey(&payer_address)?;
    let mint_pubkey = decode_pubkey(mint)?;
    let destination_pubkey = decode_pubkey(destination)?;

    ensure_funded(rpc_url, &payer_address, GAS_BUFFER_LAMPORTS).await?;

    // The payer must hold mint authority for MintTo to succeed.
    let mint_info = get_mint_info(rpc_url, mint)
        .await
        .map_err(|e| LaunchError::Other(format!("Failed to get mint information: {}", e)))?;
    match mint_info.get("mintAuthority").and_then(|v| v.as_str()) {
        None => return Err(LaunchError::Other("Mint has no authority".into())),
        Some(authority) if authority != payer_address => {
            warn!(
                "[sol] Mint authority {} does not match payer {}; transaction may fail",
                authority, payer_address
            );
        }
        Some(_) => {}
    }

    let token_program = decode_pubkey(TOKEN_PROGRAM_ID)?;
    let ata = derive_ata(&destination_pubkey, &mint_pubkey, &token_program)?;
    let ata_address = bs58::encode(ata).into_string();
    let ata_present = account_exists(rpc_url, &ata_address).await;

    // Whole tokens → raw base units. Floors, matching the launch form's
    // float-through conversion of the string-encoded supply.
    let raw_amount = (amount * 10f64.powi(decimals as i32)).floor() as u64;
    info!(
        "[sol] Minting {} tokens ({} raw) of {} to {} (ata {}, exists={})",
        amount, raw_amount, mint, destination, ata_address, ata_present
    );

    let blockhash_b58 = get_latest_blockhash(rpc_url).await?;
    let blockhash = decode_pubkey(&blockhash_b58)?;

    let (accounts, instructions) = if ata_present {
        let accounts = vec![
            (payer, true, true),
            (ata, false, true),
            (mint_pubkey, false, true),
            (token_program, false, false),
        ];
        // MintTo: [mint, destination, authority]
        let instructions = vec![(3u8, vec![2u8, 1, 0], mint_to_data(raw_amount))];
        (accounts, instructions)
    } else {
        let ata_program = decode_pubkey(ATA_PROGRAM_ID)?;
        let accounts = vec![
            (payer, true, true),
            (ata, false, true),
            (destination_pubkey, false, false),
            (mint_pubkey, false, true),
            (SYSTEM_PROGRAM, false, false),
            (token_program, false, false),
            (ata_program, false, false),
        ];
        let instructions = vec![
            // Create ATA: [payer, ata, owner, mint, system, token]
            (6u8, vec![0u8, 1, 2, 3, 4, 5], vec![]),
            // MintTo: [mint, destination, authority]
            (5u8, vec![3u8, 1, 0], mint_to_data(raw_amount)),
        ];
        (accounts, instructions)
    };

    let tx = build_transaction(&blockhash, &accounts, &instructions);
    let signed = wallet.sign_transaction(tx).await?;
    let signed_b64 = base64::Engine::encode(&base64::engine::general_purpose::STANDARD, &signed);

    let signature = send_transaction(rpc_url, &signed_b64, 5, false).await?;
    confirm_transaction(rpc_url, &signature).await?;

    info!("[sol] Minted {} tokens (tx {})", amount, signature);
    Ok(signature)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_account_data_layout() {
        let owner = decode_pubkey(TOKEN_PROGRAM_ID).unwrap();
        let data = create_account_data(1_461_600, MINT_ACCOUNT_SIZE, &owner);
        assert_eq!(data.len(), 4 + 8 + 8 + 32);
        assert_eq!(&data[..4], &[0, 0, 0, 0]);
        assert_eq!(u64::from_le_bytes(data[4..12].try_into().unwrap()), 1_461_600);
        assert_eq!(u64::from_le_bytes(data[12..20].try_into().unwrap()), 82);
        assert_eq!(&data[20..], &owner);
    }

    #[test]
    fn test_initialize_mint2_data_has_no_freeze_authority() {
        let authority = [9u8; 32];
        let data = initialize_mint2_data(9, &authority);
        assert_eq!(data[0], 20);
        assert_eq!(data[1], 9);
        assert_eq!(&data[2..34], &authority);
        // COption::None tag — no freeze authority, ever.
        assert_eq!(data[34], 0);
        assert_eq!(data.len(), 35);
    }

    #[test]
    fn test_mint_to_data_layout() {
        let data = mint_to_data(1_000_000_000_000_000_000);
        assert_eq!(data[0], 7);
        assert_eq!(u64::from_le_bytes(data[1..9].try_into().unwrap()), 1_000_000_000_000_000_000);
    }

    #[tokio::test]
    async fn test_missing_wallet_is_fatal() {
        let err = create_mint("https://api.devnet.solana.com", None, 9).await.unwrap_err();
        assert!(err.to_string().contains("Wallet adapter not found"));
        let err = mint_supply("https://api.devnet.solana.com", None, "m", "d", 1.0, 9)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Wallet adapter not found"));
    }
}
