// Wallet seam.
// The launch flow never handles key material directly — it asks a
// WalletAdapter to sign. LocalWallet is the self-custody implementation
// (base58-encoded 64-byte keypair, Solana convention).

use async_trait::async_trait;
use ed25519_dalek::SigningKey;
use log::info;

use crate::atoms::error::{LaunchError, LaunchResult};

use super::tx::sign_slot;

/// The signing provider. Implementations receive a fully built serialized
/// transaction and return it with the fee-payer slot signed.
#[async_trait]
pub trait WalletAdapter: Send + Sync {
    /// Base58 public key of the fee payer / creator identity.
    fn pubkey(&self) -> &str;

    /// Sign the fee-payer slot (slot 0) of a serialized transaction.
    async fn sign_transaction(&self, tx_bytes: Vec<u8>) -> LaunchResult<Vec<u8>>;
}

/// Error used wherever a wallet is a fatal precondition and none is present.
pub fn missing_wallet() -> LaunchError {
    LaunchError::Wallet(
        "Wallet adapter not found. Please ensure your wallet is properly connected.".into(),
    )
}

// ── Local keypair wallet ───────────────────────────────────────────────────

pub struct LocalWallet {
    address: String,
    secret: [u8; 32],
}

impl LocalWallet {
    /// Decode a base58-encoded 64-byte Solana keypair (secret ‖ public).
    pub fn from_base58_keypair(keypair_b58: &str) -> LaunchResult<Self> {
        let keypair_bytes = bs58::decode(keypair_b58.trim())
            .into_vec()
            .map_err(|e| LaunchError::Wallet(format!("Invalid private key encoding: {}", e)))?;
        if keypair_bytes.len() < 64 {
            return Err(LaunchError::Wallet("Invalid Solana keypair (expected 64 bytes)".into()));
        }
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&keypair_bytes[..32]);

        let address = pubkey_from_secret(&secret);
        Ok(Self { address, secret })
    }

    /// Generate a fresh keypair. Returns the wallet and the base58 keypair
    /// string for the caller to store — the engine keeps no copy.
    pub fn generate() -> LaunchResult<(Self, String)> {
        let mut seed = [0u8; 32];
        getrandom::getrandom(&mut seed)
            .map_err(|e| LaunchError::Wallet(format!("Entropy source failed: {}", e)))?;
        let signing_key = SigningKey::from_bytes(&seed);
        let public_key = signing_key.verifying_key();

        let mut keypair_bytes = [0u8; 64];
        keypair_bytes[..32].copy_from_slice(&signing_key.to_bytes());
        keypair_bytes[32..].copy_from_slice(public_key.as_bytes());
        let keypair_b58 = bs58::encode(&keypair_bytes).into_string();

        let address = bs58::encode(public_key.as_bytes()).into_string();
        info!("[sol] Generated new wallet: {}", address);

        Ok((Self { address, secret: seed }, keypair_b58))
    }
}

#[async_trait]
impl WalletAdapter for LocalWallet {
    fn pubkey(&self) -> &str {
        &self.address
    }

    async fn sign_transaction(&self, tx_bytes: Vec<u8>) -> LaunchResult<Vec<u8>> {
        sign_slot(&tx_bytes, 0, &self.secret)
    }
}

/// Derive the base58 public key from ed25519 secret bytes.
pub(crate) fn pubkey_from_secret(secret: &[u8; 32]) -> String {
    let signing_key = SigningKey::from_bytes(secret);
    bs58::encode(signing_key.verifying_key().as_bytes()).into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::sol::tx::build_transaction;

    #[test]
    fn test_generate_round_trips_through_base58() {
        let (wallet, keypair_b58) = LocalWallet::generate().unwrap();
        let restored = LocalWallet::from_base58_keypair(&keypair_b58).unwrap();
        assert_eq!(wallet.pubkey(), restored.pubkey());
    }

    #[test]
    fn test_from_base58_rejects_short_keys() {
        let short = bs58::encode([1u8; 32]).into_string();
        assert!(LocalWallet::from_base58_keypair(&short).is_err());
    }

    #[tokio::test]
    async fn test_sign_transaction_fills_fee_payer_slot() {
        let (wallet, _) = LocalWallet::generate().unwrap();
        let payer = crate::engine::sol::tx::decode_pubkey(wallet.pubkey()).unwrap();
        let tx = build_transaction(&[0u8; 32], &[(payer, true, true)], &[]);
        let signed = wallet.sign_transaction(tx).await.unwrap();
        assert!(signed[1..65].iter().any(|b| *b != 0));
    }
}
