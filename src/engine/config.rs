// Engine configuration — every endpoint and secret is environment-injected.
// Nothing here may fall back to a bundled credential.

use crate::atoms::constants::DEFAULT_POOL_API_URL;
use crate::atoms::error::{LaunchError, LaunchResult};

#[derive(Debug, Clone)]
pub struct LaunchConfig {
    /// Solana JSON-RPC endpoint. Cluster selection happens here: point it at
    /// devnet/testnet to enable the airdrop top-up path.
    pub rpc_url: String,
    /// Pinning-service bearer token (Pinata JWT).
    pub pinata_jwt: String,
    /// Hosted registry base URL (Supabase project URL, without /rest/v1).
    pub supabase_url: String,
    /// Registry anon/service key.
    pub supabase_key: String,
    /// Pool-builder API returning serialized pool-creation transactions.
    pub pool_api_url: String,
}

fn require(var: &str) -> LaunchResult<String> {
    std::env::var(var)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| LaunchError::Config(format!("Missing {var}. Set it in the environment.")))
}

impl LaunchConfig {
    pub fn from_env() -> LaunchResult<Self> {
        Ok(Self {
            rpc_url: require("SOLAUNCH_RPC_URL")?,
            pinata_jwt: require("SOLAUNCH_PINATA_JWT")?,
            supabase_url: require("SOLAUNCH_SUPABASE_URL")?,
            supabase_key: require("SOLAUNCH_SUPABASE_KEY")?,
            pool_api_url: std::env::var("SOLAUNCH_POOL_API_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_POOL_API_URL.to_string()),
        })
    }
}

/// Endpoint-substring cluster detection, same rule the balance-precondition
/// path uses to decide whether an airdrop may be requested.
pub fn is_dev_endpoint(rpc_url: &str) -> bool {
    rpc_url.contains("devnet") || rpc_url.contains("testnet")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dev_endpoint_detection() {
        assert!(is_dev_endpoint("https://api.devnet.solana.com"));
        assert!(is_dev_endpoint("https://api.testnet.solana.com"));
        assert!(!is_dev_endpoint("https://api.mainnet-beta.solana.com"));
    }

    #[test]
    fn test_missing_var_names_the_variable() {
        let err = require("SOLAUNCH_TEST_UNSET_VAR").unwrap_err();
        assert!(err.to_string().contains("SOLAUNCH_TEST_UNSET_VAR"));
    }
}
