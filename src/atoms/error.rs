// ── Solaunch Atoms: Error Types ────────────────────────────────────────────
// Single canonical error enum for the engine, built with `thiserror`.
//
// Design rules:
//   • Variants are coarse-grained by domain (I/O, Network, Wallet, Store…).
//   • The `#[from]` attribute wires std/external error conversions automatically.
//   • `LaunchError` → `String` conversion is provided via `Display` so UI
//     boundaries can call `.map_err(|e| e.to_string())` without boilerplate.
//   • No variant carries secret material (JWTs, private keys) in its message.

use thiserror::Error;

// ── Primary error enum ─────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum LaunchError {
    /// Filesystem or OS-level I/O failure (icon file reads, mostly).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization / deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP / network failure (reqwest layer).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Engine configuration is invalid or missing (env var not set, bad URL).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Wallet adapter missing or signing refused.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Payer balance below the rent + gas precondition.
    #[error("Insufficient SOL balance. Required: {required_sol} SOL")]
    InsufficientBalance { required_sol: f64 },

    /// Transaction submission or confirmation failure. Carries the raw
    /// failure payload from the cluster.
    #[error("{0}")]
    Transaction(String),

    /// Pool-builder API failure, passed through unchanged.
    #[error("{0}")]
    Pool(String),

    /// Pinning-service upload failure.
    #[error("{0}")]
    Upload(String),

    /// Hosted token registry (PostgREST) failure.
    #[error("Store error: {0}")]
    Store(String),

    /// Catch-all for errors that do not yet have a dedicated variant.
    /// Prefer adding a specific variant over using this in new code.
    #[error("{0}")]
    Other(String),
}

// ── Migration bridge: String → LaunchError ─────────────────────────────────
// Allows `?` and `.ok_or("…")` with plain message strings, matching how the
// RPC and pool modules report ad-hoc failures.

impl From<String> for LaunchError {
    fn from(s: String) -> Self {
        LaunchError::Other(s)
    }
}

impl From<&str> for LaunchError {
    fn from(s: &str) -> Self {
        LaunchError::Other(s.to_string())
    }
}

// ── Convenience alias ──────────────────────────────────────────────────────

/// All engine operations return this type.
/// At UI boundaries, convert with `.map_err(|e| e.to_string())`.
pub type LaunchResult<T> = Result<T, LaunchError>;

// ── Conversion: LaunchError → String ───────────────────────────────────────

impl From<LaunchError> for String {
    fn from(e: LaunchError) -> Self {
        e.to_string()
    }
}
