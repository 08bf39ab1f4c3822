// ── Solaunch Atoms: Constants ──────────────────────────────────────────────
// Program IDs, wire sizes, fee configuration, and service endpoints.

/// SPL Token Program ID
pub const TOKEN_PROGRAM_ID: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";

/// Associated Token Account Program ID
pub const ATA_PROGRAM_ID: &str = "ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL";

/// Wrapped SOL mint (the pool's quote asset)
pub const SOL_MINT: &str = "So11111111111111111111111111111111111111112";

/// SPL mint account size in bytes — determines the rent-exempt reserve.
pub const MINT_ACCOUNT_SIZE: u64 = 82;

/// Every launched token uses 9 decimals, like native SOL.
pub const MINT_DECIMALS: u8 = 9;

pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Gas buffer required on top of the rent-exempt reserve before a launch
/// transaction is attempted (0.01 SOL).
pub const GAS_BUFFER_LAMPORTS: u64 = LAMPORTS_PER_SOL / 100;

/// Amount requested from the devnet/testnet faucet when the payer is
/// underfunded (1 SOL).
pub const AIRDROP_LAMPORTS: u64 = LAMPORTS_PER_SOL;

/// Fraction of the declared total supply seeded into the liquidity pool.
pub const POOL_SUPPLY_FRACTION: f64 = 0.10;

// ── Raydium CLMM pool configuration ────────────────────────────────────────
// Fixed fee tier; only tick spacing is creator-configurable.

pub const AMM_CONFIG_ID: &str = "6VBUBPA2Bev2x7S6LoqkE5YMCAoZ5GgZRvdXhZAzBxks";
pub const PROTOCOL_FEE_RATE: f64 = 0.0025;
pub const TRADE_FEE_RATE: f64 = 0.0025;
pub const DEFAULT_TICK_SPACING: u16 = 1;

/// Compute budget attached to the pool-creation transaction.
pub const POOL_COMPUTE_UNITS: u32 = 600_000;
pub const POOL_COMPUTE_MICRO_LAMPORTS: u64 = 50_000;

/// Default pool-builder API — constructs the CLMM pool-creation transaction
/// server-side and returns it for local signing (no private key sent).
/// Override with SOLAUNCH_POOL_API_URL.
pub const DEFAULT_POOL_API_URL: &str = "https://api.solaunch.app/v1/pool/create-local";

// ── Pinning service ────────────────────────────────────────────────────────

pub const PINATA_API_URL: &str = "https://api.pinata.cloud/pinning/pinFileToIPFS";
pub const PINATA_GATEWAY_URL: &str = "https://gateway.pinata.cloud/ipfs";

// ── Explorer ───────────────────────────────────────────────────────────────

pub const EXPLORER_TX_URL: &str = "https://explorer.solana.com/tx";
