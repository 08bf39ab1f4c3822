// Solana plumbing — JSON-RPC client, raw transaction codec, wallet seam,
// and the mint / mint-to operations used by the launch saga.
//
// Module layout:
//   rpc     — rpc_call, balances, blockhash, rent, airdrop, send/confirm
//   tx      — compact-u16 codec, legacy message builder, signing, ATA PDA
//   wallet  — WalletAdapter trait + LocalWallet keypair implementation
//   mint    — create_mint, mint_supply

pub(crate) mod rpc;
pub(crate) mod tx;

pub mod mint;
pub mod wallet;

pub use mint::{create_mint, mint_supply};
pub use wallet::{LocalWallet, WalletAdapter};
