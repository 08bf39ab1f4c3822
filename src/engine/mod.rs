// Solaunch Engine — everything with side effects.
//
// Module layout:
//   config       — environment-injected endpoints and secrets
//   format       — display formatting (magnitude suffixes, signed percent)
//   wizard       — launch-wizard state machine, draft, tax normalization
//   sol          — Solana plumbing: rpc, tx codec, wallet seam, mint ops
//   pool         — Raydium CLMM pool creation via the pool-builder API
//   pinning      — icon upload to the pinning service
//   store        — hosted token registry + in-memory token list
//   launch       — the launch saga tying the above together
//   leaderboard  — read-only ranking projections

pub mod config;
pub mod format;
pub mod launch;
pub mod leaderboard;
pub mod pinning;
pub mod pool;
pub mod sol;
pub mod store;
pub mod wizard;
