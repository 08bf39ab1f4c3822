// Solaunch — token-launch platform engine.
//
// Layer layout:
//   atoms    — pure types, constants, and the error enum. No I/O.
//   engine   — everything that talks to the outside world: Solana RPC,
//              the pool-builder API, the pinning service, the hosted
//              token registry, and the launch orchestration on top.
//
// The CLI front-end lives in crates/solaunch-cli.

pub mod atoms;
pub mod engine;

pub use atoms::error::{LaunchError, LaunchResult};
pub use atoms::types::{
    LeaderboardEntry, LeaderboardMetric, NewToken, Profile, SocialLinks, TaxDistribution,
    TokenRecord, TokenStats,
};
pub use engine::config::LaunchConfig;
pub use engine::launch::{launch, LaunchOutcome, LaunchServices, LaunchStep, PlatformServices, StepStatus};
pub use engine::store::TokenStore;
pub use engine::wizard::{LaunchDraft, WizardStep};
