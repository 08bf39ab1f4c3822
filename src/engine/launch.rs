// The launch saga.
//
// Five steps in strict sequence: create mint → mint supply → create pool →
// upload icon → persist record. The first failure aborts everything after
// it. There are no compensating transactions — an on-chain resource created
// before a later failure stays on chain — but every step produces a tagged
// result and orphaned resources are logged, so a caller can surface the
// exact stopping point and offer a resume.

use std::sync::Arc;

use async_trait::async_trait;
use log::{error, info, warn};

use crate::atoms::constants::{MINT_DECIMALS, POOL_SUPPLY_FRACTION};
use crate::atoms::error::LaunchResult;
use crate::atoms::types::{NewToken, TokenRecord};
use crate::engine::config::LaunchConfig;
use crate::engine::pinning;
use crate::engine::pool::{self, PoolCreation};
use crate::engine::sol::mint;
use crate::engine::sol::wallet::WalletAdapter;
use crate::engine::store::TokenStore;
use crate::engine::wizard::LaunchDraft;

// ── Collaborator seam ──────────────────────────────────────────────────────

/// The five external operations the saga sequences, plus the signing
/// identity they all act for. Production wiring is `PlatformServices`;
/// tests substitute counting mocks.
#[async_trait]
pub trait LaunchServices: Send + Sync {
    /// Base58 address of the authenticated creator, if a wallet is present.
    fn creator_id(&self) -> Option<String>;

    /// New fungible-token identity; returns the mint address.
    async fn create_mint(&self, decimals: u8) -> LaunchResult<String>;

    /// Mint the declared supply to the creator; returns the tx signature.
    async fn mint_supply(&self, mint: &str, amount: f64) -> LaunchResult<String>;

    async fn create_pool(
        &self,
        mint: &str,
        initial_price: f64,
        token_amount: f64,
        sol_amount: f64,
        tick_spacing: u16,
    ) -> LaunchResult<PoolCreation>;

    /// Pin the icon; returns its gateway URL.
    async fn upload_icon(&self, file_name: &str, bytes: &[u8]) -> LaunchResult<String>;

    /// Write the token record to the registry.
    async fn persist(&self, token: NewToken) -> LaunchResult<TokenRecord>;
}

/// Production services: Solana RPC + pool builder + pinning + registry.
pub struct PlatformServices {
    config: LaunchConfig,
    wallet: Option<Arc<dyn WalletAdapter>>,
    store: Arc<TokenStore>,
}

impl PlatformServices {
    pub fn new(
        config: LaunchConfig,
        wallet: Option<Arc<dyn WalletAdapter>>,
        store: Arc<TokenStore>,
    ) -> Self {
        Self { config, wallet, store }
    }

    fn wallet_ref(&self) -> Option<&dyn WalletAdapter> {
        self.wallet.as_deref()
    }
}

#[async_trait]
impl LaunchServices for PlatformServices {
    fn creator_id(&self) -> Option<String> {
        self.wallet.as_ref().map(|w| w.pubkey().to_string())
    }

    async fn create_mint(&self, decimals: u8) -> LaunchResult<String> {
        mint::create_mint(&self.config.rpc_url, self.wallet_ref(), decimals).await
    }

    async fn mint_supply(&self, mint_address: &str, amount: f64) -> LaunchResult<String> {
        // Supply is minted to the creator's own associated account.
        let destination = self
            .wallet
            .as_ref()
            .map(|w| w.pubkey().to_string())
            .unwrap_or_default();
        mint::mint_supply(
            &self.config.rpc_url,
            self.wallet_ref(),
            mint_address,
            &destination,
            amount,
            MINT_DECIMALS,
        )
        .await
    }

    async fn create_pool(
        &self,
        mint_address: &str,
        initial_price: f64,
        token_amount: f64,
        sol_amount: f64,
        tick_spacing: u16,
    ) -> LaunchResult<PoolCreation> {
        pool::create_pool(
            &self.config,
            self.wallet_ref(),
            mint_address,
            initial_price,
            token_amount,
            sol_amount,
            tick_spacing,
        )
        .await
    }

    async fn upload_icon(&self, file_name: &str, bytes: &[u8]) -> LaunchResult<String> {
        pinning::upload_icon(&self.config, file_name, bytes.to_vec()).await
    }

    async fn persist(&self, token: NewToken) -> LaunchResult<TokenRecord> {
        self.store.create_token(token).await
    }
}

// ── Step bookkeeping ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchStep {
    CreateMint,
    MintSupply,
    CreatePool,
    UploadIcon,
    PersistRecord,
}

impl LaunchStep {
    pub fn label(&self) -> &'static str {
        match self {
            LaunchStep::CreateMint => "Create SPL token",
            LaunchStep::MintSupply => "Mint initial supply",
            LaunchStep::CreatePool => "Create Raydium pool",
            LaunchStep::UploadIcon => "Upload token icon",
            LaunchStep::PersistRecord => "Save token record",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    Succeeded,
    Failed(String),
    /// Either not reached (an earlier step failed) or not applicable
    /// (no icon file was attached).
    Skipped,
}

#[derive(Debug, Clone)]
pub struct StepReport {
    pub step: LaunchStep,
    pub status: StepStatus,
}

/// Result of a launch attempt. Steps are tagged values rather than a thrown
/// error so the caller sees exactly how far the sequence got.
#[derive(Debug, Clone, Default)]
pub struct LaunchOutcome {
    pub steps: Vec<StepReport>,
    pub mint_address: Option<String>,
    pub pool_signature: Option<String>,
    pub icon_url: String,
    pub token: Option<TokenRecord>,
}

impl LaunchOutcome {
    fn record(&mut self, step: LaunchStep, status: StepStatus) {
        self.steps.push(StepReport { step, status });
    }

    fn fail_and_skip_rest(&mut self, step: LaunchStep, reason: String, rest: &[LaunchStep]) {
        error!("[launch] {} failed: {}", step.label(), reason);
        self.record(step, StepStatus::Failed(reason));
        for skipped in rest {
            self.record(*skipped, StepStatus::Skipped);
        }
    }

    pub fn is_success(&self) -> bool {
        self.token.is_some()
    }

    /// The first failure's message, verbatim from the failing collaborator.
    pub fn error(&self) -> Option<&str> {
        self.steps.iter().find_map(|r| match &r.status {
            StepStatus::Failed(reason) => Some(reason.as_str()),
            _ => None,
        })
    }
}

// ── The saga ───────────────────────────────────────────────────────────────

/// Execute a completed draft. Steps run strictly back-to-back; step N+1
/// never starts before step N resolves, and the first failure aborts the
/// remainder. On success the created record is returned inside the outcome
/// for navigation to its detail view.
pub async fn launch(services: &dyn LaunchServices, draft: &LaunchDraft) -> LaunchOutcome {
    const ALL_STEPS: [LaunchStep; 5] = [
        LaunchStep::CreateMint,
        LaunchStep::MintSupply,
        LaunchStep::CreatePool,
        LaunchStep::UploadIcon,
        LaunchStep::PersistRecord,
    ];
    let mut outcome = LaunchOutcome::default();

    let Some(creator_id) = services.creator_id() else {
        outcome.fail_and_skip_rest(
            LaunchStep::CreateMint,
            "Please connect your wallet first".into(),
            &ALL_STEPS[1..],
        );
        return outcome;
    };

    if let Err(e) = draft.validate() {
        outcome.fail_and_skip_rest(LaunchStep::CreateMint, e.to_string(), &ALL_STEPS[1..]);
        return outcome;
    }
    let supply = draft.supply();

    // 1. Create the SPL token.
    info!("[launch] Creating SPL token…");
    let mint_address = match services.create_mint(MINT_DECIMALS).await {
        Ok(addr) => addr,
        Err(e) => {
            outcome.fail_and_skip_rest(LaunchStep::CreateMint, e.to_string(), &ALL_STEPS[1..]);
            return outcome;
        }
    };
    outcome.record(LaunchStep::CreateMint, StepStatus::Succeeded);
    outcome.mint_address = Some(mint_address.clone());

    // 2. Mint initial supply to the creator.
    info!("[launch] Minting initial supply…");
    if let Err(e) = services.mint_supply(&mint_address, supply).await {
        warn!("[launch] Mint {} is live on chain but unfunded (supply mint failed)", mint_address);
        outcome.fail_and_skip_rest(
            LaunchStep::MintSupply,
            e.to_string(),
            &[LaunchStep::CreatePool, LaunchStep::UploadIcon, LaunchStep::PersistRecord],
        );
        return outcome;
    }
    outcome.record(LaunchStep::MintSupply, StepStatus::Succeeded);

    // 3. Create the Raydium pool, seeded with 10% of total supply plus the
    //    creator-specified SOL amount.
    info!("[launch] Creating Raydium pool…");
    let pool = match services
        .create_pool(
            &mint_address,
            draft.start_price,
            supply * POOL_SUPPLY_FRACTION,
            draft.initial_liquidity,
            draft.tick_spacing,
        )
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            warn!(
                "[launch] Mint {} left unlinked on chain (pool creation failed)",
                mint_address
            );
            outcome.fail_and_skip_rest(
                LaunchStep::CreatePool,
                e.to_string(),
                &[LaunchStep::UploadIcon, LaunchStep::PersistRecord],
            );
            return outcome;
        }
    };
    outcome.record(LaunchStep::CreatePool, StepStatus::Succeeded);
    outcome.pool_signature = Some(pool.signature.clone());

    // 4. Upload the icon, if one was attached. Absence is not an error —
    //    the record persists with an empty icon reference.
    let icon_url = match &draft.icon {
        None => {
            outcome.record(LaunchStep::UploadIcon, StepStatus::Skipped);
            String::new()
        }
        Some(icon) => {
            info!("[launch] Uploading token icon…");
            match services.upload_icon(&icon.file_name, &icon.bytes).await {
                Ok(url) => {
                    outcome.record(LaunchStep::UploadIcon, StepStatus::Succeeded);
                    url
                }
                Err(e) => {
                    warn!(
                        "[launch] Orphaned on-chain resources: mint {} and pool tx {} have no record (icon upload failed)",
                        mint_address, pool.signature
                    );
                    outcome.fail_and_skip_rest(
                        LaunchStep::UploadIcon,
                        e.to_string(),
                        &[LaunchStep::PersistRecord],
                    );
                    return outcome;
                }
            }
        }
    };
    outcome.icon_url = icon_url.clone();

    // 5. Persist the token record.
    info!("[launch] Saving token record…");
    let new_token = NewToken {
        creator_id,
        name: draft.name.clone(),
        symbol: draft.symbol.clone(),
        description: draft.description.clone(),
        total_supply: draft.total_supply.clone(),
        buy_tax: draft.buy_tax,
        sell_tax: draft.sell_tax,
        tax_distribution: draft.tax_distribution,
        social_links: draft.social_links.clone(),
        icon_url,
        mint_address: mint_address.clone(),
    };
    match services.persist(new_token).await {
        Ok(record) => {
            outcome.record(LaunchStep::PersistRecord, StepStatus::Succeeded);
            info!("[launch] Token {} launched: record {}", record.symbol, record.id);
            outcome.token = Some(record);
        }
        Err(e) => {
            warn!(
                "[launch] Orphaned on-chain resources: mint {} and pool tx {} have no record (persistence failed)",
                mint_address, pool.signature
            );
            outcome.fail_and_skip_rest(LaunchStep::PersistRecord, e.to_string(), &[]);
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atoms::types::TokenStats;
    use chrono::Utc;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const CREATOR: &str = "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin";

    /// Which step, if any, fails — everything before it succeeds.
    #[derive(Default)]
    struct MockServices {
        fail_at: Option<LaunchStep>,
        connected: bool,
        mint_calls: AtomicUsize,
        supply_calls: AtomicUsize,
        pool_calls: AtomicUsize,
        upload_calls: AtomicUsize,
        persist_calls: AtomicUsize,
        persisted: Mutex<Option<NewToken>>,
        pool_args: Mutex<Option<(f64, f64, f64)>>,
    }

    impl MockServices {
        fn connected() -> Self {
            Self { connected: true, ..Default::default() }
        }

        fn failing_at(step: LaunchStep) -> Self {
            Self { connected: true, fail_at: Some(step), ..Default::default() }
        }

        fn fails(&self, step: LaunchStep) -> bool {
            self.fail_at == Some(step)
        }
    }

    #[async_trait]
    impl LaunchServices for MockServices {
        fn creator_id(&self) -> Option<String> {
            self.connected.then(|| CREATOR.to_string())
        }

        async fn create_mint(&self, _decimals: u8) -> LaunchResult<String> {
            self.mint_calls.fetch_add(1, Ordering::SeqCst);
            if self.fails(LaunchStep::CreateMint) {
                return Err("Insufficient SOL balance. Required: 0.012 SOL".into());
            }
            Ok("MintAddr1111111111111111111111111111111111".to_string())
        }

        async fn mint_supply(&self, _mint: &str, _amount: f64) -> LaunchResult<String> {
            self.supply_calls.fetch_add(1, Ordering::SeqCst);
            if self.fails(LaunchStep::MintSupply) {
                return Err("Transaction failed: {\"InstructionError\":[0,\"Custom\"]}".into());
            }
            Ok("sig-mint-supply".to_string())
        }

        async fn create_pool(
            &self,
            _mint: &str,
            price: f64,
            token_amount: f64,
            sol_amount: f64,
            _tick_spacing: u16,
        ) -> LaunchResult<PoolCreation> {
            self.pool_calls.fetch_add(1, Ordering::SeqCst);
            *self.pool_args.lock() = Some((price, token_amount, sol_amount));
            if self.fails(LaunchStep::CreatePool) {
                return Err("Pool builder error (502): upstream unavailable".into());
            }
            Ok(PoolCreation {
                signature: "sig-pool".into(),
                explorer_url: "https://explorer.solana.com/tx/sig-pool".into(),
            })
        }

        async fn upload_icon(&self, _file_name: &str, _bytes: &[u8]) -> LaunchResult<String> {
            self.upload_calls.fetch_add(1, Ordering::SeqCst);
            if self.fails(LaunchStep::UploadIcon) {
                return Err("Failed to upload image".into());
            }
            Ok("https://gateway.pinata.cloud/ipfs/QmHash".to_string())
        }

        async fn persist(&self, token: NewToken) -> LaunchResult<TokenRecord> {
            self.persist_calls.fetch_add(1, Ordering::SeqCst);
            if self.fails(LaunchStep::PersistRecord) {
                return Err(crate::atoms::error::LaunchError::Store("insert failed".into()));
            }
            let record = TokenRecord {
                id: "tok-new".into(),
                creator_id: token.creator_id.clone(),
                name: token.name.clone(),
                symbol: token.symbol.clone(),
                description: token.description.clone(),
                total_supply: token.total_supply.clone(),
                buy_tax: token.buy_tax,
                sell_tax: token.sell_tax,
                tax_distribution: token.tax_distribution,
                social_links: token.social_links.clone(),
                icon_url: token.icon_url.clone(),
                mint_address: token.mint_address.clone(),
                created_at: Utc::now(),
                launch_date: None,
                creator: None,
                stats: Some(TokenStats::zeroed()),
            };
            *self.persisted.lock() = Some(token);
            Ok(record)
        }
    }

    fn valid_draft() -> LaunchDraft {
        LaunchDraft {
            name: "Example".into(),
            symbol: "EXM".into(),
            ..LaunchDraft::default()
        }
    }

    #[tokio::test]
    async fn test_happy_path_returns_record_and_runs_all_steps() {
        let services = MockServices::connected();
        let outcome = launch(&services, &valid_draft()).await;

        assert!(outcome.is_success());
        let token = outcome.token.unwrap();
        assert_eq!(token.id, "tok-new");
        assert_eq!(token.creator_id, CREATOR);
        assert_eq!(outcome.mint_address.as_deref(), Some("MintAddr1111111111111111111111111111111111"));
        assert_eq!(outcome.pool_signature.as_deref(), Some("sig-pool"));
        assert_eq!(services.mint_calls.load(Ordering::SeqCst), 1);
        assert_eq!(services.supply_calls.load(Ordering::SeqCst), 1);
        assert_eq!(services.pool_calls.load(Ordering::SeqCst), 1);
        assert_eq!(services.persist_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_mint_failure_invokes_nothing_downstream() {
        let services = MockServices::failing_at(LaunchStep::CreateMint);
        let outcome = launch(&services, &valid_draft()).await;

        assert!(!outcome.is_success());
        assert!(outcome.error().unwrap().contains("Insufficient SOL balance"));
        assert_eq!(services.mint_calls.load(Ordering::SeqCst), 1);
        assert_eq!(services.supply_calls.load(Ordering::SeqCst), 0);
        assert_eq!(services.pool_calls.load(Ordering::SeqCst), 0);
        assert_eq!(services.upload_calls.load(Ordering::SeqCst), 0);
        assert_eq!(services.persist_calls.load(Ordering::SeqCst), 0);

        // Every downstream step is reported, tagged Skipped.
        assert_eq!(outcome.steps.len(), 5);
        assert!(outcome.steps[1..]
            .iter()
            .all(|r| r.status == StepStatus::Skipped));
    }

    #[tokio::test]
    async fn test_pool_failure_stops_before_upload_and_persist() {
        let services = MockServices::failing_at(LaunchStep::CreatePool);
        let outcome = launch(&services, &valid_draft()).await;

        assert!(!outcome.is_success());
        assert_eq!(services.upload_calls.load(Ordering::SeqCst), 0);
        assert_eq!(services.persist_calls.load(Ordering::SeqCst), 0);
        // The mint succeeded before the failure and stays reported.
        assert!(outcome.mint_address.is_some());
    }

    #[tokio::test]
    async fn test_pool_is_seeded_with_ten_percent_of_supply() {
        let services = MockServices::connected();
        let mut draft = valid_draft();
        draft.total_supply = "1000000000".into();
        draft.initial_liquidity = 2.5;
        draft.start_price = 0.0002;
        launch(&services, &draft).await;

        let (price, token_amount, sol_amount) = services.pool_args.lock().unwrap();
        assert_eq!(price, 0.0002);
        assert_eq!(token_amount, 100_000_000.0);
        assert_eq!(sol_amount, 2.5);
    }

    #[tokio::test]
    async fn test_missing_icon_is_skipped_not_failed() {
        let services = MockServices::connected();
        let outcome = launch(&services, &valid_draft()).await;

        assert!(outcome.is_success());
        assert_eq!(services.upload_calls.load(Ordering::SeqCst), 0);
        let upload = outcome
            .steps
            .iter()
            .find(|r| r.step == LaunchStep::UploadIcon)
            .unwrap();
        assert_eq!(upload.status, StepStatus::Skipped);
        assert_eq!(services.persisted.lock().as_ref().unwrap().icon_url, "");
    }

    #[tokio::test]
    async fn test_attached_icon_flows_into_the_record() {
        let services = MockServices::connected();
        let mut draft = valid_draft();
        draft.icon = Some(crate::engine::wizard::IconFile {
            file_name: "icon.png".into(),
            bytes: vec![1, 2, 3],
        });
        let outcome = launch(&services, &draft).await;

        assert!(outcome.is_success());
        assert_eq!(services.upload_calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            services.persisted.lock().as_ref().unwrap().icon_url,
            "https://gateway.pinata.cloud/ipfs/QmHash"
        );
    }

    #[tokio::test]
    async fn test_persist_failure_reports_orphaned_pool() {
        let services = MockServices::failing_at(LaunchStep::PersistRecord);
        let outcome = launch(&services, &valid_draft()).await;

        assert!(!outcome.is_success());
        // On-chain steps completed; their identifiers stay in the outcome
        // so a caller can offer resume.
        assert!(outcome.mint_address.is_some());
        assert_eq!(outcome.pool_signature.as_deref(), Some("sig-pool"));
        assert!(outcome.error().unwrap().contains("insert failed"));
    }

    #[tokio::test]
    async fn test_disconnected_wallet_runs_no_steps() {
        let services = MockServices::default();
        let outcome = launch(&services, &valid_draft()).await;

        assert!(!outcome.is_success());
        assert_eq!(outcome.error(), Some("Please connect your wallet first"));
        assert_eq!(services.mint_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_invalid_draft_runs_no_steps() {
        let services = MockServices::connected();
        let outcome = launch(&services, &LaunchDraft::default()).await;

        assert!(!outcome.is_success());
        assert_eq!(services.mint_calls.load(Ordering::SeqCst), 0);
    }
}
