// Solaunch CLI — launch tokens, browse the registry, manage a local wallet.
//
// Environment:
//   SOLAUNCH_RPC_URL         Solana JSON-RPC endpoint (devnet/testnet enables airdrops)
//   SOLAUNCH_PINATA_JWT      pinning-service bearer token
//   SOLAUNCH_SUPABASE_URL    hosted registry project URL
//   SOLAUNCH_SUPABASE_KEY    registry API key
//   SOLAUNCH_POOL_API_URL    pool-builder endpoint (optional)
//   SOLAUNCH_WALLET_KEYPAIR  base58 64-byte keypair for signing

mod wizard;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use solaunch::engine::format::{format_percentage, format_value};
use solaunch::engine::leaderboard;
use solaunch::engine::sol::wallet::LocalWallet;
use solaunch::engine::wizard::IconFile;
use solaunch::{
    launch, LaunchConfig, LaunchDraft, LeaderboardMetric, PlatformServices, SocialLinks,
    StepStatus, TokenStore,
};

#[derive(Parser)]
#[command(name = "solaunch", version, about = "Token-launch platform CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Launch a new token (interactive wizard when --name is omitted)
    Launch(LaunchArgs),
    /// List all tokens in the registry, newest first
    List,
    /// Show one token's detail view
    Show {
        /// Token record id
        id: String,
    },
    /// Show the token leaderboard
    Leaderboard {
        #[arg(long, value_enum, default_value_t = MetricArg::Volume)]
        metric: MetricArg,
    },
    /// Generate a new local wallet keypair
    WalletNew,
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(clap::Args)]
struct LaunchArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    symbol: Option<String>,
    #[arg(long, default_value = "")]
    description: String,
    #[arg(long, default_value = "1000000000")]
    supply: String,
    #[arg(long, default_value_t = 5)]
    buy_tax: u8,
    #[arg(long, default_value_t = 7)]
    sell_tax: u8,
    /// Tax share routed to liquidity (marketing/development rebalance around it)
    #[arg(long, default_value_t = 40)]
    dist_liquidity: u8,
    #[arg(long, default_value_t = 30)]
    dist_marketing: u8,
    #[arg(long, default_value_t = 30)]
    dist_development: u8,
    /// SOL paired into the pool
    #[arg(long, default_value_t = 1.0)]
    liquidity_sol: f64,
    #[arg(long, default_value_t = 0.0001)]
    start_price: f64,
    #[arg(long, default_value_t = 1)]
    tick_spacing: u16,
    /// Icon image to pin (optional)
    #[arg(long)]
    icon: Option<PathBuf>,
    #[arg(long, default_value = "")]
    website: String,
    #[arg(long, default_value = "")]
    twitter: String,
    #[arg(long, default_value = "")]
    telegram: String,
    #[arg(long, default_value = "")]
    discord: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum MetricArg {
    Volume,
    Price,
    Holders,
}

impl From<MetricArg> for LeaderboardMetric {
    fn from(m: MetricArg) -> Self {
        match m {
            MetricArg::Volume => LeaderboardMetric::Volume,
            MetricArg::Price => LeaderboardMetric::Price,
            MetricArg::Holders => LeaderboardMetric::Holders,
        }
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(message) = run(cli).await {
        eprintln!("Error: {message}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Command::Launch(args) => cmd_launch(args).await,
        Command::List => cmd_list().await,
        Command::Show { id } => cmd_show(&id).await,
        Command::Leaderboard { metric } => cmd_leaderboard(metric.into()).await,
        Command::WalletNew => cmd_wallet_new(),
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "solaunch", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Registry handle for the read-only commands — only the two registry
/// variables are required.
fn registry_store() -> Result<TokenStore, String> {
    let url = require_env("SOLAUNCH_SUPABASE_URL")?;
    let key = require_env("SOLAUNCH_SUPABASE_KEY")?;
    Ok(TokenStore::with_base(&url, &key))
}

fn require_env(var: &str) -> Result<String, String> {
    std::env::var(var)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| format!("Missing {var}. Set it in the environment."))
}

fn wallet_from_env() -> Result<Option<Arc<LocalWallet>>, String> {
    match std::env::var("SOLAUNCH_WALLET_KEYPAIR") {
        Ok(keypair) if !keypair.trim().is_empty() => {
            let wallet = LocalWallet::from_base58_keypair(&keypair).map_err(|e| e.to_string())?;
            Ok(Some(Arc::new(wallet)))
        }
        _ => Ok(None),
    }
}

// ── launch ─────────────────────────────────────────────────────────────────

async fn cmd_launch(args: LaunchArgs) -> Result<(), String> {
    let draft = if args.name.is_some() {
        draft_from_args(args).await?
    } else {
        wizard::run_interactive().map_err(|e| e.to_string())?
    };

    let config = LaunchConfig::from_env().map_err(|e| e.to_string())?;
    let wallet = wallet_from_env()?;
    let store = Arc::new(TokenStore::new(&config));
    let services = PlatformServices::new(
        config,
        wallet.map(|w| w as Arc<dyn solaunch::engine::sol::wallet::WalletAdapter>),
        store,
    );

    println!("Launching {} ({})…\n", draft.name, draft.symbol);
    let outcome = launch(&services, &draft).await;

    for report in &outcome.steps {
        let mark = match &report.status {
            StepStatus::Succeeded => "✅",
            StepStatus::Failed(_) => "❌",
            StepStatus::Skipped => "⏭️ ",
        };
        println!("  {} {}", mark, report.step.label());
    }
    println!();

    if let Some(mint) = &outcome.mint_address {
        println!("Mint:     {mint}");
    }
    if let Some(sig) = &outcome.pool_signature {
        println!("Pool tx:  https://explorer.solana.com/tx/{sig}");
    }

    match outcome.token {
        Some(token) => {
            println!("Record:   {}", token.id);
            println!("\nToken launched! View it with: solaunch show {}", token.id);
            Ok(())
        }
        None => Err(outcome.error().unwrap_or("Failed to launch token").to_string()),
    }
}

async fn draft_from_args(args: LaunchArgs) -> Result<LaunchDraft, String> {
    let icon = match &args.icon {
        None => None,
        Some(path) => {
            let bytes = tokio::fs::read(path).await.map_err(|e| e.to_string())?;
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("icon")
                .to_string();
            Some(IconFile { file_name, bytes })
        }
    };

    let mut draft = LaunchDraft {
        name: args.name.unwrap_or_default(),
        symbol: args.symbol.unwrap_or_default(),
        description: args.description,
        total_supply: args.supply,
        buy_tax: args.buy_tax,
        sell_tax: args.sell_tax,
        initial_liquidity: args.liquidity_sol,
        start_price: args.start_price,
        tick_spacing: args.tick_spacing,
        social_links: SocialLinks {
            website: args.website,
            twitter: args.twitter,
            telegram: args.telegram,
            discord: args.discord,
        },
        icon,
        ..LaunchDraft::default()
    };
    draft.tax_distribution.liquidity = args.dist_liquidity;
    draft.tax_distribution.marketing = args.dist_marketing;
    draft.tax_distribution.development = args.dist_development;
    Ok(draft)
}

// ── list / show / leaderboard ──────────────────────────────────────────────

async fn cmd_list() -> Result<(), String> {
    let store = registry_store()?;
    let tokens = store.load_tokens().await.map_err(|e| e.to_string())?;
    if tokens.is_empty() {
        println!("No tokens launched yet.");
        return Ok(());
    }

    println!("{:<38} {:<20} {:<8} {:>12} {:>10}", "ID", "Name", "Symbol", "Price", "24h");
    for token in &tokens {
        let stats = token.stats.unwrap_or_default();
        println!(
            "{:<38} {:<20} {:<8} {:>12} {:>10}",
            token.id,
            token.name,
            token.symbol,
            format_value(stats.price),
            format_percentage(stats.change_24h),
        );
    }
    Ok(())
}

async fn cmd_show(id: &str) -> Result<(), String> {
    let store = registry_store()?;
    store.load_tokens().await.map_err(|e| e.to_string())?;

    let Some(token) = store.get(id) else {
        // Not-found is a view, not an error.
        println!("Token Not Found");
        println!("The token you're looking for doesn't exist or has been removed.");
        return Ok(());
    };

    let stats = token.stats.unwrap_or_default();
    println!("{} ({})", token.name, token.symbol);
    if !token.description.is_empty() {
        println!("{}\n", token.description);
    }
    println!("Mint:         {}", token.mint_address);
    println!("Creator:      {}", token.creator.map(|c| c.username).unwrap_or(token.creator_id));
    println!("Supply:       {}", token.total_supply);
    println!("Buy/Sell tax: {}% / {}%", token.buy_tax, token.sell_tax);
    println!(
        "Distribution: {}% liquidity / {}% marketing / {}% development",
        token.tax_distribution.liquidity,
        token.tax_distribution.marketing,
        token.tax_distribution.development
    );
    println!("Price:        {}", format_value(stats.price));
    println!("Market cap:   {}", format_value(stats.market_cap));
    println!("24h volume:   {}", format_value(stats.volume_24h));
    println!("24h change:   {}", format_percentage(stats.change_24h));
    println!("Holders:      {}", stats.holders_count);
    if !token.icon_url.is_empty() {
        println!("Icon:         {}", token.icon_url);
    }
    Ok(())
}

async fn cmd_leaderboard(metric: LeaderboardMetric) -> Result<(), String> {
    let store = registry_store()?;
    let tokens = store.load_tokens().await.unwrap_or_default();

    let entries = if tokens.is_empty() {
        leaderboard::sample_leaderboard()
    } else {
        leaderboard::project(&tokens, metric)
    };

    println!("Token Leaderboard — {}", metric.label());
    for entry in entries {
        println!(
            "{:>3}. {:<20} {:<8} {:>12} {:>10}",
            entry.rank,
            entry.token_name,
            entry.token_symbol,
            format_value(entry.value),
            format_percentage(entry.change_24h),
        );
    }
    Ok(())
}

// ── wallet ─────────────────────────────────────────────────────────────────

fn cmd_wallet_new() -> Result<(), String> {
    let (wallet, keypair_b58) = LocalWallet::generate().map_err(|e| e.to_string())?;
    println!("✅ New wallet created!\n");
    println!("Address: {}", solaunch::engine::sol::wallet::WalletAdapter::pubkey(&wallet));
    println!("Keypair: {keypair_b58}\n");
    println!("⚠️  This wallet has zero balance. Fund it before launching.");
    println!("Export SOLAUNCH_WALLET_KEYPAIR with the keypair above to sign launches.");
    Ok(())
}
