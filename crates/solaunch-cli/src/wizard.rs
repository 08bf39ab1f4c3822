// Interactive launch wizard — terminal front-end over the step machine.
//
// Each prompt shows the current draft value as the default; empty input
// keeps it, `b` goes back one step. Tax-distribution edits go through the
// normalizing setter so the split sums to 100 at every point.

use std::io::{self, BufRead, Write};
use std::path::Path;

use solaunch::engine::wizard::{
    set_distribution_share, DistributionShare, IconFile, LaunchDraft, WizardStep,
};
use solaunch::{LaunchError, LaunchResult};

/// Where to go after a step: forward, or back one step (`b` at a prompt or
/// a failed review).
enum Nav {
    Continue,
    Back,
}

pub fn run_interactive() -> LaunchResult<LaunchDraft> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    run_with_input(&mut input)
}

fn run_with_input(input: &mut impl BufRead) -> LaunchResult<LaunchDraft> {
    let mut draft = LaunchDraft::default();
    let mut step = WizardStep::Basics;
    println!("Enter 'b' at any prompt to go back a step.");

    loop {
        println!("\n── {} ──", step.title());
        let nav = match step {
            WizardStep::Basics => basics(input, &mut draft)?,
            WizardStep::Tokenomics => tokenomics(input, &mut draft)?,
            WizardStep::Liquidity => liquidity(input, &mut draft)?,
            WizardStep::Socials => socials(input, &mut draft)?,
            WizardStep::Review => {
                review(&draft);
                match draft.validate() {
                    Ok(()) => match confirm(input, "Launch now?")? {
                        Some(true) => return Ok(draft),
                        Some(false) => return Err(LaunchError::Other("Launch cancelled".into())),
                        None => Nav::Back,
                    },
                    Err(e) => {
                        println!("Cannot launch yet: {e}");
                        Nav::Back
                    }
                }
            }
        };
        step = match nav {
            Nav::Continue => step.next(),
            Nav::Back => step.back(),
        };
    }
}

fn basics(input: &mut impl BufRead, draft: &mut LaunchDraft) -> LaunchResult<Nav> {
    let Some(name) = prompt(input, "Token name", &draft.name)? else { return Ok(Nav::Back) };
    draft.name = name;
    let Some(symbol) = prompt(input, "Symbol", &draft.symbol)? else { return Ok(Nav::Back) };
    draft.symbol = symbol.to_uppercase();
    let Some(description) = prompt(input, "Description", &draft.description)? else {
        return Ok(Nav::Back);
    };
    draft.description = description;
    let Some(icon_path) = prompt(input, "Icon file (blank for none)", "")? else {
        return Ok(Nav::Back);
    };
    if !icon_path.is_empty() {
        draft.icon = Some(read_icon(Path::new(&icon_path))?);
    }
    Ok(Nav::Continue)
}

fn tokenomics(input: &mut impl BufRead, draft: &mut LaunchDraft) -> LaunchResult<Nav> {
    let Some(supply) = prompt(input, "Total supply", &draft.total_supply)? else {
        return Ok(Nav::Back);
    };
    draft.total_supply = supply;
    let Some(buy_tax) = prompt_parsed(input, "Buy tax %", draft.buy_tax)? else {
        return Ok(Nav::Back);
    };
    draft.buy_tax = buy_tax;
    let Some(sell_tax) = prompt_parsed(input, "Sell tax %", draft.sell_tax)? else {
        return Ok(Nav::Back);
    };
    draft.sell_tax = sell_tax;

    println!(
        "Tax distribution (auto-balanced): {}% liquidity / {}% marketing / {}% development",
        draft.tax_distribution.liquidity,
        draft.tax_distribution.marketing,
        draft.tax_distribution.development
    );
    let Some(liquidity) =
        prompt_parsed(input, "Liquidity share %", draft.tax_distribution.liquidity)?
    else {
        return Ok(Nav::Back);
    };
    set_distribution_share(&mut draft.tax_distribution, DistributionShare::Liquidity, liquidity);
    let Some(marketing) =
        prompt_parsed(input, "Marketing share %", draft.tax_distribution.marketing)?
    else {
        return Ok(Nav::Back);
    };
    set_distribution_share(&mut draft.tax_distribution, DistributionShare::Marketing, marketing);
    println!(
        "  → {}% liquidity / {}% marketing / {}% development",
        draft.tax_distribution.liquidity,
        draft.tax_distribution.marketing,
        draft.tax_distribution.development
    );
    Ok(Nav::Continue)
}

fn liquidity(input: &mut impl BufRead, draft: &mut LaunchDraft) -> LaunchResult<Nav> {
    let Some(sol) = prompt_parsed(input, "Initial liquidity (SOL)", draft.initial_liquidity)?
    else {
        return Ok(Nav::Back);
    };
    draft.initial_liquidity = sol;
    let Some(price) = prompt_parsed(input, "Start price (SOL per token)", draft.start_price)?
    else {
        return Ok(Nav::Back);
    };
    draft.start_price = price;
    Ok(Nav::Continue)
}

fn socials(input: &mut impl BufRead, draft: &mut LaunchDraft) -> LaunchResult<Nav> {
    let links = &mut draft.social_links;
    let Some(website) = prompt(input, "Website", &links.website)? else { return Ok(Nav::Back) };
    links.website = website;
    let Some(twitter) = prompt(input, "Twitter", &links.twitter)? else { return Ok(Nav::Back) };
    links.twitter = twitter;
    let Some(telegram) = prompt(input, "Telegram", &links.telegram)? else { return Ok(Nav::Back) };
    links.telegram = telegram;
    let Some(discord) = prompt(input, "Discord", &links.discord)? else { return Ok(Nav::Back) };
    links.discord = discord;
    Ok(Nav::Continue)
}

fn review(draft: &LaunchDraft) {
    println!("{} ({})", draft.name, draft.symbol);
    println!("  Supply:       {}", draft.total_supply);
    println!("  Taxes:        {}% buy / {}% sell", draft.buy_tax, draft.sell_tax);
    println!(
        "  Distribution: {}% / {}% / {}%",
        draft.tax_distribution.liquidity,
        draft.tax_distribution.marketing,
        draft.tax_distribution.development
    );
    println!("  Liquidity:    {} SOL @ {} SOL/token", draft.initial_liquidity, draft.start_price);
    println!(
        "  Icon:         {}",
        draft.icon.as_ref().map(|i| i.file_name.as_str()).unwrap_or("(none)")
    );
}

// ── Prompt helpers ─────────────────────────────────────────────────────────

/// One prompt answer. `None` means the user asked to go back.
fn prompt(input: &mut impl BufRead, label: &str, default: &str) -> LaunchResult<Option<String>> {
    if default.is_empty() {
        print!("{label}: ");
    } else {
        print!("{label} [{default}]: ");
    }
    io::stdout().flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    let value = line.trim();
    if value == "b" {
        return Ok(None);
    }
    Ok(Some(if value.is_empty() { default.to_string() } else { value.to_string() }))
}

/// Prompt for a parseable value, re-asking until the input parses.
fn prompt_parsed<T>(input: &mut impl BufRead, label: &str, default: T) -> LaunchResult<Option<T>>
where
    T: std::str::FromStr + std::fmt::Display + Copy,
{
    loop {
        let Some(raw) = prompt(input, label, &default.to_string())? else { return Ok(None) };
        match raw.parse() {
            Ok(value) => return Ok(Some(value)),
            Err(_) => println!("Invalid value, try again."),
        }
    }
}

fn confirm(input: &mut impl BufRead, label: &str) -> LaunchResult<Option<bool>> {
    let Some(answer) = prompt(input, &format!("{label} (y/N/b)"), "")? else { return Ok(None) };
    Ok(Some(matches!(answer.as_str(), "y" | "Y" | "yes")))
}

fn read_icon(path: &Path) -> LaunchResult<IconFile> {
    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("icon")
        .to_string();
    Ok(IconFile { file_name, bytes })
}
