// Launch wizard — linear step machine, draft state, tax normalization.
//
// Draft state is transient: it lives for one wizard session and is never
// persisted partially. The only invariant enforced while editing is the
// tax-distribution sum; everything else is checked once at review time.

use crate::atoms::error::{LaunchError, LaunchResult};
use crate::atoms::types::{SocialLinks, TaxDistribution};

// ── Steps ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Basics,
    Tokenomics,
    Liquidity,
    Socials,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        WizardStep::Basics,
        WizardStep::Tokenomics,
        WizardStep::Liquidity,
        WizardStep::Socials,
        WizardStep::Review,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Basics => "Basic Info",
            WizardStep::Tokenomics => "Tokenomics",
            WizardStep::Liquidity => "Liquidity",
            WizardStep::Socials => "Socials",
            WizardStep::Review => "Review",
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0)
    }

    /// Forward navigation, clamped at Review. No skipping.
    pub fn next(&self) -> WizardStep {
        let i = self.index();
        Self::ALL[(i + 1).min(Self::ALL.len() - 1)]
    }

    /// Backward navigation, clamped at Basics.
    pub fn back(&self) -> WizardStep {
        let i = self.index();
        Self::ALL[i.saturating_sub(1)]
    }

    pub fn is_last(&self) -> bool {
        *self == WizardStep::Review
    }
}

// ── Draft ──────────────────────────────────────────────────────────────────

/// Icon file attached in the basics step. Optional; a missing icon is not
/// an error anywhere in the launch flow.
#[derive(Debug, Clone)]
pub struct IconFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Completed (or in-progress) wizard input.
#[derive(Debug, Clone)]
pub struct LaunchDraft {
    pub name: String,
    pub symbol: String,
    pub description: String,
    /// String-encoded integer, forwarded verbatim to the registry.
    pub total_supply: String,
    pub buy_tax: u8,
    pub sell_tax: u8,
    pub tax_distribution: TaxDistribution,
    /// SOL amount paired into the pool.
    pub initial_liquidity: f64,
    pub start_price: f64,
    pub tick_spacing: u16,
    pub social_links: SocialLinks,
    pub icon: Option<IconFile>,
}

impl Default for LaunchDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            symbol: String::new(),
            description: String::new(),
            total_supply: "1000000000".to_string(),
            buy_tax: 5,
            sell_tax: 7,
            tax_distribution: TaxDistribution::default(),
            initial_liquidity: 1.0,
            start_price: 0.0001,
            tick_spacing: crate::atoms::constants::DEFAULT_TICK_SPACING,
            social_links: SocialLinks::default(),
            icon: None,
        }
    }
}

impl LaunchDraft {
    /// Review-time validation — the equivalent of the native min/max/required
    /// input constraints. Returns the first violation.
    pub fn validate(&self) -> LaunchResult<()> {
        if self.name.trim().is_empty() {
            return Err(LaunchError::Other("Token name is required".into()));
        }
        if self.symbol.trim().is_empty() {
            return Err(LaunchError::Other("Token symbol is required".into()));
        }
        let supply: f64 = self
            .total_supply
            .trim()
            .parse()
            .map_err(|_| LaunchError::Other("Total supply must be a number".into()))?;
        if !supply.is_finite() || supply <= 0.0 {
            return Err(LaunchError::Other("Total supply must be positive".into()));
        }
        if self.buy_tax > 100 || self.sell_tax > 100 {
            return Err(LaunchError::Other("Tax must be between 0 and 100".into()));
        }
        if self.tax_distribution.sum() != 100 {
            return Err(LaunchError::Other("Tax distribution must sum to 100".into()));
        }
        if !self.start_price.is_finite() || self.start_price <= 0.0 {
            return Err(LaunchError::Other("Invalid initial price".into()));
        }
        if !self.initial_liquidity.is_finite() || self.initial_liquidity <= 0.0 {
            return Err(LaunchError::Other("Invalid SOL amount".into()));
        }
        Ok(())
    }

    /// Parsed supply for the on-chain steps.
    pub fn supply(&self) -> f64 {
        self.total_supply.trim().parse().unwrap_or(0.0)
    }
}

// ── Tax-distribution normalization ─────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistributionShare {
    Liquidity,
    Marketing,
    Development,
}

/// Set one share and redistribute the remainder across the two untouched
/// shares so the triple sums to exactly 100 after every change: the changed
/// share is clamped to 100, the first untouched share (in field order) gets
/// the floor of half the remainder, the second absorbs the rounding.
pub fn set_distribution_share(dist: &mut TaxDistribution, share: DistributionShare, value: u8) {
    let value = value.min(100);
    let remaining = 100 - value;
    let half = remaining / 2;
    match share {
        DistributionShare::Liquidity => {
            dist.liquidity = value;
            dist.marketing = half;
            dist.development = remaining - half;
        }
        DistributionShare::Marketing => {
            dist.marketing = value;
            dist.liquidity = half;
            dist.development = remaining - half;
        }
        DistributionShare::Development => {
            dist.development = value;
            dist.liquidity = half;
            dist.marketing = remaining - half;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_are_linear_and_clamped() {
        let mut step = WizardStep::Basics;
        assert_eq!(step.back(), WizardStep::Basics);
        step = step.next();
        assert_eq!(step, WizardStep::Tokenomics);
        step = step.next().next().next();
        assert_eq!(step, WizardStep::Review);
        assert!(step.is_last());
        assert_eq!(step.next(), WizardStep::Review);
        assert_eq!(step.back(), WizardStep::Socials);
    }

    #[test]
    fn test_distribution_sums_to_100_after_any_change() {
        for share in [
            DistributionShare::Liquidity,
            DistributionShare::Marketing,
            DistributionShare::Development,
        ] {
            for value in [0u8, 1, 33, 50, 77, 99, 100] {
                let mut dist = TaxDistribution::default();
                set_distribution_share(&mut dist, share, value);
                assert_eq!(dist.sum(), 100, "share={share:?} value={value}");
            }
        }
    }

    #[test]
    fn test_distribution_clamps_overflow() {
        let mut dist = TaxDistribution::default();
        set_distribution_share(&mut dist, DistributionShare::Marketing, 250);
        assert_eq!(dist.marketing, 100);
        assert_eq!(dist.sum(), 100);
    }

    #[test]
    fn test_changed_share_keeps_requested_value() {
        let mut dist = TaxDistribution::default();
        set_distribution_share(&mut dist, DistributionShare::Development, 75);
        assert_eq!(dist.development, 75);
        assert_eq!(dist.liquidity, 12);
        assert_eq!(dist.marketing, 13);
    }

    #[test]
    fn test_default_draft_matches_form_defaults() {
        let draft = LaunchDraft::default();
        assert_eq!(draft.total_supply, "1000000000");
        assert_eq!(draft.buy_tax, 5);
        assert_eq!(draft.sell_tax, 7);
        assert_eq!(draft.initial_liquidity, 1.0);
        assert_eq!(draft.start_price, 0.0001);
        assert_eq!(draft.tick_spacing, 1);
    }

    #[test]
    fn test_validate_rejects_empty_name_and_bad_supply() {
        let mut draft = LaunchDraft::default();
        assert!(draft.validate().is_err());
        draft.name = "Example".into();
        draft.symbol = "EXM".into();
        assert!(draft.validate().is_ok());
        draft.total_supply = "not-a-number".into();
        assert!(draft.validate().is_err());
        draft.total_supply = "0".into();
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unbalanced_distribution() {
        let mut draft = LaunchDraft::default();
        draft.name = "Example".into();
        draft.symbol = "EXM".into();
        draft.tax_distribution.liquidity = 50; // direct edit bypasses normalization
        assert!(draft.validate().is_err());
    }
}
