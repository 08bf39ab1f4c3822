// ── Solaunch Atoms: Record Types ───────────────────────────────────────────
// Row shapes for the hosted registry (tokens / profiles / token_stats) plus
// the read-only leaderboard projection. Field names match the backing
// columns so serde maps rows without rename noise.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Percentage split of collected buy/sell taxes.
/// Invariant: the three shares always sum to exactly 100 — maintained by
/// `engine::wizard::set_distribution_share`, not re-checked by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxDistribution {
    pub liquidity: u8,
    pub marketing: u8,
    pub development: u8,
}

impl TaxDistribution {
    pub fn sum(&self) -> u16 {
        self.liquidity as u16 + self.marketing as u16 + self.development as u16
    }
}

impl Default for TaxDistribution {
    fn default() -> Self {
        Self { liquidity: 40, marketing: 30, development: 30 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub twitter: String,
    #[serde(default)]
    pub telegram: String,
    #[serde(default)]
    pub discord: String,
}

/// Creator profile row, keyed by wallet address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub username: String,
}

/// Per-token statistics. Zero-initialized at launch; mutated externally
/// (indexers), never by this codebase. `change_24h` lives here and nowhere
/// else — every display surface reads it from this record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenStats {
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub market_cap: f64,
    #[serde(default)]
    pub volume_24h: f64,
    #[serde(default)]
    pub holders_count: u64,
    #[serde(default)]
    pub change_24h: f64,
}

impl TokenStats {
    pub fn zeroed() -> Self {
        Self::default()
    }
}

/// A launched token as stored in the registry, with the creator profile and
/// stats sub-record joined in when loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRecord {
    pub id: String,
    pub creator_id: String,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub description: String,
    /// String-encoded integer; never parsed for display.
    pub total_supply: String,
    pub buy_tax: u8,
    pub sell_tax: u8,
    pub tax_distribution: TaxDistribution,
    #[serde(default)]
    pub social_links: SocialLinks,
    #[serde(default)]
    pub icon_url: String,
    #[serde(default)]
    pub mint_address: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub launch_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "one_or_first")]
    pub creator: Option<Profile>,
    #[serde(default, deserialize_with = "one_or_first")]
    pub stats: Option<TokenStats>,
}

/// Insert payload for a freshly launched token.
#[derive(Debug, Clone, Serialize)]
pub struct NewToken {
    pub creator_id: String,
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub total_supply: String,
    pub buy_tax: u8,
    pub sell_tax: u8,
    pub tax_distribution: TaxDistribution,
    pub social_links: SocialLinks,
    pub icon_url: String,
    pub mint_address: String,
}

// ── Leaderboard projection ─────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaderboardMetric {
    Volume,
    Price,
    Holders,
}

impl LeaderboardMetric {
    pub fn label(&self) -> &'static str {
        match self {
            LeaderboardMetric::Volume => "24h Volume",
            LeaderboardMetric::Price => "Price",
            LeaderboardMetric::Holders => "Holders",
        }
    }
}

/// Read-only ranking row: token identity + one metric + its 24h change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub id: String,
    pub token_id: String,
    pub token_name: String,
    pub token_symbol: String,
    pub token_icon: String,
    pub metric: LeaderboardMetric,
    pub value: f64,
    pub rank: u32,
    pub change_24h: f64,
}

// ── Embedded-join shim ─────────────────────────────────────────────────────
// PostgREST renders an embedded resource as an object when the FK is unique
// and as a single-element array otherwise. Accept both (and null).

fn one_or_first<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let picked = match value {
        serde_json::Value::Null => None,
        serde_json::Value::Array(items) => items.into_iter().next(),
        other => Some(other),
    };
    match picked {
        None => Ok(None),
        Some(v) => serde_json::from_value(v).map(Some).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distribution_default_sums_to_100() {
        assert_eq!(TaxDistribution::default().sum(), 100);
    }

    #[test]
    fn test_token_record_parses_joined_row() {
        let row = serde_json::json!({
            "id": "tok-1",
            "creator_id": "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin",
            "name": "Example",
            "symbol": "EXM",
            "total_supply": "1000000000",
            "buy_tax": 5,
            "sell_tax": 7,
            "tax_distribution": { "liquidity": 40, "marketing": 30, "development": 30 },
            "created_at": "2025-03-01T12:00:00Z",
            "creator": [{ "id": "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin", "username": "9xQeWvG8" }],
            "stats": { "price": 0.0, "market_cap": 0.0, "volume_24h": 0.0, "holders_count": 0, "change_24h": 0.0 }
        });
        let record: TokenRecord = serde_json::from_value(row).unwrap();
        assert_eq!(record.creator.as_ref().unwrap().username, "9xQeWvG8");
        assert_eq!(record.stats.unwrap(), TokenStats::zeroed());
        assert!(record.icon_url.is_empty());
    }

    #[test]
    fn test_token_record_tolerates_missing_joins() {
        let row = serde_json::json!({
            "id": "tok-2",
            "creator_id": "abc",
            "name": "Bare",
            "symbol": "BARE",
            "total_supply": "1",
            "buy_tax": 0,
            "sell_tax": 0,
            "tax_distribution": { "liquidity": 100, "marketing": 0, "development": 0 }
        });
        let record: TokenRecord = serde_json::from_value(row).unwrap();
        assert!(record.creator.is_none());
        assert!(record.stats.is_none());
    }
}
