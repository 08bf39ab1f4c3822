// Leaderboard projections — read-only ranking rows for display.
//
// Two sources: a static sample set (what the marketing pages ship with
// before any token has launched) and a live projection over loaded records.
// Both copy `change_24h` from the stats sub-record; nothing else computes
// or stores a price change.

use crate::atoms::types::{LeaderboardEntry, LeaderboardMetric, TokenRecord};

/// Rank loaded records by the chosen metric, descending. Records without a
/// stats sub-record rank as zero.
pub fn project(tokens: &[TokenRecord], metric: LeaderboardMetric) -> Vec<LeaderboardEntry> {
    let mut scored: Vec<(&TokenRecord, f64, f64)> = tokens
        .iter()
        .map(|t| {
            let stats = t.stats.unwrap_or_default();
            let value = match metric {
                LeaderboardMetric::Volume => stats.volume_24h,
                LeaderboardMetric::Price => stats.price,
                LeaderboardMetric::Holders => stats.holders_count as f64,
            };
            (t, value, stats.change_24h)
        })
        .collect();
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    scored
        .into_iter()
        .enumerate()
        .map(|(i, (token, value, change_24h))| LeaderboardEntry {
            id: format!("lb-{}", token.id),
            token_id: token.id.clone(),
            token_name: token.name.clone(),
            token_symbol: token.symbol.clone(),
            token_icon: token.icon_url.clone(),
            metric,
            value,
            rank: i as u32 + 1,
            change_24h,
        })
        .collect()
}

/// Static sample entries — top tokens by 24h volume. Display-only filler
/// for an empty registry; never fed back into the store.
pub fn sample_leaderboard() -> Vec<LeaderboardEntry> {
    let rows = [
        ("sample-1", "Nebula", "NEB", 2_450_000.0, 12.4),
        ("sample-2", "Quasar", "QSR", 1_870_000.0, 8.1),
        ("sample-3", "Pulsar", "PLS", 940_000.0, -2.3),
        ("sample-4", "Meteor", "MTR", 615_000.0, 4.9),
        ("sample-5", "Comet", "CMT", 380_000.0, -0.7),
    ];
    rows.iter()
        .enumerate()
        .map(|(i, (id, name, symbol, volume, change))| LeaderboardEntry {
            id: format!("lb-{id}"),
            token_id: id.to_string(),
            token_name: name.to_string(),
            token_symbol: symbol.to_string(),
            token_icon: String::new(),
            metric: LeaderboardMetric::Volume,
            value: *volume,
            rank: i as u32 + 1,
            change_24h: *change,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atoms::types::{SocialLinks, TaxDistribution, TokenStats};
    use chrono::Utc;

    fn record(id: &str, volume: f64, change: f64) -> TokenRecord {
        TokenRecord {
            id: id.to_string(),
            creator_id: "creator".into(),
            name: id.to_uppercase(),
            symbol: id.to_uppercase(),
            description: String::new(),
            total_supply: "1".into(),
            buy_tax: 0,
            sell_tax: 0,
            tax_distribution: TaxDistribution::default(),
            social_links: SocialLinks::default(),
            icon_url: String::new(),
            mint_address: String::new(),
            created_at: Utc::now(),
            launch_date: None,
            creator: None,
            stats: Some(TokenStats { volume_24h: volume, change_24h: change, ..TokenStats::zeroed() }),
        }
    }

    #[test]
    fn test_project_ranks_by_metric_descending() {
        let tokens = vec![record("a", 10.0, 1.0), record("b", 30.0, -2.0), record("c", 20.0, 0.5)];
        let entries = project(&tokens, LeaderboardMetric::Volume);
        let order: Vec<&str> = entries.iter().map(|e| e.token_id.as_str()).collect();
        assert_eq!(order, ["b", "c", "a"]);
        assert_eq!(entries[0].rank, 1);
        assert_eq!(entries[2].rank, 3);
    }

    #[test]
    fn test_change_comes_from_stats_only() {
        let tokens = vec![record("a", 10.0, 7.25)];
        let entries = project(&tokens, LeaderboardMetric::Volume);
        assert_eq!(entries[0].change_24h, 7.25);
    }

    #[test]
    fn test_missing_stats_rank_last_not_panic() {
        let mut bare = record("bare", 0.0, 0.0);
        bare.stats = None;
        let tokens = vec![record("a", 5.0, 0.0), bare];
        let entries = project(&tokens, LeaderboardMetric::Volume);
        assert_eq!(entries[1].token_id, "bare");
        assert_eq!(entries[1].value, 0.0);
    }

    #[test]
    fn test_sample_is_ranked_and_volume_metric() {
        let entries = sample_leaderboard();
        assert_eq!(entries.len(), 5);
        assert!(entries.windows(2).all(|w| w[0].value >= w[1].value && w[0].rank < w[1].rank));
        assert!(entries.iter().all(|e| e.metric == LeaderboardMetric::Volume));
    }
}
