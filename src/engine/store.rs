// Hosted token registry client + in-memory token list.
//
// The store exclusively owns the in-memory list; presentation surfaces get
// cloned snapshots and never write to the backend themselves. Backend access
// is PostgREST over HTTP: tokens / profiles / token_stats, related by
// creator_id and token_id foreign keys.
//
// The multi-call operations here are not transactional — a profile can be
// upserted and the token insert still fail. Partial completion is logged,
// not recovered (see DESIGN.md).

use std::time::Duration;

use log::{info, warn};
use parking_lot::Mutex;
use reqwest::Method;

use crate::atoms::error::{LaunchError, LaunchResult};
use crate::atoms::types::{NewToken, Profile, TokenRecord, TokenStats};
use crate::engine::config::LaunchConfig;

pub struct TokenStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    tokens: Mutex<Vec<TokenRecord>>,
}

impl TokenStore {
    pub fn new(config: &LaunchConfig) -> Self {
        Self::with_base(&config.supabase_url, &config.supabase_key)
    }

    /// Construct against an explicit REST base. Also the test seam.
    pub fn with_base(supabase_url: &str, api_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: format!("{}/rest/v1", supabase_url.trim_end_matches('/')),
            api_key: api_key.to_string(),
            tokens: Mutex::new(Vec::new()),
        }
    }

    fn request(&self, method: Method, path_and_query: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, format!("{}/{}", self.base_url, path_and_query))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .timeout(Duration::from_secs(30))
    }

    /// Execute a request and parse the representation rows, mapping any
    /// non-success status to a store error with the backend's message.
    async fn rows<T: serde::de::DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> LaunchResult<Vec<T>> {
        let resp = builder.send().await?;
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(LaunchError::Store(format!("{}: {}", status, body)));
        }
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&body)
            .map_err(|e| LaunchError::Store(format!("Unexpected response shape: {}", e)))
    }

    // ── Operations ─────────────────────────────────────────────────────────

    /// Fetch all records (joined creator + stats) newest-first and replace
    /// the in-memory state with the result.
    pub async fn load_tokens(&self) -> LaunchResult<Vec<TokenRecord>> {
        let query = "tokens?select=*,creator:profiles(id,username),stats:token_stats(*)\
                     &order=created_at.desc";
        let records: Vec<TokenRecord> = self.rows(self.request(Method::GET, query)).await?;
        info!("[store] Loaded {} tokens", records.len());
        *self.tokens.lock() = records.clone();
        Ok(records)
    }

    /// Upsert the creator profile (username = first 8 chars of the wallet
    /// address), insert the token row, initialize a zeroed stats row, then
    /// prepend the created record to the in-memory list.
    pub async fn create_token(&self, data: NewToken) -> LaunchResult<TokenRecord> {
        let username: String = data.creator_id.chars().take(8).collect();
        let profiles: Vec<Profile> = self
            .rows(
                self.request(Method::POST, "profiles?on_conflict=id")
                    .header("Prefer", "resolution=merge-duplicates,return=representation")
                    .json(&serde_json::json!([{ "id": data.creator_id, "username": username }])),
            )
            .await?;
        let profile = profiles
            .into_iter()
            .next()
            .ok_or_else(|| LaunchError::Store("Profile upsert returned no row".into()))?;

        let rows: Vec<TokenRecord> = self
            .rows(
                self.request(Method::POST, "tokens")
                    .header("Prefer", "return=representation")
                    .json(&serde_json::json!([data])),
            )
            .await?;
        let mut record = rows
            .into_iter()
            .next()
            .ok_or_else(|| LaunchError::Store("Token insert returned no row".into()))?;

        // Zero-initialized stats row. The sequence is not transactional: a
        // failure here leaves a token without stats, which we log and carry.
        let stats_insert = self
            .rows::<serde_json::Value>(
                self.request(Method::POST, "token_stats")
                    .header("Prefer", "return=minimal")
                    .json(&serde_json::json!([{
                        "token_id": record.id,
                        "price": 0,
                        "market_cap": 0,
                        "volume_24h": 0,
                        "holders_count": 0,
                        "change_24h": 0,
                    }])),
            )
            .await;
        if let Err(e) = stats_insert {
            warn!("[store] Stats init failed for token {}: {}", record.id, e);
        }

        record.creator = Some(profile);
        record.stats = Some(TokenStats::zeroed());

        info!("[store] Created token {} ({})", record.name, record.id);
        self.insert_created(record.clone());
        Ok(record)
    }

    /// Update the backing row and merge the result into the matching
    /// in-memory entry.
    pub async fn update_token(
        &self,
        id: &str,
        patch: serde_json::Value,
    ) -> LaunchResult<TokenRecord> {
        let query = format!("tokens?id=eq.{}", urlencoding::encode(id));
        let rows: Vec<TokenRecord> = self
            .rows(
                self.request(Method::PATCH, &query)
                    .header("Prefer", "return=representation")
                    .json(&patch),
            )
            .await?;
        let updated = rows
            .into_iter()
            .next()
            .ok_or_else(|| LaunchError::Store(format!("No token with id {}", id)))?;

        let merged = self.apply_update(updated);
        info!("[store] Updated token {}", id);
        Ok(merged)
    }

    // ── In-memory list ─────────────────────────────────────────────────────

    fn insert_created(&self, record: TokenRecord) {
        self.tokens.lock().insert(0, record);
    }

    /// Replace the matching entry's row fields, keeping previously joined
    /// creator/stats when the update representation lacks them.
    fn apply_update(&self, mut updated: TokenRecord) -> TokenRecord {
        let mut tokens = self.tokens.lock();
        if let Some(existing) = tokens.iter_mut().find(|t| t.id == updated.id) {
            if updated.creator.is_none() {
                updated.creator = existing.creator.clone();
            }
            if updated.stats.is_none() {
                updated.stats = existing.stats;
            }
            *existing = updated.clone();
        }
        updated
    }

    /// Cloned snapshot of the in-memory list, newest-first.
    pub fn tokens(&self) -> Vec<TokenRecord> {
        self.tokens.lock().clone()
    }

    /// Detail lookup. A nonexistent id is `None`, never an error.
    pub fn get(&self, id: &str) -> Option<TokenRecord> {
        self.tokens.lock().iter().find(|t| t.id == id).cloned()
    }
}
