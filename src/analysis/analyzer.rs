use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use super::error::{AnalysisError, AnalysisResult};
use super::types::{Analysis, CompanyResult, UserContext};
use crate::cache::{CacheStatus, CacheStore};
use crate::constants::{DEFAULT_MAX_ITEMS, DEFAULT_SEARCH_TIMEOUT_SECS, SEARCH_WINDOW_DAYS};
use crate::hashing::{
    CompanyKey, company_cache_key, hash_to_u64, normalize_company_name,
};
use crate::history::HistoryRecorder;
use crate::normalizer::{RawPayload, ResultNormalizer};
use crate::scoring::ScoringEngine;
use crate::search::{SearchClient, SearchError, SearchResult};

#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Look-back window passed to the search client.
    pub search_window_days: u32,
    /// Upper bound on one search call; `None` waits indefinitely.
    pub search_timeout: Option<Duration>,
    /// Items kept per company after sorting.
    pub max_items: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            search_window_days: SEARCH_WINDOW_DAYS,
            search_timeout: Some(Duration::from_secs(DEFAULT_SEARCH_TIMEOUT_SECS)),
            max_items: DEFAULT_MAX_ITEMS,
        }
    }
}

/// Entry point: cache lookup, then search → normalize → score → store on a miss.
///
/// Concurrent misses for the same company are not collapsed; each one calls the
/// search client and the last writer replaces the cached result.
pub struct EsgAnalyzer {
    cache: Arc<CacheStore>,
    search: Arc<dyn SearchClient>,
    history: Arc<dyn HistoryRecorder>,
    normalizer: ResultNormalizer,
    engine: ScoringEngine,
    config: AnalyzerConfig,
}

impl std::fmt::Debug for EsgAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EsgAnalyzer")
            .field("cache", &self.cache)
            .field("search", &self.search.name())
            .field("config", &self.config)
            .finish()
    }
}

impl EsgAnalyzer {
    pub fn new(
        cache: Arc<CacheStore>,
        search: Arc<dyn SearchClient>,
        history: Arc<dyn HistoryRecorder>,
        config: AnalyzerConfig,
    ) -> Self {
        Self {
            cache,
            search,
            history,
            normalizer: ResultNormalizer::new(config.max_items),
            engine: ScoringEngine::new(),
            config,
        }
    }

    pub fn cache(&self) -> &Arc<CacheStore> {
        &self.cache
    }

    pub fn history(&self) -> &Arc<dyn HistoryRecorder> {
        &self.history
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyzes `company` using the configured search timeout.
    pub async fn analyze(
        &self,
        company: &str,
        user: Option<&UserContext>,
    ) -> AnalysisResult<Analysis> {
        self.analyze_with_timeout(company, user, self.config.search_timeout)
            .await
    }

    /// Analyzes `company`, aborting the search after `timeout`.
    ///
    /// A timed-out or failed search surfaces as [`AnalysisError::SearchUnavailable`]
    /// and leaves the cache untouched.
    #[instrument(skip(self, company, user, timeout), fields(company = %company.trim()))]
    pub async fn analyze_with_timeout(
        &self,
        company: &str,
        user: Option<&UserContext>,
        timeout: Option<Duration>,
    ) -> AnalysisResult<Analysis> {
        let company = Self::validated_name(company)?;
        let key = company_cache_key(&company);

        if let Some(result) = self.cache.get_by_key(&key) {
            info!(key = %key.short_hex(), "Cache hit");
            self.record_history(user, &company);
            return Ok(Analysis {
                result,
                cache_status: CacheStatus::Hit,
                warnings: 0,
            });
        }

        debug!(key = %key.short_hex(), "Cache miss, running search");
        let analysis = self.build_and_store(&company, key, timeout).await?;
        self.record_history(user, &company);
        Ok(analysis)
    }

    fn validated_name(company: &str) -> AnalysisResult<String> {
        let company = normalize_company_name(company);
        if !company.chars().any(char::is_alphanumeric) {
            return Err(AnalysisError::InvalidCompanyName);
        }
        Ok(company)
    }

    async fn build_and_store(
        &self,
        company: &str,
        key: CompanyKey,
        timeout: Option<Duration>,
    ) -> AnalysisResult<Analysis> {
        let payload = self.fetch(company, timeout).await.map_err(|source| {
            warn!(
                provider = self.search.name(),
                kind = source.kind(),
                retryable = source.is_retryable(),
                error = %source,
                "Search failed with no cached fallback"
            );
            AnalysisError::SearchUnavailable {
                company: company.to_string(),
                source,
            }
        })?;

        let now = Utc::now();
        let batch = self.normalizer.normalize(&payload, now);
        let warnings = batch.warnings.len();
        if warnings > 0 {
            warn!(warnings, items = batch.items.len(), "Search payload had malformed entries");
        }

        let overview = batch
            .overview
            .unwrap_or_else(|| format!("Overview unavailable for {company}."));
        let scored = self.engine.score(batch.items);

        let result = Arc::new(CompanyResult::new(
            company,
            now,
            overview,
            scored,
            self.config.search_window_days,
        ));
        self.cache.put_by_key(key, Arc::clone(&result));

        info!(
            key = %key.short_hex(),
            items = result.total_items(),
            overall_score = result.overall_score(),
            has_data = result.has_data(),
            "Analysis stored"
        );

        Ok(Analysis {
            result,
            cache_status: CacheStatus::Miss,
            warnings,
        })
    }

    async fn fetch(&self, company: &str, timeout: Option<Duration>) -> SearchResult<RawPayload> {
        let call = self.search.search(company, self.config.search_window_days);
        match timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(result) => result,
                Err(_) => Err(SearchError::Timeout {
                    millis: limit.as_millis() as u64,
                }),
            },
            None => call.await,
        }
    }

    fn record_history(&self, user: Option<&UserContext>, company: &str) {
        let Some(user) = user else {
            return;
        };
        if let Err(e) = self.history.record(&user.user_id, company, Utc::now()) {
            warn!(
                user = hash_to_u64(user.user_id.as_bytes()),
                error = %e,
                "Failed to record search history"
            );
        }
    }
}
