//! ESG risk analysis library crate (used by the server and integration tests).
//!
//! # Public API Surface
//!
//! ## Core Types
//! - [`EsgAnalyzer`], [`AnalyzerConfig`] - cache-first analysis entry point
//! - [`CompanyResult`], [`RiskItem`], [`EsgScores`] - cacheable output
//! - [`CacheStore`] - bounded LRU + TTL result cache
//! - [`Config`], [`ConfigError`] - service configuration
//!
//! ## Pipeline Stages
//! - [`ResultNormalizer`] - raw search payload to typed items
//! - [`classifier::classify`] - keyword-density fallback scores
//! - [`ScoringEngine`] - weighted per-item and company scores
//!
//! ## Collaborators
//! - [`SearchClient`], [`OpenAiSearchClient`] - external AI search
//! - [`HistoryRecorder`], [`InMemoryHistory`] - per-user search history
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod analysis;
pub mod cache;
pub mod classifier;
pub mod config;
pub mod constants;
pub mod gateway;
pub mod hashing;
pub mod history;
pub mod normalizer;
pub mod scoring;
pub mod search;

pub use analysis::{
    Analysis, AnalysisError, AnalysisResult, AnalyzerConfig, CompanyResult, EsgAnalyzer,
    UserContext,
};
#[cfg(any(test, feature = "mock"))]
pub use cache::ManualClock;
pub use cache::{
    CacheStats, CacheStatus, CacheStore, Clock, ESG_CACHE_STATUS_HEADER, SystemClock,
};
pub use config::{Config, ConfigError};
pub use constants::{ESG_WEIGHTS, EsgWeights, SEARCH_WINDOW_DAYS};
pub use hashing::{CompanyKey, company_cache_key, fold_company_name, normalize_company_name};
pub use history::{HistoryError, HistoryRecorder, InMemoryHistory, NoopHistory, RecentSearch};
pub use normalizer::{
    MalformedEntry, NormalizationWarning, NormalizedBatch, NormalizedItem, RawPayload,
    ResultNormalizer,
};
pub use scoring::{
    CompanyScore, DimensionScores, EsgScores, RiskItem, ScoreSource, ScoredBatch, ScoringEngine,
};
#[cfg(any(test, feature = "mock"))]
pub use search::MockSearchClient;
pub use search::{OpenAiConfig, OpenAiSearchClient, SearchClient, SearchError};
