//! Payload and analyzer builders.

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use esg::analysis::{AnalyzerConfig, CompanyResult, EsgAnalyzer};
use esg::cache::{CacheStore, ManualClock};
use esg::history::{HistoryRecorder, InMemoryHistory};
use esg::normalizer::RawPayload;
use esg::scoring::ScoringEngine;
use esg::search::MockSearchClient;
use serde_json::{Value, json};

pub const HOUR: Duration = Duration::from_secs(3600);

/// One upstream article with explicit scores.
pub fn scored_article(title: &str, date: &str, e: f64, s: f64, g: f64) -> Value {
    json!({
        "title": title,
        "description": format!("{title}: details from the wire"),
        "source": "Reuters",
        "url": format!("https://news.example.com/{}", title.to_lowercase().replace(' ', "-")),
        "published_at": date,
        "scores": {"environment": e, "social": s, "governance": g}
    })
}

/// One upstream article without scores (keyword classifier path).
pub fn unscored_article(title: &str, description: &str, date: &str) -> Value {
    json!({
        "title": title,
        "description": description,
        "source": "Financial Times",
        "url": format!("https://news.example.com/{}", title.to_lowercase().replace(' ', "-")),
        "published_at": date,
    })
}

/// The three-item worked example: overalls 71, 19 and 50.
pub fn three_item_payload() -> RawPayload {
    RawPayload::json(json!({
        "overview": "Diversified industrial group.",
        "articles": [
            scored_article("Refinery spill", "2025-05-01", 80.0, 60.0, 70.0),
            scored_article("Supplier audit", "2025-04-01", 10.0, 20.0, 30.0),
            scored_article("Board reshuffle", "2025-03-01", 50.0, 50.0, 50.0),
        ]
    }))
}

pub struct Harness {
    pub analyzer: EsgAnalyzer,
    pub search: Arc<MockSearchClient>,
    pub history: Arc<InMemoryHistory>,
    pub clock: ManualClock,
}

pub fn harness(search: MockSearchClient) -> Harness {
    harness_with_capacity(search, 10)
}

pub fn harness_with_capacity(search: MockSearchClient, capacity: usize) -> Harness {
    let clock = ManualClock::new();
    let cache = Arc::new(CacheStore::with_clock(capacity, HOUR, Arc::new(clock.clone())));
    let search = Arc::new(search);
    let history = Arc::new(InMemoryHistory::new());
    let analyzer = EsgAnalyzer::new(
        cache,
        search.clone(),
        history.clone() as Arc<dyn HistoryRecorder>,
        AnalyzerConfig::default(),
    );
    Harness {
        analyzer,
        search,
        history,
        clock,
    }
}

/// A finished, empty result for direct cache tests.
pub fn empty_result(company: &str) -> Arc<CompanyResult> {
    Arc::new(CompanyResult::new(
        company,
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
        "",
        ScoringEngine::new().score(Vec::new()),
        730,
    ))
}

/// Deterministic linear congruential sequence for reproducible stress tests.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_below(&mut self, bound: u64) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 33) % bound
    }
}
