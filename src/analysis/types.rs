use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cache::CacheStatus;
use crate::scoring::{RiskItem, ScoredBatch};

/// The cacheable analysis output for one company. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyResult {
    company: String,
    generated_at: DateTime<Utc>,
    overview: String,
    items: Vec<RiskItem>,
    overall_score: f64,
    has_data: bool,
    total_items: usize,
    search_window_days: u32,
}

impl CompanyResult {
    pub fn new(
        company: impl Into<String>,
        generated_at: DateTime<Utc>,
        overview: impl Into<String>,
        scored: ScoredBatch,
        search_window_days: u32,
    ) -> Self {
        let total_items = scored.items.len();
        Self {
            company: company.into(),
            generated_at,
            overview: overview.into(),
            items: scored.items,
            overall_score: scored.company_score.value,
            has_data: scored.company_score.has_data,
            total_items,
            search_window_days,
        }
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    /// `Jun 01, 2025 at 09:00 AM UTC`.
    pub fn generated_at_display(&self) -> String {
        self.generated_at.format("%b %d, %Y at %I:%M %p UTC").to_string()
    }

    pub fn overview(&self) -> &str {
        &self.overview
    }

    pub fn items(&self) -> &[RiskItem] {
        &self.items
    }

    pub fn overall_score(&self) -> f64 {
        self.overall_score
    }

    /// `false` when no usable items were found ("no news" rather than "clean").
    pub fn has_data(&self) -> bool {
        self.has_data
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn search_window_days(&self) -> u32 {
        self.search_window_days
    }
}

/// Caller identity used only for history events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserContext {
    pub user_id: String,
}

impl UserContext {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

/// Result of [`EsgAnalyzer::analyze`](super::EsgAnalyzer::analyze).
#[derive(Debug, Clone)]
pub struct Analysis {
    pub result: Arc<CompanyResult>,
    pub cache_status: CacheStatus,
    /// Normalization warnings raised while building this result (always empty on a hit).
    pub warnings: usize,
}

impl Analysis {
    pub fn is_hit(&self) -> bool {
        self.cache_status.is_hit()
    }
}
