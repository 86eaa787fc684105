use chrono::{DateTime, Utc};

use super::error::NormalizationWarning;
use crate::scoring::{DimensionScores, ScoreSource};

/// A validated entry awaiting weighting by the scoring engine.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedItem {
    pub title: String,
    pub description: String,
    pub source: String,
    pub url: String,
    pub published_at: DateTime<Utc>,
    pub date_estimated: bool,
    pub score_source: ScoreSource,
    pub dimensions: DimensionScores,
}

/// Outcome of normalizing one payload. Never a failure: problems become warnings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalizedBatch {
    pub overview: Option<String>,
    /// Most recent first; equal timestamps keep input order.
    pub items: Vec<NormalizedItem>,
    pub warnings: Vec<NormalizationWarning>,
}

impl NormalizedBatch {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn low_confidence_count(&self) -> usize {
        self.items
            .iter()
            .filter(|i| i.date_estimated || i.score_source == ScoreSource::KeywordClassifier)
            .count()
    }
}
