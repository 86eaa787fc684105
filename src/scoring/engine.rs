use tracing::debug;

use crate::constants::{EsgWeights, round_score};
use crate::normalizer::NormalizedItem;

use super::types::{CompanyScore, EsgScores, RiskItem, ScoredBatch};

/// Computes per-item weighted scores and the company-level mean.
///
/// No recency or severity re-weighting is applied; item order is preserved.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine {
    weights: EsgWeights,
}

impl ScoringEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(weights: EsgWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &EsgWeights {
        &self.weights
    }

    pub fn score_item(&self, item: NormalizedItem) -> RiskItem {
        RiskItem {
            title: item.title,
            description: item.description,
            source: item.source,
            url: item.url,
            published_at: item.published_at,
            date_estimated: item.date_estimated,
            score_source: item.score_source,
            scores: EsgScores::weighted(item.dimensions, &self.weights),
        }
    }

    pub fn score(&self, items: Vec<NormalizedItem>) -> ScoredBatch {
        let items: Vec<RiskItem> = items.into_iter().map(|i| self.score_item(i)).collect();
        let company_score = Self::company_score(&items);

        debug!(
            items = items.len(),
            company_score = company_score.value,
            has_data = company_score.has_data,
            "Scored risk items"
        );

        ScoredBatch {
            items,
            company_score,
        }
    }

    /// Arithmetic mean of item overalls, rounded to the score precision.
    pub fn company_score(items: &[RiskItem]) -> CompanyScore {
        if items.is_empty() {
            return CompanyScore::no_data();
        }

        let sum: f64 = items.iter().map(|i| i.scores.overall()).sum();
        CompanyScore {
            value: round_score(sum / items.len() as f64),
            has_data: true,
        }
    }
}
