use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::constants::{EsgWeights, clamp_score, round_score};

/// Where an item's dimension scores came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSource {
    /// Numeric scores supplied by the upstream AI search.
    Upstream,
    /// Heuristic fallback computed by the keyword classifier.
    KeywordClassifier,
}

impl ScoreSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreSource::Upstream => "upstream",
            ScoreSource::KeywordClassifier => "keyword_classifier",
        }
    }
}

impl std::fmt::Display for ScoreSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Environment / Social / Governance scores before weighting.
///
/// Values are clamped into `[0, 100]` on construction.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DimensionScores {
    pub environment: f64,
    pub social: f64,
    pub governance: f64,
}

impl DimensionScores {
    pub fn new(environment: f64, social: f64, governance: f64) -> Self {
        Self {
            environment: clamp_score(environment),
            social: clamp_score(social),
            governance: clamp_score(governance),
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn is_zero(&self) -> bool {
        self.environment == 0.0 && self.social == 0.0 && self.governance == 0.0
    }
}

/// Scored dimensions plus the derived weighted `overall`.
///
/// `overall` cannot be assigned independently: the only constructors compute it
/// from the dimensions and a weight set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EsgScores {
    environment: f64,
    social: f64,
    governance: f64,
    overall: f64,
}

impl EsgScores {
    /// Scores `dims` with the given weights.
    pub fn weighted(dims: DimensionScores, weights: &EsgWeights) -> Self {
        let dims = DimensionScores::new(dims.environment, dims.social, dims.governance);
        let total = weights.total();
        let overall = if total == 0 {
            0.0
        } else {
            let sum = dims.environment * f64::from(weights.environment)
                + dims.social * f64::from(weights.social)
                + dims.governance * f64::from(weights.governance);
            round_score(sum / f64::from(total))
        };

        Self {
            environment: dims.environment,
            social: dims.social,
            governance: dims.governance,
            overall,
        }
    }

    /// Scores `dims` with the default 4/3/3 weights.
    pub fn from_dimensions(dims: DimensionScores) -> Self {
        Self::weighted(dims, &EsgWeights::default())
    }

    pub fn environment(&self) -> f64 {
        self.environment
    }

    pub fn social(&self) -> f64 {
        self.social
    }

    pub fn governance(&self) -> f64 {
        self.governance
    }

    pub fn overall(&self) -> f64 {
        self.overall
    }

    pub fn dimensions(&self) -> DimensionScores {
        DimensionScores {
            environment: self.environment,
            social: self.social,
            governance: self.governance,
        }
    }
}

/// One normalized, scored news-derived record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskItem {
    pub title: String,
    pub description: String,
    pub source: String,
    pub url: String,
    pub published_at: DateTime<Utc>,
    /// The upstream date was missing or unparseable and `published_at` is the
    /// analysis-run time.
    pub date_estimated: bool,
    pub score_source: ScoreSource,
    pub scores: EsgScores,
}

impl RiskItem {
    /// `true` when the date was estimated or the scores are heuristic.
    pub fn is_low_confidence(&self) -> bool {
        self.date_estimated || self.score_source == ScoreSource::KeywordClassifier
    }

    /// Human-readable publication date (`Mar 04, 2025`).
    pub fn display_date(&self) -> String {
        self.published_at.format("%b %d, %Y").to_string()
    }
}

/// Company-level aggregate score.
///
/// An empty item list yields `value == 0.0` with `has_data == false`, which is
/// distinct from a genuinely clean company.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyScore {
    pub value: f64,
    pub has_data: bool,
}

impl CompanyScore {
    pub fn no_data() -> Self {
        Self {
            value: 0.0,
            has_data: false,
        }
    }
}

/// Output of [`ScoringEngine::score`](super::ScoringEngine::score).
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredBatch {
    pub items: Vec<RiskItem>,
    pub company_score: CompanyScore,
}
