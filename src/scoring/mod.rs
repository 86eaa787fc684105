//! Per-item and company-level ESG scoring.
//!
//! Each item's `overall` is the weighted mean `(E*4 + S*3 + G*3) / 10` rounded to
//! two decimals (see [`crate::constants::ESG_WEIGHTS`]). The company score is the
//! arithmetic mean of item overalls; an empty batch is flagged `has_data = false`.

pub mod engine;
pub mod types;


pub use engine::ScoringEngine;
pub use types::{CompanyScore, DimensionScores, EsgScores, RiskItem, ScoreSource, ScoredBatch};
