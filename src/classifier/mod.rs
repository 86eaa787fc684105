//! Keyword-based ESG dimension hints.
//!
//! A deterministic, pure fallback used only when an upstream entry carries no
//! numeric scores. Text is lowercased and split into alphanumeric tokens; every
//! dictionary hit adds its weight to the matching dimension. The weighted hit
//! count is divided by the token count and scaled so that a keyword density of
//! [`SATURATION_DENSITY`] or more maps to 100.

pub mod keywords;

use crate::constants::round_score;
use crate::scoring::DimensionScores;

use keywords::{ENVIRONMENTAL_KEYWORDS, GOVERNANCE_KEYWORDS, SOCIAL_KEYWORDS, keyword_weight};

/// Weighted hits per token at which a dimension saturates at 100.
pub const SATURATION_DENSITY: f64 = 0.10;

/// Classifies `text` into heuristic `[0, 100]` dimension scores.
///
/// Empty or whitespace-only text yields all zeros.
pub fn classify(text: &str) -> DimensionScores {
    let tokens = tokenize(text);
    if tokens.is_empty() {
        return DimensionScores::zero();
    }

    DimensionScores::new(
        dimension_score(&tokens, ENVIRONMENTAL_KEYWORDS),
        dimension_score(&tokens, SOCIAL_KEYWORDS),
        dimension_score(&tokens, GOVERNANCE_KEYWORDS),
    )
}

/// Weighted keyword hits of one dictionary in `text` (exposed for diagnostics).
pub fn weighted_hits(text: &str, dictionary: &[&str]) -> u32 {
    weighted_hits_in(&tokenize(text), dictionary)
}

fn dimension_score(tokens: &[String], dictionary: &[&str]) -> f64 {
    let hits = weighted_hits_in(tokens, dictionary);
    if hits == 0 {
        return 0.0;
    }
    let density = f64::from(hits) / tokens.len() as f64;
    round_score((density / SATURATION_DENSITY * 100.0).min(100.0))
}

fn weighted_hits_in(tokens: &[String], dictionary: &[&str]) -> u32 {
    dictionary
        .iter()
        .map(|keyword| {
            let phrase: Vec<&str> = keyword.split(' ').collect();
            count_phrase(tokens, &phrase) * keyword_weight(keyword)
        })
        .sum()
}

fn count_phrase(tokens: &[String], phrase: &[&str]) -> u32 {
    if phrase.is_empty() || tokens.len() < phrase.len() {
        return 0;
    }
    tokens
        .windows(phrase.len())
        .filter(|window| window.iter().zip(phrase).all(|(t, p)| t == p))
        .count() as u32
}

fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}
