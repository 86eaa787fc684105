//! Cross-cutting, shared constants.
//!
//! Scoring weights and cache bounds are defined once here so that tests and future
//! tuning target a single location.

use std::time::Duration;

/// Look-back window handed to the external search client, in days (~2 years).
pub const SEARCH_WINDOW_DAYS: u32 = 730;

/// Maximum number of live entries in the result cache.
pub const DEFAULT_CACHE_CAPACITY: usize = 10;

/// Time-to-live of a cache entry, counted from insertion.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 60 * 60;

/// Default TTL as a [`Duration`].
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(DEFAULT_CACHE_TTL_SECS);

/// Maximum number of risk items kept per company after sorting.
pub const DEFAULT_MAX_ITEMS: usize = 50;

/// Default timeout applied to a single external search call.
pub const DEFAULT_SEARCH_TIMEOUT_SECS: u64 = 60;

/// Decimal places kept for every derived score.
pub const SCORE_PRECISION: i32 = 2;

/// Lower bound of every dimension score.
pub const SCORE_MIN: f64 = 0.0;

/// Upper bound of every dimension score.
pub const SCORE_MAX: f64 = 100.0;

/// Relative weight of one ESG dimension in the per-item overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EsgWeights {
    pub environment: u32,
    pub social: u32,
    pub governance: u32,
}

impl EsgWeights {
    /// Sum of all three weights (the divisor of the weighted mean).
    pub const fn total(&self) -> u32 {
        self.environment + self.social + self.governance
    }
}

impl Default for EsgWeights {
    fn default() -> Self {
        ESG_WEIGHTS
    }
}

/// Environment 4, Social 3, Governance 3.
pub const ESG_WEIGHTS: EsgWeights = EsgWeights {
    environment: 4,
    social: 3,
    governance: 3,
};

/// Rounds `value` to [`SCORE_PRECISION`] decimal places.
#[inline]
pub fn round_score(value: f64) -> f64 {
    let factor = 10f64.powi(SCORE_PRECISION);
    (value * factor).round() / factor
}

/// Clamps `value` into `[SCORE_MIN, SCORE_MAX]`.
#[inline]
pub fn clamp_score(value: f64) -> f64 {
    value.clamp(SCORE_MIN, SCORE_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_total_ten() {
        assert_eq!(ESG_WEIGHTS.total(), 10);
        assert_eq!(EsgWeights::default(), ESG_WEIGHTS);
    }

    #[test]
    fn test_round_score_two_places() {
        assert_eq!(round_score(46.666_666), 46.67);
        assert_eq!(round_score(17.0), 17.0);
        assert_eq!(round_score(0.005), 0.01);
    }

    #[test]
    fn test_clamp_score_bounds() {
        assert_eq!(clamp_score(-5.0), 0.0);
        assert_eq!(clamp_score(150.0), 100.0);
        assert_eq!(clamp_score(42.5), 42.5);
    }

    #[test]
    fn test_default_ttl_is_one_hour() {
        assert_eq!(DEFAULT_CACHE_TTL, Duration::from_secs(3600));
    }
}
