//! Raw search payload → validated, ordered risk items.
//!
//! Each entry is parsed independently into a [`raw::RawEntry`]. A failure excludes
//! only that entry and is reported as a [`NormalizationWarning`]; the batch as a
//! whole never fails. Unparseable dates fall back to the analysis-run time and are
//! flagged `date_estimated`. Entries without numeric upstream scores are scored by
//! the keyword [`classifier`](crate::classifier). Repeats of an earlier entry's URL
//! (or title, when the URL is empty) are dropped; the first occurrence wins.

pub mod dates;
pub mod error;
pub mod extract;
pub mod raw;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::{MalformedEntry, NormalizationWarning};
pub use raw::{RawEnvelope, RawPayload};
pub use types::{NormalizedBatch, NormalizedItem};

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::classifier;
use crate::constants::DEFAULT_MAX_ITEMS;
use crate::scoring::{DimensionScores, ScoreSource};

use raw::RawEntry;

/// Converts raw payloads into [`NormalizedBatch`]es.
#[derive(Debug, Clone, Copy)]
pub struct ResultNormalizer {
    max_items: usize,
}

impl Default for ResultNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ITEMS)
    }
}

impl ResultNormalizer {
    pub fn new(max_items: usize) -> Self {
        Self { max_items }
    }

    pub fn max_items(&self) -> usize {
        self.max_items
    }

    /// Normalizes `payload`; `now` is used for entries with unusable dates.
    pub fn normalize(&self, payload: &RawPayload, now: DateTime<Utc>) -> NormalizedBatch {
        let envelope = match RawEnvelope::from_payload(payload) {
            Ok(envelope) => envelope,
            Err(reason) => {
                warn!(reason = %reason, "Search payload could not be parsed");
                return NormalizedBatch {
                    overview: None,
                    items: Vec::new(),
                    warnings: vec![NormalizationWarning::MalformedPayload { reason }],
                };
            }
        };

        let mut items = Vec::with_capacity(envelope.entries.len());
        let mut warnings = Vec::new();
        let mut seen = HashSet::new();

        for (index, value) in envelope.entries.iter().enumerate() {
            match RawEntry::from_value(value) {
                Ok(entry) => {
                    if let Some(key) = Self::identity(&entry)
                        && !seen.insert(key.to_owned())
                    {
                        debug!(index, key, "Skipping duplicate search entry");
                        continue;
                    }
                    items.push(Self::to_item(entry, now));
                }
                Err(reason) => {
                    warn!(index, reason = %reason, "Dropping malformed search entry");
                    warnings.push(NormalizationWarning::MalformedEntry { index, reason });
                }
            }
        }

        // Stable: equal timestamps keep their input order.
        items.sort_by(|a, b| b.published_at.cmp(&a.published_at));

        if items.len() > self.max_items {
            debug!(
                kept = self.max_items,
                dropped = items.len() - self.max_items,
                "Truncating to most recent items"
            );
            items.truncate(self.max_items);
        }

        NormalizedBatch {
            overview: envelope.overview,
            items,
            warnings,
        }
    }

    /// URL, falling back to title. Entries with neither are never treated as repeats.
    fn identity(entry: &RawEntry) -> Option<&str> {
        entry.url.as_deref().or(entry.title.as_deref())
    }

    fn to_item(entry: RawEntry, now: DateTime<Utc>) -> NormalizedItem {
        let parsed = entry.date.as_ref().and_then(dates::parse_published_at);
        let date_estimated = parsed.is_none();
        if date_estimated {
            debug!(date = ?entry.date, "Unusable publication date, using analysis time");
        }

        let (dimensions, score_source) = match entry.scores {
            Some(scores) => (
                DimensionScores::new(
                    scores.environment.unwrap_or(0.0),
                    scores.social.unwrap_or(0.0),
                    scores.governance.unwrap_or(0.0),
                ),
                ScoreSource::Upstream,
            ),
            None => {
                let text = [entry.title.as_deref(), entry.description.as_deref()]
                    .into_iter()
                    .flatten()
                    .collect::<Vec<_>>()
                    .join(" ");
                (classifier::classify(&text), ScoreSource::KeywordClassifier)
            }
        };

        NormalizedItem {
            title: entry.title.unwrap_or_default(),
            description: entry.description.unwrap_or_default(),
            source: entry.source.unwrap_or_default(),
            url: entry.url.unwrap_or_default(),
            published_at: parsed.unwrap_or(now),
            date_estimated,
            score_source,
            dimensions,
        }
    }
}
