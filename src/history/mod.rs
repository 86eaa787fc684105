//! Search-history collaborator.
//!
//! The analyzer only emits "company X was analyzed for user U at time T". How the
//! event is stored and trimmed is up to the [`HistoryRecorder`] implementation.
//! Recording is best-effort: a failure is logged and never fails an analysis.

pub mod error;
pub mod memory;

pub use error::{HistoryError, HistoryResult};
pub use memory::InMemoryHistory;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One analyzed-company event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchEvent {
    pub user: String,
    pub company: String,
    pub searched_at: DateTime<Utc>,
}

/// Most recent search of one company, as returned by [`InMemoryHistory::recent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentSearch {
    pub company: String,
    pub searched_at: DateTime<Utc>,
}

pub trait HistoryRecorder: Send + Sync {
    fn record(&self, user: &str, company: &str, at: DateTime<Utc>) -> HistoryResult<()>;

    /// Most recent distinct companies for `user`, newest first.
    fn recent(&self, _user: &str, _limit: usize) -> Vec<RecentSearch> {
        Vec::new()
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHistory;

impl HistoryRecorder for NoopHistory {
    fn record(&self, _user: &str, _company: &str, _at: DateTime<Utc>) -> HistoryResult<()> {
        Ok(())
    }
}
