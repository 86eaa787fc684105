use std::collections::{HashMap, HashSet, VecDeque};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use super::error::{HistoryError, HistoryResult};
use super::{HistoryRecorder, RecentSearch, SearchEvent};
use crate::hashing::normalize_company_name;

/// Per-user in-memory history, trimmed to the last `per_user_limit` events.
#[derive(Debug)]
pub struct InMemoryHistory {
    per_user_limit: usize,
    events: RwLock<HashMap<String, VecDeque<SearchEvent>>>,
}

impl InMemoryHistory {
    pub const DEFAULT_PER_USER_LIMIT: usize = 10;

    pub fn new() -> Self {
        Self::with_limit(Self::DEFAULT_PER_USER_LIMIT)
    }

    pub fn with_limit(per_user_limit: usize) -> Self {
        Self {
            per_user_limit: per_user_limit.max(1),
            events: RwLock::new(HashMap::new()),
        }
    }

    /// Raw events for `user`, newest first.
    pub fn events(&self, user: &str) -> Vec<SearchEvent> {
        self.events
            .read()
            .get(user)
            .map(|q| q.iter().rev().cloned().collect())
            .unwrap_or_default()
    }

    pub fn total_events(&self) -> usize {
        self.events.read().values().map(VecDeque::len).sum()
    }
}

impl Default for InMemoryHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryRecorder for InMemoryHistory {
    fn record(&self, user: &str, company: &str, at: DateTime<Utc>) -> HistoryResult<()> {
        let user = user.trim();
        let company = normalize_company_name(company);
        if user.is_empty() || company.is_empty() {
            return Err(HistoryError::InvalidEvent {
                reason: "user and company must be non-empty".to_string(),
            });
        }

        let mut events = self.events.write();
        let queue = events.entry(user.to_string()).or_default();
        queue.push_back(SearchEvent {
            user: user.to_string(),
            company,
            searched_at: at,
        });
        while queue.len() > self.per_user_limit {
            queue.pop_front();
        }
        Ok(())
    }

    fn recent(&self, user: &str, limit: usize) -> Vec<RecentSearch> {
        let events = self.events.read();
        let Some(queue) = events.get(user.trim()) else {
            return Vec::new();
        };

        let mut ordered: Vec<&SearchEvent> = queue.iter().rev().collect();
        ordered.sort_by(|a, b| b.searched_at.cmp(&a.searched_at));

        let mut seen = HashSet::new();
        ordered
            .into_iter()
            .filter(|e| seen.insert(e.company.to_lowercase()))
            .take(limit)
            .map(|e| RecentSearch {
                company: e.company.clone(),
                searched_at: e.searched_at,
            })
            .collect()
    }
}
