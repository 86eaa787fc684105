use std::sync::Arc;

use crate::analysis::EsgAnalyzer;
use crate::history::HistoryRecorder;

#[derive(Clone)]
pub struct HandlerState {
    pub analyzer: Arc<EsgAnalyzer>,

    /// Upper bound for `GET /v1/history?limit=`.
    pub history_limit: usize,
}

impl HandlerState {
    pub fn new(analyzer: Arc<EsgAnalyzer>, history_limit: usize) -> Self {
        Self {
            analyzer,
            history_limit: history_limit.max(1),
        }
    }

    pub fn history(&self) -> &Arc<dyn HistoryRecorder> {
        self.analyzer.history()
    }
}
