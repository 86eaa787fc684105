use thiserror::Error;

use crate::search::SearchError;

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The company name is empty after normalization.
    #[error("company name must not be empty")]
    InvalidCompanyName,

    /// The external search failed and no cached result exists.
    #[error("search unavailable for '{company}': {source}")]
    SearchUnavailable {
        company: String,
        #[source]
        source: SearchError,
    },
}

impl AnalysisError {
    pub fn is_search_unavailable(&self) -> bool {
        matches!(self, AnalysisError::SearchUnavailable { .. })
    }
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
