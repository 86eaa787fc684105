use thiserror::Error;

/// Failure of the external search call as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// No API credentials are configured.
    #[error("search provider is not configured")]
    NotConfigured,

    /// Network-level failure or unexpected HTTP status.
    #[error("search transport failed: {0}")]
    Transport(String),

    /// Credentials were rejected.
    #[error("search provider rejected credentials (status {status})")]
    Auth { status: u16 },

    /// Rate limit or quota exhausted.
    #[error("search provider quota exceeded: {0}")]
    Quota(String),

    /// The call did not complete within the configured timeout.
    #[error("search timed out after {millis}ms")]
    Timeout { millis: u64 },

    /// The provider answered but the response envelope was unusable.
    #[error("invalid search response: {0}")]
    InvalidResponse(String),
}

impl SearchError {
    /// `true` for failures that may succeed on a later attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SearchError::Transport(_) | SearchError::Quota(_) | SearchError::Timeout { .. }
        )
    }

    pub fn kind(&self) -> &'static str {
        match self {
            SearchError::NotConfigured => "not_configured",
            SearchError::Transport(_) => "transport",
            SearchError::Auth { .. } => "auth",
            SearchError::Quota(_) => "quota",
            SearchError::Timeout { .. } => "timeout",
            SearchError::InvalidResponse(_) => "invalid_response",
        }
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SearchError::Timeout { millis: 0 }
        } else if err.is_decode() {
            SearchError::InvalidResponse(err.to_string())
        } else {
            SearchError::Transport(err.to_string())
        }
    }
}

pub type SearchResult<T> = Result<T, SearchError>;
