//! External AI search collaborator.
//!
//! The analyzer depends only on [`SearchClient`]; prompt wording and transport
//! live in the implementations.

pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod openai;

pub use error::{SearchError, SearchResult};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockSearchClient;
pub use openai::{OpenAiConfig, OpenAiSearchClient};

use async_trait::async_trait;

use crate::normalizer::RawPayload;

#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Searches news about `company` published within the last `window_days` days.
    async fn search(&self, company: &str, window_days: u32) -> SearchResult<RawPayload>;

    /// Short provider name for logs.
    fn name(&self) -> &'static str;
}
