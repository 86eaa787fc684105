use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{SearchClient, SearchError, SearchResult};
use crate::normalizer::RawPayload;

/// Scripted search client.
///
/// Queued responses are consumed in order; once the queue is empty the fallback
/// response is returned on every call.
pub struct MockSearchClient {
    queued: Mutex<VecDeque<SearchResult<RawPayload>>>,
    fallback: Mutex<SearchResult<RawPayload>>,
    delay: Mutex<Option<Duration>>,
    calls: AtomicUsize,
    last_request: Mutex<Option<(String, u32)>>,
}

impl MockSearchClient {
    /// Always answers with `payload`.
    pub fn returning(payload: RawPayload) -> Self {
        Self::with_fallback(Ok(payload))
    }

    /// Always fails with `error`.
    pub fn failing(error: SearchError) -> Self {
        Self::with_fallback(Err(error))
    }

    fn with_fallback(fallback: SearchResult<RawPayload>) -> Self {
        Self {
            queued: Mutex::new(VecDeque::new()),
            fallback: Mutex::new(fallback),
            delay: Mutex::new(None),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Queues a one-shot response ahead of the fallback.
    pub fn push(&self, response: SearchResult<RawPayload>) {
        self.queued.lock().push_back(response);
    }

    /// Replaces the fallback response.
    pub fn set_fallback(&self, response: SearchResult<RawPayload>) {
        *self.fallback.lock() = response;
    }

    /// Sleeps this long before answering.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock() = Some(delay);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<(String, u32)> {
        self.last_request.lock().clone()
    }
}

#[async_trait]
impl SearchClient for MockSearchClient {
    async fn search(&self, company: &str, window_days: u32) -> SearchResult<RawPayload> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock() = Some((company.to_string(), window_days));

        let delay = *self.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let queued = self.queued.lock().pop_front();
        match queued {
            Some(response) => response,
            None => self.fallback.lock().clone(),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
