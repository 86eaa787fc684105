//! Bounded company-result cache with LRU eviction and TTL expiry.
//!
//! A single [`parking_lot::Mutex`] guards every read-modify-write, so concurrent
//! callers can never observe a torn recency order or exceed the capacity. The
//! store holds a handful of entries, so LRU victims are found with a linear scan.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use serde::Serialize;
use tokio::task::JoinHandle;
use tokio::time;
use tracing::debug;

use super::clock::{Clock, SystemClock};
use crate::analysis::CompanyResult;
use crate::constants::{DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL};
use crate::hashing::{CompanyKey, company_cache_key};

/// Internal wrapper around a cached result. Never leaves this module.
struct CacheEntry {
    value: Arc<CompanyResult>,
    inserted_at: Instant,
    last_used: u64,
}

impl CacheEntry {
    #[inline]
    fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.inserted_at) >= ttl
    }
}

/// Counters since construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
}

#[derive(Default)]
struct StoreState {
    entries: HashMap<CompanyKey, CacheEntry>,
    tick: u64,
    stats: CacheStats,
}

impl StoreState {
    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    fn purge_expired(&mut self, now: Instant, ttl: Duration) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now, ttl));
        let purged = before - self.entries.len();
        self.stats.expirations += purged as u64;
        purged
    }

    fn evict_lru(&mut self) -> Option<CompanyKey> {
        let victim = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_used)
            .map(|(key, _)| *key)?;
        self.entries.remove(&victim);
        self.stats.evictions += 1;
        Some(victim)
    }
}

/// Fixed-capacity, time-expiring store keyed by the hashed company name.
///
/// Constructed once at service start and passed explicitly to the analyzer.
pub struct CacheStore {
    state: Mutex<StoreState>,
    capacity: usize,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl CacheStore {
    /// Creates a store with the default capacity (10) and TTL (1 hour).
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL)
    }

    /// Creates a store with explicit bounds. A zero capacity is raised to one.
    pub fn with_limits(capacity: usize, ttl: Duration) -> Self {
        Self::with_clock(capacity, ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(capacity: usize, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
            capacity: capacity.max(1),
            ttl,
            clock,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Looks up a company; a hit refreshes its recency.
    #[inline]
    pub fn get(&self, company: &str) -> Option<Arc<CompanyResult>> {
        self.get_by_key(&company_cache_key(company))
    }

    /// Looks up a precomputed key. Expired entries are removed and reported absent.
    pub fn get_by_key(&self, key: &CompanyKey) -> Option<Arc<CompanyResult>> {
        let now = self.clock.now();
        let mut guard = self.state.lock();
        let state = &mut *guard;
        let tick = state.next_tick();

        match state.entries.get_mut(key) {
            None => {
                state.stats.misses += 1;
                return None;
            }
            Some(entry) if !entry.is_expired(now, self.ttl) => {
                entry.last_used = tick;
                let value = Arc::clone(&entry.value);
                state.stats.hits += 1;
                return Some(value);
            }
            Some(_) => {}
        }

        state.entries.remove(key);
        state.stats.expirations += 1;
        state.stats.misses += 1;
        debug!(key = %key.short_hex(), "Cache entry expired on lookup");
        None
    }

    /// Inserts or overwrites a company's result and returns its key.
    ///
    /// A new key arriving at capacity first drops expired entries, then evicts the
    /// least-recently-used one.
    pub fn put(&self, company: &str, result: Arc<CompanyResult>) -> CompanyKey {
        let key = company_cache_key(company);
        self.put_by_key(key, result);
        key
    }

    pub fn put_by_key(&self, key: CompanyKey, result: Arc<CompanyResult>) {
        let now = self.clock.now();
        let mut guard = self.state.lock();
        let state = &mut *guard;
        let tick = state.next_tick();

        if let Some(entry) = state.entries.get_mut(&key) {
            entry.value = result;
            entry.inserted_at = now;
            entry.last_used = tick;
            return;
        }

        if state.entries.len() >= self.capacity {
            let purged = state.purge_expired(now, self.ttl);
            if purged > 0 {
                debug!(purged, "Purged expired cache entries");
            }
        }
        while state.entries.len() >= self.capacity {
            match state.evict_lru() {
                Some(victim) => {
                    debug!(key = %victim.short_hex(), "Evicted least-recently-used entry")
                }
                None => break,
            }
        }

        state.entries.insert(
            key,
            CacheEntry {
                value: result,
                inserted_at: now,
                last_used: tick,
            },
        );
    }

    /// `true` if a live entry exists. Does not touch recency.
    pub fn contains(&self, company: &str) -> bool {
        let key = company_cache_key(company);
        let now = self.clock.now();
        self.state
            .lock()
            .entries
            .get(&key)
            .is_some_and(|entry| !entry.is_expired(now, self.ttl))
    }

    /// Drops every expired entry and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        self.state.lock().purge_expired(now, self.ttl)
    }

    /// Number of stored entries (expired ones linger until touched or purged).
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        self.state.lock().stats
    }
}

/// Spawns a task that purges expired entries every `period`.
///
/// Expired entries are otherwise only dropped when touched or when a full store
/// needs room. The task runs until aborted.
pub fn spawn_expiry_sweeper(store: Arc<CacheStore>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            let purged = store.purge_expired();
            if purged > 0 {
                debug!(purged, remaining = store.len(), "Swept expired cache entries");
            }
        }
    })
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheStore")
            .field("entries", &self.len())
            .field("capacity", &self.capacity)
            .field("ttl", &self.ttl)
            .finish()
    }
}
