//! Concurrency stress tests for the result cache and analyzer.

mod common;

use std::sync::Arc;
use std::thread;

use common::fixtures::{HOUR, Lcg, empty_result, harness, three_item_payload};
use esg::cache::CacheStore;
use esg::search::MockSearchClient;

const CAPACITY: usize = 10;
const THREADS: u64 = 8;
const OPS_PER_THREAD: usize = 2_000;
const KEY_SPACE: u64 = 40;

#[test]
fn test_store_never_exceeds_capacity_under_contention() {
    let store = Arc::new(CacheStore::with_limits(CAPACITY, HOUR));

    let handles: Vec<_> = (0..THREADS)
        .map(|seed| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let mut rng = Lcg::new(seed + 1);
                for _ in 0..OPS_PER_THREAD {
                    let company = format!("Company {}", rng.next_below(KEY_SPACE));
                    match rng.next_below(4) {
                        0 => {
                            store.put(&company, empty_result(&company));
                        }
                        1 => {
                            store.purge_expired();
                        }
                        _ => {
                            if let Some(result) = store.get(&company) {
                                assert_eq!(result.company(), company);
                            }
                        }
                    }
                    assert!(store.len() <= CAPACITY);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker thread panicked");
    }

    assert!(store.len() <= CAPACITY);
    let stats = store.stats();
    assert!(stats.hits + stats.misses > 0);
}

#[test]
fn test_concurrent_puts_of_one_key_keep_single_entry() {
    let store = Arc::new(CacheStore::with_limits(CAPACITY, HOUR));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for _ in 0..500 {
                    store.put("Shared Corp", empty_result("Shared Corp"));
                    assert!(store.get("shared corp").is_some());
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker thread panicked");
    }

    assert_eq!(store.len(), 1);
    assert_eq!(store.stats().evictions, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_analyses_respect_capacity() {
    let h = Arc::new(harness(MockSearchClient::returning(three_item_payload())));

    let tasks: Vec<_> = (0..64u64)
        .map(|seed| {
            let h = Arc::clone(&h);
            tokio::spawn(async move {
                let mut rng = Lcg::new(seed * 31 + 7);
                for _ in 0..20 {
                    let company = format!("Company {}", rng.next_below(25));
                    let analysis = h.analyzer.analyze(&company, None).await.unwrap();
                    assert_eq!(analysis.result.company(), company);
                    assert_eq!(analysis.result.overall_score(), 46.67);
                    assert!(h.analyzer.cache().len() <= CAPACITY);
                }
            })
        })
        .collect();

    for result in futures::future::join_all(tasks).await {
        result.expect("analysis task panicked");
    }

    assert!(h.analyzer.cache().len() <= CAPACITY);
    assert!(h.search.calls() >= CAPACITY);
}
