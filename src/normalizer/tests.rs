use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Value, json};

use super::*;
use crate::scoring::ScoreSource;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
}

fn entry(title: &str, date: &str) -> Value {
    json!({
        "title": title,
        "description": format!("{title} description"),
        "source": "Reuters",
        "url": format!("https://example.com/{title}"),
        "published_at": date,
        "scores": {"environment": 50, "social": 50, "governance": 50}
    })
}

fn normalize(value: Value) -> NormalizedBatch {
    ResultNormalizer::default().normalize(&RawPayload::json(value), now())
}

#[test]
fn test_unparseable_date_is_flagged_not_dropped() {
    let batch = normalize(json!({"articles": [
        entry("a", "2025-01-01"),
        entry("b", "2025-02-01"),
        entry("c", "not a date"),
        entry("d", "2025-03-01"),
        entry("e", "2025-04-01"),
    ]}));

    assert_eq!(batch.items.len(), 5);
    assert!(batch.warnings.is_empty());

    let flagged: Vec<_> = batch.items.iter().filter(|i| i.date_estimated).collect();
    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0].title, "c");
    assert_eq!(flagged[0].published_at, now());
    assert_eq!(batch.low_confidence_count(), 1);
}

#[test]
fn test_missing_text_entry_is_dropped_with_warning() {
    let batch = normalize(json!({"articles": [
        entry("a", "2025-01-01"),
        entry("b", "2025-02-01"),
        {"url": "https://example.com/orphan", "published_at": "2025-01-15"},
        entry("d", "2025-03-01"),
        entry("e", "2025-04-01"),
    ]}));

    assert_eq!(batch.items.len(), 4);
    assert_eq!(batch.warnings.len(), 1);
    assert_eq!(
        batch.warnings[0],
        NormalizationWarning::MalformedEntry {
            index: 2,
            reason: MalformedEntry::MissingText
        }
    );
    assert!(batch.warnings[0].is_entry_level());
}

#[test]
fn test_non_object_entries_are_isolated() {
    let batch = normalize(json!([entry("a", "2025-01-01"), 17, null, "text"]));
    assert_eq!(batch.items.len(), 1);
    assert_eq!(batch.warnings.len(), 3);
}

#[test]
fn test_items_sorted_most_recent_first() {
    let batch = normalize(json!([
        entry("old", "2024-01-01"),
        entry("new", "2025-05-01"),
        entry("mid", "2024-09-01"),
    ]));

    let titles: Vec<_> = batch.items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["new", "mid", "old"]);
}

#[test]
fn test_equal_timestamps_keep_input_order() {
    let batch = normalize(json!([
        entry("first", "2025-01-01"),
        entry("newest", "2025-03-01"),
        entry("second", "2025-01-01T00:00:00Z"),
        entry("third", "January 1, 2025"),
    ]));

    let titles: Vec<_> = batch.items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["newest", "first", "second", "third"]);
}

#[test]
fn test_upstream_scores_are_clamped_and_skip_classifier() {
    let batch = normalize(json!([{
        "title": "Oil spill pollution toxic waste",
        "published_at": "2025-01-01",
        "scores": {"environment": 150, "social": -10, "governance": "30"}
    }]));

    let item = &batch.items[0];
    assert_eq!(item.score_source, ScoreSource::Upstream);
    assert_eq!(item.dimensions.environment, 100.0);
    assert_eq!(item.dimensions.social, 0.0);
    assert_eq!(item.dimensions.governance, 30.0);
}

#[test]
fn test_partial_upstream_scores_default_missing_to_zero() {
    let batch = normalize(json!([{
        "title": "t",
        "published_at": "2025-01-01",
        "scores": {"social": 40}
    }]));
    let item = &batch.items[0];
    assert_eq!(item.score_source, ScoreSource::Upstream);
    assert_eq!(item.dimensions.environment, 0.0);
    assert_eq!(item.dimensions.social, 40.0);
}

#[test]
fn test_classifier_fallback_without_scores() {
    let batch = normalize(json!([{
        "title": "Regulator probes oil spill",
        "description": "Pollution reached the river",
        "published_at": "2025-01-01"
    }]));

    let item = &batch.items[0];
    assert_eq!(item.score_source, ScoreSource::KeywordClassifier);
    assert!(item.dimensions.environment > 0.0);
    assert_eq!(item.dimensions.governance, 0.0);
}

#[test]
fn test_missing_optional_fields_become_empty_strings() {
    let batch = normalize(json!([{"description": "Board fraud alleged"}]));
    let item = &batch.items[0];
    assert_eq!(item.title, "");
    assert_eq!(item.source, "");
    assert_eq!(item.url, "");
    assert!(item.date_estimated);
}

#[test]
fn test_truncates_to_max_items_after_sorting() {
    let entries: Vec<Value> = (1..=9)
        .map(|day| entry(&format!("d{day}"), &format!("2025-01-0{day}")))
        .collect();
    let batch = ResultNormalizer::new(3).normalize(&RawPayload::json(Value::Array(entries)), now());

    let titles: Vec<_> = batch.items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["d9", "d8", "d7"]);
}

#[test]
fn test_malformed_payload_yields_empty_batch_with_warning() {
    let batch = ResultNormalizer::default()
        .normalize(&RawPayload::text("I could not find any news."), now());

    assert!(batch.is_empty());
    assert_eq!(batch.warnings.len(), 1);
    assert!(matches!(
        batch.warnings[0],
        NormalizationWarning::MalformedPayload { .. }
    ));
}

#[test]
fn test_text_payload_with_overview() {
    let text = "Sure! ```json\n{\"overview\": \"Steel maker.\", \"articles\": [{\"title\": \"Worker fatality\", \"published_at\": \"2025-02-02\"}]}\n```";
    let batch = ResultNormalizer::default().normalize(&RawPayload::text(text), now());

    assert_eq!(batch.overview.as_deref(), Some("Steel maker."));
    assert_eq!(batch.items.len(), 1);
    assert!(batch.items[0].dimensions.social > 0.0);
}

#[test]
fn test_empty_articles_is_valid_empty_batch() {
    let batch = normalize(json!({"articles": []}));
    assert!(batch.is_empty());
    assert!(batch.warnings.is_empty());
}

#[test]
fn test_repeated_url_keeps_first_occurrence() {
    let mut repeat = entry("a", "2025-05-01");
    repeat["title"] = json!("a (syndicated)");
    repeat["url"] = json!("https://example.com/a");

    let batch = normalize(json!([entry("a", "2025-01-01"), entry("b", "2025-02-01"), repeat]));

    let titles: Vec<_> = batch.items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["b", "a"]);
    assert!(batch.warnings.is_empty());
}

#[test]
fn test_identical_entries_count_once() {
    let batch = normalize(json!([entry("a", "2025-01-01"), entry("a", "2025-01-01")]));
    assert_eq!(batch.items.len(), 1);
}

#[test]
fn test_repeated_title_without_url_is_dropped() {
    let batch = normalize(json!([
        {"title": "Plant fire", "published_at": "2025-01-01"},
        {"title": "Plant fire", "published_at": "2025-02-01"},
        {"title": "Plant fire", "url": "https://example.com/fire", "published_at": "2025-03-01"},
    ]));

    let dates: Vec<_> = batch.items.iter().map(|i| i.published_at.date_naive().to_string()).collect();
    assert_eq!(dates, vec!["2025-03-01", "2025-01-01"]);
}

#[test]
fn test_description_only_entries_are_not_deduplicated() {
    let batch = normalize(json!([
        {"description": "Board fraud alleged"},
        {"description": "Board fraud alleged"},
    ]));
    assert_eq!(batch.items.len(), 2);
}

#[test]
fn test_deduplication_happens_before_truncation() {
    let entries = json!([
        entry("d3", "2025-01-03"),
        entry("d3", "2025-01-03"),
        entry("d2", "2025-01-02"),
        entry("d1", "2025-01-01"),
    ]);
    let batch = ResultNormalizer::new(3).normalize(&RawPayload::json(entries), now());

    let titles: Vec<_> = batch.items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["d3", "d2", "d1"]);
}
