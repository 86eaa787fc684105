//! Validated intermediate representation of the loosely structured search payload.
//!
//! Nothing in this module escapes the normalizer: [`RawEntry`] is converted into a
//! [`NormalizedItem`](super::NormalizedItem) and then discarded.

use serde_json::{Map, Value};

use super::error::{MalformedEntry, json_kind};
use super::extract::extract_json;

/// Payload exactly as returned by a search client.
#[derive(Debug, Clone, PartialEq)]
pub enum RawPayload {
    /// Model output text, possibly wrapping JSON in fences or prose.
    Text(String),
    /// Already-decoded JSON.
    Json(Value),
}

impl RawPayload {
    pub fn text(text: impl Into<String>) -> Self {
        RawPayload::Text(text.into())
    }

    pub fn json(value: Value) -> Self {
        RawPayload::Json(value)
    }
}

/// Top-level shape: optional overview plus the list of undecoded entries.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawEnvelope {
    pub overview: Option<String>,
    pub entries: Vec<Value>,
}

const ENTRY_LIST_KEYS: &[&str] = &["articles", "items"];

impl RawEnvelope {
    /// Reads the envelope; `Err` carries a human-readable reason.
    pub fn from_payload(payload: &RawPayload) -> Result<Self, String> {
        match payload {
            RawPayload::Json(value) => Self::from_value(value),
            RawPayload::Text(text) => match extract_json(text) {
                Some(value) => Self::from_value(&value),
                None => Err("no JSON document found in response text".to_string()),
            },
        }
    }

    fn from_value(value: &Value) -> Result<Self, String> {
        match value {
            Value::Array(entries) => Ok(Self {
                overview: None,
                entries: entries.clone(),
            }),
            Value::Object(map) => {
                let overview = map
                    .get("overview")
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string);

                let list = ENTRY_LIST_KEYS.iter().find_map(|key| map.get(*key));
                match list {
                    Some(Value::Array(entries)) => Ok(Self {
                        overview,
                        entries: entries.clone(),
                    }),
                    Some(Value::Null) | None if overview.is_some() => Ok(Self {
                        overview,
                        entries: Vec::new(),
                    }),
                    Some(other) => Err(format!(
                        "entry list must be an array, found {}",
                        json_kind(other)
                    )),
                    None => Err("object has no 'articles' or 'items' array".to_string()),
                }
            }
            other => Err(format!(
                "expected an object or array, found {}",
                json_kind(other)
            )),
        }
    }
}

/// Publication date as found upstream.
#[derive(Debug, Clone, PartialEq)]
pub enum RawDate {
    Text(String),
    Timestamp(i64),
}

/// Upstream numeric scores; a dimension is `None` when absent or non-numeric.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RawScores {
    pub environment: Option<f64>,
    pub social: Option<f64>,
    pub governance: Option<f64>,
}

impl RawScores {
    pub fn has_any(&self) -> bool {
        self.environment.is_some() || self.social.is_some() || self.governance.is_some()
    }
}

/// One entry with explicit per-field optionality.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawEntry {
    pub title: Option<String>,
    pub description: Option<String>,
    pub source: Option<String>,
    pub url: Option<String>,
    pub date: Option<RawDate>,
    /// `Some` only when at least one dimension is numeric.
    pub scores: Option<RawScores>,
}

const DATE_KEYS: &[&str] = &["published_at", "publishedAt", "date"];
const SCORE_KEYS: &[&str] = &["scores", "esg_scores"];

impl RawEntry {
    pub fn from_value(value: &Value) -> Result<Self, MalformedEntry> {
        let Value::Object(map) = value else {
            return Err(MalformedEntry::NotAnObject {
                found: json_kind(value),
            });
        };

        let entry = Self {
            title: text_field(map, "title")?,
            description: text_field(map, "description")?,
            source: text_field(map, "source")?,
            url: text_field(map, "url")?,
            date: date_field(map),
            scores: scores_field(map),
        };

        if entry.title.is_none() && entry.description.is_none() {
            return Err(MalformedEntry::MissingText);
        }

        Ok(entry)
    }
}

fn text_field(map: &Map<String, Value>, field: &'static str) -> Result<Option<String>, MalformedEntry> {
    match map.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
        }
        Some(v @ (Value::Number(_) | Value::Bool(_))) => Ok(Some(v.to_string())),
        Some(other) => Err(MalformedEntry::InvalidField {
            field,
            found: json_kind(other),
        }),
    }
}

fn date_field(map: &Map<String, Value>) -> Option<RawDate> {
    let value = DATE_KEYS
        .iter()
        .filter_map(|key| map.get(*key))
        .find(|v| !v.is_null())?;

    match value {
        Value::String(s) => Some(RawDate::Text(s.clone())),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .map(RawDate::Timestamp),
        _ => None,
    }
}

fn scores_field(map: &Map<String, Value>) -> Option<RawScores> {
    let Value::Object(scores) = SCORE_KEYS.iter().find_map(|key| map.get(*key))? else {
        return None;
    };

    let raw = RawScores {
        environment: scores.get("environment").and_then(coerce_number),
        social: scores.get("social").and_then(coerce_number),
        governance: scores.get("governance").and_then(coerce_number),
    };

    raw.has_any().then_some(raw)
}

/// Numbers and numeric strings; non-finite values count as absent.
fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_from_articles_object() {
        let payload = RawPayload::json(json!({
            "overview": "  Big oil company. ",
            "articles": [{"title": "a"}, {"title": "b"}]
        }));
        let env = RawEnvelope::from_payload(&payload).unwrap();
        assert_eq!(env.overview.as_deref(), Some("Big oil company."));
        assert_eq!(env.entries.len(), 2);
    }

    #[test]
    fn test_envelope_from_items_key_and_bare_array() {
        let env = RawEnvelope::from_payload(&RawPayload::json(json!({"items": [{}]}))).unwrap();
        assert_eq!(env.entries.len(), 1);

        let env = RawEnvelope::from_payload(&RawPayload::json(json!([{}, {}, {}]))).unwrap();
        assert_eq!(env.entries.len(), 3);
        assert!(env.overview.is_none());
    }

    #[test]
    fn test_envelope_from_fenced_text() {
        let text = "```json\n{\"articles\": [{\"title\": \"x\"}]}\n```";
        let env = RawEnvelope::from_payload(&RawPayload::text(text)).unwrap();
        assert_eq!(env.entries.len(), 1);
    }

    #[test]
    fn test_envelope_overview_only() {
        let env = RawEnvelope::from_payload(&RawPayload::json(json!({"overview": "x"}))).unwrap();
        assert!(env.entries.is_empty());
    }

    #[test]
    fn test_envelope_errors() {
        assert!(RawEnvelope::from_payload(&RawPayload::text("sorry, I can't")).is_err());
        assert!(RawEnvelope::from_payload(&RawPayload::json(json!({"foo": 1}))).is_err());
        assert!(RawEnvelope::from_payload(&RawPayload::json(json!({"articles": "x"}))).is_err());
        assert!(RawEnvelope::from_payload(&RawPayload::json(json!(42))).is_err());
    }

    #[test]
    fn test_entry_full() {
        let entry = RawEntry::from_value(&json!({
            "title": " Spill ",
            "description": "Oil spill in delta",
            "source": "Reuters",
            "url": "https://example.com/spill",
            "published_at": "2024-05-01",
            "scores": {"environment": 80, "social": "20.5", "governance": null}
        }))
        .unwrap();

        assert_eq!(entry.title.as_deref(), Some("Spill"));
        assert_eq!(entry.date, Some(RawDate::Text("2024-05-01".to_string())));
        let scores = entry.scores.unwrap();
        assert_eq!(scores.environment, Some(80.0));
        assert_eq!(scores.social, Some(20.5));
        assert_eq!(scores.governance, None);
    }

    #[test]
    fn test_entry_date_aliases() {
        let e = RawEntry::from_value(&json!({"title": "t", "publishedAt": "x"})).unwrap();
        assert_eq!(e.date, Some(RawDate::Text("x".to_string())));

        let e = RawEntry::from_value(&json!({"title": "t", "published_at": null, "date": 1714521600}))
            .unwrap();
        assert_eq!(e.date, Some(RawDate::Timestamp(1_714_521_600)));
    }

    #[test]
    fn test_entry_scores_without_numbers_is_none() {
        let e = RawEntry::from_value(&json!({
            "title": "t",
            "scores": {"environment": "high", "social": null}
        }))
        .unwrap();
        assert!(e.scores.is_none());

        let e = RawEntry::from_value(&json!({"title": "t", "scores": [1, 2, 3]})).unwrap();
        assert!(e.scores.is_none());
    }

    #[test]
    fn test_entry_esg_scores_alias() {
        let e = RawEntry::from_value(&json!({"title": "t", "esg_scores": {"governance": 55}}))
            .unwrap();
        assert_eq!(e.scores.unwrap().governance, Some(55.0));
    }

    #[test]
    fn test_entry_missing_text_is_malformed() {
        assert_eq!(
            RawEntry::from_value(&json!({"url": "https://x", "title": "   "})),
            Err(MalformedEntry::MissingText)
        );
    }

    #[test]
    fn test_entry_not_object() {
        assert_eq!(
            RawEntry::from_value(&json!("just a string")),
            Err(MalformedEntry::NotAnObject { found: "string" })
        );
    }

    #[test]
    fn test_entry_structured_text_field_is_malformed() {
        assert_eq!(
            RawEntry::from_value(&json!({"title": {"en": "x"}, "description": "d"})),
            Err(MalformedEntry::InvalidField {
                field: "title",
                found: "object"
            })
        );
    }

    #[test]
    fn test_entry_scalar_text_fields_are_stringified() {
        let e = RawEntry::from_value(&json!({"title": 2024, "source": true})).unwrap();
        assert_eq!(e.title.as_deref(), Some("2024"));
        assert_eq!(e.source.as_deref(), Some("true"));
    }

    #[test]
    fn test_coerce_number_rejects_non_finite() {
        assert_eq!(coerce_number(&json!("NaN")), None);
        assert_eq!(coerce_number(&json!("inf")), None);
        assert_eq!(coerce_number(&json!(" 42 ")), Some(42.0));
    }
}
