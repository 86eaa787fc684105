use thiserror::Error;

/// Why a single raw entry was excluded from the batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedEntry {
    /// The entry is not a JSON object.
    #[error("entry is not an object (found {found})")]
    NotAnObject { found: &'static str },

    /// Neither a title nor a description is present.
    #[error("entry has no title or description")]
    MissingText,

    /// A text field holds a structured value.
    #[error("field '{field}' has unsupported type {found}")]
    InvalidField {
        field: &'static str,
        found: &'static str,
    },
}

/// Non-fatal issue raised while normalizing a payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizationWarning {
    /// One entry was dropped; the rest of the batch is unaffected.
    #[error("entry {index} dropped: {reason}")]
    MalformedEntry {
        index: usize,
        #[source]
        reason: MalformedEntry,
    },

    /// The payload envelope itself could not be read, so no entries were found.
    #[error("payload could not be parsed: {reason}")]
    MalformedPayload { reason: String },
}

impl NormalizationWarning {
    pub fn is_entry_level(&self) -> bool {
        matches!(self, NormalizationWarning::MalformedEntry { .. })
    }
}

/// JSON type name used in warnings.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
