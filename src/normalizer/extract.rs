//! Best-effort JSON extraction from model output.
//!
//! Model responses may be bare JSON, JSON inside Markdown fences, or JSON
//! surrounded by prose. Candidates are tried in that order.

use serde_json::Value;

/// Parses the first JSON document found in `text`.
pub fn extract_json(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Some(value);
    }

    for block in fenced_blocks(trimmed) {
        if let Ok(value) = serde_json::from_str::<Value>(block) {
            return Some(value);
        }
    }

    for (open, close) in [('{', '}'), ('[', ']')] {
        if let Some(candidate) = slice_between(trimmed, open, close) {
            if let Ok(value) = serde_json::from_str::<Value>(candidate) {
                return Some(value);
            }
        }
    }

    None
}

/// Contents of every ```` ``` ```` fenced block, language tag removed.
fn fenced_blocks(text: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find("```") {
        let after_fence = &rest[start + 3..];
        let Some(end) = after_fence.find("```") else {
            break;
        };
        let inner = &after_fence[..end];
        let inner = match inner.split_once('\n') {
            Some((tag, body)) if !tag.trim_start().starts_with(['{', '[']) => body,
            _ => inner,
        };
        blocks.push(inner.trim());
        rest = &after_fence[end + 3..];
    }

    blocks
}

fn slice_between(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    if end <= start {
        return None;
    }
    Some(&text[start..=end])
}
