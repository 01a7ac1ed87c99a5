//! Recovers structured content from the LLM-generated `*Json` article fields.
//!
//! Those fields are meant to hold a JSON object but regularly arrive wrapped
//! in a markdown fence or with trailing commas. Anything that still does not
//! parse into an object (or an array, which gets wrapped) is reported as
//! `None`; callers show a "not available" notice instead.

use serde_json::{Map, Value};
use tracing::warn;

/// Parsed `*Json` field. Always a mapping at the root.
pub type ContentTree = Map<String, Value>;

/// Key under which a bare top-level array is stored.
pub const WRAPPED_ARRAY_KEY: &str = "data";

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";
const SNIPPET_LEN: usize = 150;

pub fn parse_json_safely(input: Option<&str>) -> Option<ContentTree> {
    let raw = input?;
    if raw.trim().is_empty() {
        return None;
    }

    let cleaned = remove_trailing_commas(strip_fence(raw));
    match serde_json::from_str::<Value>(&cleaned) {
        Ok(Value::Object(map)) => Some(map),
        Ok(Value::Array(items)) => {
            let mut map = Map::new();
            map.insert(WRAPPED_ARRAY_KEY.to_string(), Value::Array(items));
            Some(map)
        }
        Ok(other) => {
            warn!("Structured field is a bare {} value, ignoring", type_name(&other));
            None
        }
        Err(e) => {
            warn!("Error parsing JSON: {}. Original string snippet: {}", e, snippet(raw));
            None
        }
    }
}

/// Removes one surrounding ```` ```json ```` or ```` ``` ```` fence.
pub fn strip_fence(raw: &str) -> &str {
    let s = raw.trim();
    if !s.ends_with(FENCE) {
        return s;
    }
    if s.starts_with(JSON_FENCE) && s.len() >= JSON_FENCE.len() + FENCE.len() {
        return s[JSON_FENCE.len()..s.len() - FENCE.len()].trim();
    }
    if s.starts_with(FENCE) && s.len() >= FENCE.len() * 2 {
        return s[FENCE.len()..s.len() - FENCE.len()].trim();
    }
    s
}

/// Drops commas that are followed (after whitespace) by `}` or `]`.
/// Commas inside string literals are left alone.
pub fn remove_trailing_commas(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut chars = s.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            ',' => {
                let next = s[i + 1..].chars().find(|ch| !ch.is_whitespace());
                if !matches!(next, Some('}') | Some(']')) {
                    out.push(c);
                }
            }
            _ => out.push(c),
        }
    }
    out
}

fn snippet(s: &str) -> String {
    s.chars().take(SNIPPET_LEN).collect()
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
