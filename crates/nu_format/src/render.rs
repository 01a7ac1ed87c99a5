//! Turns a [`ContentTree`](crate::extract::ContentTree) into a display tree of
//! headings, paragraphs and bullet lists.
//!
//! Every function returns `None` when there is nothing left to show, so the
//! caller can drop the surrounding heading.

use serde_json::{Map, Value};

use crate::highlight::{split_highlights, HighlightSegment};
use crate::text::{capitalize_sentence, format_key};

#[derive(Debug, Clone, PartialEq)]
pub enum RenderNode {
    /// Capitalized plain text.
    Text(String),
    /// Summary-mode text split on highlight markers.
    Highlighted(Vec<HighlightSegment>),
    List { level: usize, items: Vec<RenderNode> },
    Object { level: usize, entries: Vec<RenderEntry> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderEntry {
    pub label: String,
    pub value: RenderNode,
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Text leaf. `summary` selects highlight splitting over capitalization.
pub fn render_text(text: &str, summary: bool) -> Option<RenderNode> {
    if summary {
        let segments = split_highlights(text);
        (!segments.is_empty()).then_some(RenderNode::Highlighted(segments))
    } else {
        let sentence = capitalize_sentence(text);
        (!sentence.is_empty()).then_some(RenderNode::Text(sentence))
    }
}

/// Renders a mapping at `level`; entries keep their insertion order.
pub fn render_object(map: &Map<String, Value>, summary: bool, level: usize) -> Option<RenderNode> {
    let entries: Vec<RenderEntry> = map
        .iter()
        .filter(|(_, value)| !is_blank(value))
        .filter_map(|(key, value)| {
            render_value(value, summary, level).map(|value| RenderEntry {
                label: format_key(key),
                value,
            })
        })
        .collect();

    (!entries.is_empty()).then_some(RenderNode::Object { level, entries })
}

/// Renders the value of an entry that lives in a mapping at `level`.
pub fn render_value(value: &Value, summary: bool, level: usize) -> Option<RenderNode> {
    match value {
        Value::Null => None,
        Value::String(s) => render_text(s, summary),
        Value::Bool(b) => Some(RenderNode::Text(b.to_string())),
        Value::Number(n) => Some(RenderNode::Text(n.to_string())),
        Value::Array(items) => render_list(items, summary, level + 1),
        Value::Object(map) => render_object(map, summary, level + 1),
    }
}

/// Bullet list at `level`. Mapping and list items nest one level deeper.
pub fn render_list(items: &[Value], summary: bool, level: usize) -> Option<RenderNode> {
    let items: Vec<RenderNode> = items
        .iter()
        .filter(|item| !is_blank(item))
        .filter_map(|item| match item {
            Value::Object(map) => render_object(map, summary, level + 1),
            Value::Array(nested) => render_list(nested, summary, level + 1),
            other => render_value(other, summary, level),
        })
        .collect();

    (!items.is_empty()).then_some(RenderNode::List { level, items })
}

/// Bullet list over already-split free text.
pub fn render_bullets<S: AsRef<str>>(items: &[S], summary: bool) -> Option<RenderNode> {
    let items: Vec<RenderNode> = items
        .iter()
        .filter_map(|item| render_text(item.as_ref(), summary))
        .collect();
    (!items.is_empty()).then_some(RenderNode::List { level: 0, items })
}

impl RenderNode {
    /// Plain-text rendering with two spaces of indent per depth.
    /// `emphasis` decides how emphasized segments are written.
    pub fn write_text<F>(&self, depth: usize, emphasis: &F, out: &mut String)
    where
        F: Fn(&str) -> String,
    {
        let pad = "  ".repeat(depth);
        match self {
            RenderNode::Text(_) | RenderNode::Highlighted(_) => {
                if let Some(line) = self.inline(emphasis) {
                    out.push_str(&pad);
                    out.push_str(&line);
                    out.push('\n');
                }
            }
            RenderNode::List { items, .. } => {
                for item in items {
                    match item.inline(emphasis) {
                        Some(line) => {
                            out.push_str(&format!("{}• {}\n", pad, line));
                        }
                        None => {
                            out.push_str(&format!("{}•\n", pad));
                            item.write_text(depth + 1, emphasis, out);
                        }
                    }
                }
            }
            RenderNode::Object { entries, .. } => {
                for entry in entries {
                    match entry.value.inline(emphasis) {
                        Some(line) => out.push_str(&format!("{}{}: {}\n", pad, entry.label, line)),
                        None => {
                            out.push_str(&format!("{}{}:\n", pad, entry.label));
                            entry.value.write_text(depth + 1, emphasis, out);
                        }
                    }
                }
            }
        }
    }

    /// Markdown-ish text, emphasis as `**bold**`.
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        self.write_text(0, &|s: &str| format!("**{}**", s), &mut out);
        out
    }

    fn inline<F>(&self, emphasis: &F) -> Option<String>
    where
        F: Fn(&str) -> String,
    {
        match self {
            RenderNode::Text(text) => Some(text.clone()),
            RenderNode::Highlighted(segments) => Some(
                segments
                    .iter()
                    .map(|s| if s.emphasized { emphasis(&s.text) } else { s.text.clone() })
                    .collect(),
            ),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_all_empty_renders_nothing() {
        let map = object(json!({"a": null, "b": "", "c": "   ", "d": [], "e": {}, "f": [null, " "]}));
        assert_eq!(render_object(&map, false, 0), None);
        assert_eq!(render_object(&map, true, 0), None);
    }

    #[test]
    fn test_labels_and_capitalization() {
        let map = object(json!({"keyIssue": "water scarcity", "year": 2024, "urgent": true}));
        let node = render_object(&map, false, 0).unwrap();
        let RenderNode::Object { level, entries } = node else {
            panic!("expected an object node");
        };
        assert_eq!(level, 0);
        assert_eq!(entries[0].label, "Key issue");
        assert_eq!(entries[0].value, RenderNode::Text("Water scarcity".to_string()));
        assert_eq!(entries[1].value, RenderNode::Text("2024".to_string()));
        assert_eq!(entries[2].value, RenderNode::Text("true".to_string()));
    }

    #[test]
    fn test_summary_mode_highlights_without_capitalizing() {
        let map = object(json!({"points": ["a {{highlighted}}key{{/highlighted}} fact"]}));
        let node = render_object(&map, true, 0).unwrap();
        let RenderNode::Object { entries, .. } = node else {
            panic!("expected an object node");
        };
        let RenderNode::List { level, items } = &entries[0].value else {
            panic!("expected a list");
        };
        assert_eq!(*level, 1);
        let RenderNode::Highlighted(segments) = &items[0] else {
            panic!("expected highlighted text");
        };
        assert_eq!(segments[0].text, "a ");
        assert!(segments[1].emphasized);
    }

    #[test]
    fn test_nesting_levels() {
        let map = object(json!({
            "outer": {"inner": "x"},
            "list": [{"k": "v"}, ["deep"]]
        }));
        let RenderNode::Object { entries, .. } = render_object(&map, false, 0).unwrap() else {
            panic!("expected an object node");
        };
        assert!(matches!(entries[0].value, RenderNode::Object { level: 1, .. }));
        let RenderNode::List { level: 1, items } = &entries[1].value else {
            panic!("expected a level 1 list");
        };
        assert!(matches!(items[0], RenderNode::Object { level: 2, .. }));
        assert!(matches!(items[1], RenderNode::List { level: 2, .. }));
    }

    #[test]
    fn test_entries_without_content_are_skipped() {
        let map = object(json!({"empty": {"a": null}, "kept": "yes"}));
        let RenderNode::Object { entries, .. } = render_object(&map, false, 0).unwrap() else {
            panic!("expected an object node");
        };
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].label, "Kept");
    }

    #[test]
    fn test_plain_text_output() {
        let map = object(json!({
            "background": "floods hit Assam",
            "impacts": ["crop loss", {"sector": "transport"}],
            "note": "{{highlighted}}Act now{{/highlighted}}"
        }));
        let text = render_object(&map, true, 0).unwrap().to_plain_text();
        assert_eq!(
            text,
            "Background: floods hit Assam\nImpacts:\n  • crop loss\n  •\n    Sector: transport\nNote: **Act now**\n"
        );
    }

    #[test]
    fn test_bullets_from_free_text() {
        assert_eq!(render_bullets::<&str>(&[], false), None);
        let node = render_bullets(&["one", " "], false).unwrap();
        assert_eq!(
            node,
            RenderNode::List { level: 0, items: vec![RenderNode::Text("One".to_string())] }
        );
    }
}
