use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Literal used by navigation and the CLI to select the aggregate exam lens.
pub const EXAM_MODE: &str = "Exam";

pub const UNTITLED: &str = "Untitled Article";
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Response wrapper returned by every backend endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
}

/// One entry of the by-date listing, as the backend sends it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArticle {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub mongo_id: Option<Value>,
    #[serde(default)]
    pub article_id: Option<Value>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub exam_specific: Option<bool>,
    #[serde(default)]
    pub syllabus_headings: Option<Vec<String>>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl RawArticle {
    pub fn is_exam_specific(&self) -> bool {
        self.exam_specific == Some(true)
    }

    /// `articleId` first, then the storage id. Blank ids count as missing.
    pub fn stable_id(&self) -> Option<String> {
        self.article_id
            .as_ref()
            .and_then(id_to_string)
            .or_else(|| self.mongo_id.as_ref().and_then(id_to_string))
    }
}

fn id_to_string(value: &Value) -> Option<String> {
    let id = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Object(map) => return map.get("$oid").and_then(id_to_string),
        _ => return None,
    };
    (!id.is_empty()).then_some(id)
}

/// Full article as returned by the by-id endpoint. Every field may be absent
/// depending on which source produced it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub involvement: Option<String>,
    #[serde(default)]
    pub past: Option<String>,
    #[serde(default)]
    pub present: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub points: Option<String>,
    #[serde(default)]
    pub glossary: Option<Value>,
    #[serde(default)]
    pub deep_analysis_json: Option<String>,
    #[serde(default)]
    pub summary_points_json: Option<String>,
}

impl ArticleRecord {
    /// Glossary terms in backend order. Non-object glossaries yield nothing.
    pub fn glossary_entries(&self) -> Vec<(String, String)> {
        let Some(Value::Object(map)) = &self.glossary else {
            return Vec::new();
        };
        map.iter()
            .filter_map(|(term, definition)| {
                let definition = match definition {
                    Value::Null => return None,
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                Some((term.clone(), definition))
            })
            .collect()
    }
}

/// Row shown in the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleListItem {
    pub id: String,
    pub title: String,
    pub category: String,
    pub source: String,
    pub syllabus_headings: Option<Vec<String>>,
}

impl ArticleListItem {
    /// Builds the feed row for an article fetched from `paper`.
    pub fn from_raw(raw: RawArticle, paper: &str) -> Self {
        let source = raw
            .source
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| paper.to_string());
        let title = raw
            .title
            .clone()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| UNTITLED.to_string());
        let id = raw
            .stable_id()
            .unwrap_or_else(|| format!("{}-{}-{}", source, title, uuid::Uuid::new_v4()));
        Self {
            id,
            title,
            category: raw
                .category
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string()),
            source,
            syllabus_headings: raw.syllabus_headings,
        }
    }
}

/// Exam revision resource of the resources flow.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailyResource {
    #[serde(rename = "Topic", default)]
    pub topic: Option<String>,
    #[serde(rename = "Category", default)]
    pub category: Option<String>,
    #[serde(rename = "Source", default)]
    pub source: Option<String>,
    #[serde(rename = "Syllabus_Relevance", default)]
    pub syllabus_relevance: Option<String>,
    #[serde(rename = "Date", default)]
    pub date: Option<String>,
    #[serde(rename = "Context", default)]
    pub context: Option<String>,
    #[serde(rename = "Key_Information", default)]
    pub key_information: Option<String>,
    #[serde(rename = "Conclusion", default)]
    pub conclusion: Option<String>,
    #[serde(rename = "PYQ", default)]
    pub pyq: Option<String>,
}

/// The lens the reader is looking through.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DisplayMode {
    Source(String),
    Exam,
}

impl DisplayMode {
    pub fn is_exam(&self) -> bool {
        matches!(self, DisplayMode::Exam)
    }

    pub fn header_title(&self) -> String {
        match self {
            DisplayMode::Exam => "Exam Focus".to_string(),
            DisplayMode::Source(name) if name.trim().is_empty() => "Article Details".to_string(),
            DisplayMode::Source(name) => name.clone(),
        }
    }
}

impl FromStr for DisplayMode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s == EXAM_MODE {
            Ok(DisplayMode::Exam)
        } else {
            Ok(DisplayMode::Source(s.to_string()))
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayMode::Exam => f.write_str(EXAM_MODE),
            DisplayMode::Source(name) => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stable_id_prefers_article_id() {
        let raw: RawArticle = serde_json::from_value(json!({
            "_id": {"$oid": "65f0"},
            "articleId": 42,
            "title": "Budget"
        }))
        .unwrap();
        assert_eq!(raw.stable_id().as_deref(), Some("42"));

        let raw: RawArticle = serde_json::from_value(json!({"_id": {"$oid": "65f0"}})).unwrap();
        assert_eq!(raw.stable_id().as_deref(), Some("65f0"));
    }

    #[test]
    fn test_list_item_defaults() {
        let raw = RawArticle {
            title: Some("  ".to_string()),
            ..Default::default()
        };
        let item = ArticleListItem::from_raw(raw, "The Hindu");
        assert_eq!(item.title, UNTITLED);
        assert_eq!(item.category, UNKNOWN_CATEGORY);
        assert_eq!(item.source, "The Hindu");
        assert!(item.id.starts_with("The Hindu-Untitled Article-"));
    }

    #[test]
    fn test_display_mode_parsing() {
        assert_eq!("Exam".parse::<DisplayMode>().unwrap(), DisplayMode::Exam);
        let mode: DisplayMode = "The Hindu".parse().unwrap();
        assert_eq!(mode, DisplayMode::Source("The Hindu".to_string()));
        assert_eq!(mode.header_title(), "The Hindu");
        assert_eq!(DisplayMode::Exam.header_title(), "Exam Focus");
        assert_eq!(DisplayMode::Source(String::new()).header_title(), "Article Details");
    }

    #[test]
    fn test_glossary_entries_keep_order() {
        let record: ArticleRecord = serde_json::from_value(json!({
            "glossary": {"Repo rate": "rate at which RBI lends", "CRR": null, "SLR": "statutory ratio"}
        }))
        .unwrap();
        let entries = record.glossary_entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, "Repo rate");
        assert_eq!(entries[1].0, "SLR");
    }

    #[test]
    fn test_resource_field_names() {
        let resource: DailyResource = serde_json::from_value(json!({
            "Topic": "Ramsar sites",
            "Key_Information": "History: designated 1971",
            "PYQ": "What is a Ramsar site? (UPSC 2019)"
        }))
        .unwrap();
        assert_eq!(resource.topic.as_deref(), Some("Ramsar sites"));
        assert!(resource.key_information.is_some());
        assert!(resource.context.is_none());
    }
}
