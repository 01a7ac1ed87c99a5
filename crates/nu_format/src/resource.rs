use lazy_static::lazy_static;
use regex::Regex;

use nu_core::DailyResource;

lazy_static! {
    static ref HEADING_START: Regex = Regex::new(r"^[A-Za-z0-9\s()/,-]+:").unwrap();
    static ref HEADING: Regex = Regex::new(r"^([A-Za-z0-9\s()/,-]+:)\s*").unwrap();
    static ref PYQ_SOURCE: Regex = Regex::new(r"(.*)(\(.*\))").unwrap();
}

/// One `Heading: content` block of the key-information text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInfoBlock {
    pub heading: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pyq {
    pub question: String,
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceView {
    pub title: String,
    pub meta: Vec<(&'static str, String)>,
    pub context: Option<String>,
    pub key_information: Vec<KeyInfoBlock>,
    pub conclusion: Option<String>,
    pub pyq: Option<Pyq>,
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

fn parse_block(block: &str) -> Option<KeyInfoBlock> {
    let (heading, content) = match HEADING.captures(block) {
        Some(caps) => {
            let matched = caps.get(0).map_or(0, |m| m.end());
            (non_blank(Some(&caps[1])), non_blank(Some(&block[matched..])))
        }
        None => (None, non_blank(Some(block))),
    };
    if heading.is_none() && content.is_none() {
        return None;
    }
    Some(KeyInfoBlock { heading, content })
}

/// Splits key information into blocks, starting a new one at every line that
/// opens with a `Heading:`.
pub fn parse_key_information(text: &str) -> Vec<KeyInfoBlock> {
    let mut blocks: Vec<String> = Vec::new();
    for line in text.lines() {
        match blocks.last_mut() {
            Some(current) if !HEADING_START.is_match(line) => {
                current.push('\n');
                current.push_str(line);
            }
            _ => blocks.push(line.to_string()),
        }
    }

    blocks
        .iter()
        .map(|b| b.trim())
        .filter(|b| !b.is_empty())
        .filter_map(parse_block)
        .collect()
}

/// Separates a trailing `(Exam Year)` attribution from the question.
pub fn parse_pyq(text: &str) -> Option<Pyq> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Some(caps) = PYQ_SOURCE.captures(text) {
        let question = caps[1].trim();
        if !question.is_empty() {
            return Some(Pyq {
                question: question.to_string(),
                source: Some(caps[2].trim().to_string()),
            });
        }
    }
    Some(Pyq {
        question: text.to_string(),
        source: None,
    })
}

pub fn build_resource_view(resource: &DailyResource) -> ResourceView {
    let meta = [
        ("Category", &resource.category),
        ("Source", &resource.source),
        ("Syllabus", &resource.syllabus_relevance),
        ("Date", &resource.date),
    ]
    .into_iter()
    .filter_map(|(label, value)| non_blank(value.as_deref()).map(|v| (label, v)))
    .collect();

    ResourceView {
        title: non_blank(resource.topic.as_deref()).unwrap_or_else(|| "Details".to_string()),
        meta,
        context: non_blank(resource.context.as_deref()),
        key_information: resource
            .key_information
            .as_deref()
            .map(parse_key_information)
            .unwrap_or_default(),
        conclusion: non_blank(resource.conclusion.as_deref()),
        pyq: resource.pyq.as_deref().and_then(parse_pyq),
    }
}

impl ResourceView {
    pub fn to_plain_text(&self) -> String {
        let mut out = format!("{}\n", self.title);
        for (label, value) in &self.meta {
            out.push_str(&format!("{}: {}\n", label, value));
        }
        if let Some(context) = &self.context {
            out.push_str(&format!("\n## Context\n{}\n", context));
        }
        if !self.key_information.is_empty() {
            out.push_str("\n## Key Information\n");
            for block in &self.key_information {
                if let Some(heading) = &block.heading {
                    out.push_str(&format!("{}\n", heading));
                }
                if let Some(content) = &block.content {
                    out.push_str(&format!("{}\n", content));
                }
            }
        }
        if let Some(conclusion) = &self.conclusion {
            out.push_str(&format!("\n## Conclusion\n{}\n", conclusion));
        }
        if let Some(pyq) = &self.pyq {
            out.push_str(&format!("\n## Previous Year Question (PYQ)\n{}\n", pyq.question));
            if let Some(source) = &pyq.source {
                out.push_str(&format!("{}\n", source));
            }
        }
        out
    }
}
