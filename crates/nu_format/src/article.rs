use nu_core::dates::display_date;
use nu_core::{ArticleRecord, DisplayMode};

use crate::extract::parse_json_safely;
use crate::render::{render_bullets, render_object, render_text, RenderNode};
use crate::text::{capitalize_first, capitalize_sentence, format_list, Delimiter};

pub const DEEP_ANALYSIS: &str = "Deep Analysis";
pub const SUMMARY_POINTS: &str = "Summary & Exam Focus";

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Section {
        title: String,
        exam: bool,
        body: RenderNode,
    },
    Notice {
        title: Option<String>,
        message: String,
    },
}

impl Block {
    fn section(title: &str, exam: bool, body: RenderNode) -> Self {
        Block::Section {
            title: title.to_string(),
            exam,
            body,
        }
    }

    fn notice(title: Option<&str>, message: &str) -> Self {
        Block::Notice {
            title: title.map(str::to_string),
            message: message.to_string(),
        }
    }
}

/// Everything the article detail screen shows, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleView {
    pub header: String,
    pub title: String,
    pub date: String,
    pub category: Option<String>,
    pub blocks: Vec<Block>,
}

pub fn build_article_view(record: &ArticleRecord, mode: &DisplayMode) -> ArticleView {
    let blocks = if mode.is_exam() {
        exam_blocks(record)
    } else {
        standard_blocks(record)
    };

    ArticleView {
        header: mode.header_title(),
        title: record
            .title
            .clone()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| nu_core::types::UNTITLED.to_string()),
        date: display_date(record.date.as_deref()),
        category: record
            .category
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .map(capitalize_first),
        blocks,
    }
}

fn paragraph(text: Option<&str>) -> Option<RenderNode> {
    text.and_then(|t| render_text(t, false))
}

fn standard_blocks(record: &ArticleRecord) -> Vec<Block> {
    let glossary: Vec<String> = record
        .glossary_entries()
        .into_iter()
        .filter(|(_, definition)| !definition.trim().is_empty())
        .map(|(term, definition)| {
            format!("{}: {}", capitalize_first(term.trim()), capitalize_sentence(&definition))
        })
        .collect();

    let sections = [
        ("Involvement", render_bullets(&format_list(record.involvement.as_deref(), Delimiter::Period), false)),
        ("Past Context", paragraph(record.past.as_deref())),
        ("Present Situation", paragraph(record.present.as_deref())),
        ("Description", paragraph(record.description.as_deref())),
        ("Key Points", render_bullets(&format_list(record.points.as_deref(), Delimiter::Newline), false)),
        ("Glossary", render_bullets(&glossary, false)),
    ];

    sections
        .into_iter()
        .filter_map(|(title, body)| body.map(|body| Block::section(title, false, body)))
        .collect()
}

fn exam_blocks(record: &ArticleRecord) -> Vec<Block> {
    let mut blocks = Vec::new();
    let fields = [
        (DEEP_ANALYSIS, "Deep Analysis", record.deep_analysis_json.as_deref(), false),
        (SUMMARY_POINTS, "Summary Points", record.summary_points_json.as_deref(), true),
    ];

    let mut parsed_any = false;
    for (title, field_name, raw, summary) in fields {
        match parse_json_safely(raw) {
            Some(tree) => {
                parsed_any = true;
                if let Some(body) = render_object(&tree, summary, 0) {
                    blocks.push(Block::section(title, true, body));
                }
            }
            None if raw.map_or(false, |r| !r.trim().is_empty()) => {
                blocks.push(Block::notice(
                    None,
                    &format!("{} not available due to format issues.", field_name),
                ));
            }
            None => {}
        }
    }

    if !parsed_any {
        blocks.push(Block::notice(
            Some("Exam Analysis Unavailable"),
            "Detailed analysis data is missing or could not be processed.",
        ));
    }
    blocks
}

impl ArticleView {
    pub fn section(&self, title: &str) -> Option<&RenderNode> {
        self.blocks.iter().find_map(|block| match block {
            Block::Section { title: t, body, .. } if t == title => Some(body),
            _ => None,
        })
    }

    pub fn notices(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                Block::Notice { message, .. } => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Text rendering; `emphasis` styles highlighted segments.
    pub fn render_with<F>(&self, emphasis: &F) -> String
    where
        F: Fn(&str) -> String,
    {
        let mut out = format!("{}\n{}\n", self.header, self.title);
        match &self.category {
            Some(category) => out.push_str(&format!("{} • {}\n", self.date, category)),
            None => out.push_str(&format!("{}\n", self.date)),
        }
        for block in &self.blocks {
            out.push('\n');
            match block {
                Block::Section { title, body, .. } => {
                    out.push_str(&format!("## {}\n", title));
                    body.write_text(0, emphasis, &mut out);
                }
                Block::Notice { title, message } => {
                    if let Some(title) = title {
                        out.push_str(&format!("{}\n", title));
                    }
                    out.push_str(&format!("{}\n", message));
                }
            }
        }
        out
    }

    pub fn to_plain_text(&self) -> String {
        self.render_with(&|s: &str| format!("**{}**", s))
    }
}
