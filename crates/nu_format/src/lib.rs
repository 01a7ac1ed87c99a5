//! Formatting of loosely structured article content for display.

pub mod article;
pub mod extract;
pub mod highlight;
pub mod render;
pub mod resource;
pub mod text;

pub use article::{build_article_view, ArticleView, Block};
pub use extract::{parse_json_safely, ContentTree};
pub use highlight::{split_highlights, HighlightSegment};
pub use render::{render_object, render_value, RenderEntry, RenderNode};
pub use resource::{build_resource_view, ResourceView};
pub use text::{format_key, format_list, Delimiter};
