pub mod api;
pub mod category;
pub mod dates;
pub mod error;
pub mod types;

pub use api::{NewsApi, PageQuery};
pub use category::{CategoryCount, CategoryTally};
pub use error::{Error, Result};
pub use types::{
    ArticleListItem, ArticleRecord, DailyResource, DisplayMode, Envelope, RawArticle, EXAM_MODE,
};
