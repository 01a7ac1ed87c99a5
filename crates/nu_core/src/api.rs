use async_trait::async_trait;
use chrono::NaiveDate;

use crate::types::{ArticleRecord, DailyResource, RawArticle};
use crate::Result;

/// `page`/`limit` query of the by-date endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery {
    pub page: u32,
    pub limit: u32,
}

#[async_trait]
pub trait NewsApi: Send + Sync {
    /// Articles one source published on `date`
    async fn articles_by_date(
        &self,
        source: &str,
        date: NaiveDate,
        page: Option<PageQuery>,
    ) -> Result<Vec<RawArticle>>;

    /// Full article by source and id
    async fn article_by_id(&self, source: &str, id: &str) -> Result<ArticleRecord>;

    /// Exam revision resources for `date`
    async fn resources_by_date(&self, date: NaiveDate) -> Result<Vec<DailyResource>>;
}
