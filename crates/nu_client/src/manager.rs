use std::sync::Arc;

use chrono::NaiveDate;
use futures::future::join_all;

use nu_core::dates::api_date;
use nu_core::{
    ArticleListItem, DailyResource, DisplayMode, Error, NewsApi, PageQuery, RawArticle, Result,
};
use nu_format::{build_article_view, ArticleView};

use crate::config::ClientConfig;
use crate::feed::FeedState;
use crate::logging::Logger;

/// What the detail screen is opened with.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailParams {
    pub id: Option<String>,
    /// The paper the article actually came from.
    pub source: Option<String>,
    /// ISO date the feed was showing; informational only.
    pub date: Option<String>,
    pub display_mode: DisplayMode,
}

pub struct FeedManager {
    api: Arc<dyn NewsApi>,
    config: ClientConfig,
    logger: Logger,
}

impl FeedManager {
    pub fn new(api: Arc<dyn NewsApi>, config: ClientConfig) -> Self {
        Self {
            api,
            config,
            logger: Logger::new(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn sources(&self) -> &[String] {
        &self.config.sources
    }

    fn page_query(&self) -> Option<PageQuery> {
        self.config.api_page_limit.map(|limit| PageQuery { page: 1, limit })
    }

    /// By-date fetch where a 404 means the source has nothing for that day.
    async fn fetch_source(&self, source: &str, date: NaiveDate, logger: &Logger) -> Result<Vec<RawArticle>> {
        match self.api.articles_by_date(source, date, self.page_query()).await {
            Ok(articles) => Ok(articles),
            Err(e) if e.is_not_found() => {
                logger.info(&format!("404 for {}", api_date(date)));
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Loads the feed for one source, or for every configured source in
    /// exam mode.
    pub async fn load_feed(&self, mode: &DisplayMode, date: NaiveDate) -> Result<Vec<ArticleListItem>> {
        match mode {
            DisplayMode::Source(source) => {
                let logger = self.logger.clone().with_new_prefixes(format!("[{}]", source));
                logger.info(&format!("Fetching articles for {}", api_date(date)));
                let raw = self.fetch_source(source, date, &logger).await.map_err(|e| {
                    logger.error(&format!("Error fetching {}: {}", api_date(date), e));
                    e
                })?;
                let items: Vec<_> = raw
                    .into_iter()
                    .map(|article| tag_source(article, source))
                    .collect();
                logger.info(&format!("Fetched {} articles", items.len()));
                Ok(items)
            }
            DisplayMode::Exam => Ok(self.load_exam(date).await),
        }
    }

    /// One request per configured source, joined before anything is returned.
    /// A failing source contributes nothing instead of failing the batch.
    async fn load_exam(&self, date: NaiveDate) -> Vec<ArticleListItem> {
        let exam_logger = self.logger.clone().with_new_prefixes("[Exam]".to_string());
        exam_logger.info(&format!(
            "Fetching across {} sources for {}",
            self.config.sources.len(),
            api_date(date)
        ));

        let fetches = self.config.sources.iter().map(|source| {
            let logger = exam_logger.clone().with_prefix(format!("[{}]", source));
            async move {
                match self.fetch_source(source, date, &logger).await {
                    Ok(raw) => raw
                        .into_iter()
                        .filter(RawArticle::is_exam_specific)
                        .map(|article| tag_source(article, source))
                        .collect::<Vec<_>>(),
                    Err(e) => {
                        logger.error(&format!("Error fetching {}: {}", api_date(date), e));
                        Vec::new()
                    }
                }
            }
        });

        let items: Vec<ArticleListItem> = join_all(fetches).await.into_iter().flatten().collect();
        exam_logger.info(&format!("Combined {} exam-specific articles", items.len()));
        items
    }

    /// Reloads `state` for its current mode and date. A failed load leaves the
    /// feed empty and hands the error back for display.
    pub async fn refresh(&self, state: &mut FeedState) -> Result<()> {
        let mode = state.mode().clone();
        let ticket = state.begin_load();
        match self.load_feed(&mode, state.date()).await {
            Ok(items) => {
                state.finish_load(ticket, items);
                Ok(())
            }
            Err(e) => {
                state.fail_load(ticket);
                Err(e)
            }
        }
    }

    pub async fn load_article(&self, params: &DetailParams) -> Result<ArticleView> {
        let source = params.source.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let id = params.id.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let (Some(source), Some(id)) = (source, id) else {
            return Err(Error::MissingParams("source paper or id".to_string()));
        };

        let logger = self.logger.clone().with_new_prefixes(format!("[{}]", source));
        match params.date.as_deref() {
            Some(date) => logger.debug(&format!("Loading article {} from the {} feed", id, date)),
            None => logger.debug(&format!("Loading article {}", id)),
        }
        let record = self.api.article_by_id(source, id).await.map_err(|e| {
            logger.error(&format!("Error loading article details: {}", e));
            e
        })?;
        Ok(build_article_view(&record, &params.display_mode))
    }

    pub async fn load_resources(&self, date: NaiveDate) -> Result<Vec<DailyResource>> {
        match self.api.resources_by_date(date).await {
            Ok(resources) => Ok(resources),
            Err(e) if e.is_not_found() => {
                self.logger.info(&format!("No resources for {}", api_date(date)));
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }
}

fn tag_source(mut article: RawArticle, source: &str) -> ArticleListItem {
    article.source = Some(source.to_string());
    ArticleListItem::from_raw(article, source)
}
