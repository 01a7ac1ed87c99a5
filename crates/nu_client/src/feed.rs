use std::time::Duration;

use chrono::NaiveDate;
use tracing::debug;

use nu_core::category::{matches_category, ALL_CATEGORIES};
use nu_core::{ArticleListItem, CategoryCount, CategoryTally, DisplayMode};

use crate::config::ClientConfig;

/// Issued by [`FeedState::begin_load`]; a result carrying an older ticket is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Client-side state of the article feed: loaded list, category filter and
/// the paging window over the filtered list.
#[derive(Debug, Clone)]
pub struct FeedState {
    mode: DisplayMode,
    date: NaiveDate,
    articles: Vec<ArticleListItem>,
    tally: CategoryTally,
    selected_category: String,
    page: usize,
    page_size: usize,
    loading: bool,
    is_fetching_more: bool,
    all_loaded: bool,
    generation: u64,
    load_more_delay: Duration,
}

impl FeedState {
    pub fn new(mode: DisplayMode, date: NaiveDate, config: &ClientConfig) -> Self {
        Self {
            mode,
            date,
            articles: Vec::new(),
            tally: CategoryTally::new(),
            selected_category: ALL_CATEGORIES.to_string(),
            page: 1,
            page_size: config.page_size.max(1),
            loading: false,
            is_fetching_more: false,
            all_loaded: false,
            generation: 0,
            load_more_delay: config.load_more_delay(),
        }
    }

    pub fn mode(&self) -> &DisplayMode {
        &self.mode
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn articles(&self) -> &[ArticleListItem] {
        &self.articles
    }

    pub fn selected_category(&self) -> &str {
        &self.selected_category
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_fetching_more(&self) -> bool {
        self.is_fetching_more
    }

    pub fn all_loaded(&self) -> bool {
        self.all_loaded
    }

    /// Marks the feed as loading and invalidates any load still in flight.
    /// Every load starts unfiltered since the new list may lack the old category.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.loading = true;
        self.articles.clear();
        self.tally = CategoryTally::new();
        self.selected_category = ALL_CATEGORIES.to_string();
        self.reset_paging();
        LoadTicket(self.generation)
    }

    /// Installs `items` unless a newer load has started since `ticket` was
    /// issued. Returns whether the items were applied.
    pub fn finish_load(&mut self, ticket: LoadTicket, items: Vec<ArticleListItem>) -> bool {
        if ticket.0 != self.generation {
            debug!("Discarding stale feed result ({} items)", items.len());
            return false;
        }
        self.tally = CategoryTally::from_articles(&items);
        self.articles = items;
        self.loading = false;
        self.reset_paging();
        true
    }

    pub fn fail_load(&mut self, ticket: LoadTicket) {
        if ticket.0 == self.generation {
            self.articles.clear();
            self.tally = CategoryTally::new();
            self.loading = false;
        }
    }

    /// Switching mode or date invalidates the current list; the caller reloads.
    pub fn set_mode(&mut self, mode: DisplayMode) {
        if self.mode != mode {
            self.mode = mode;
            self.selected_category = ALL_CATEGORIES.to_string();
            self.reset_paging();
        }
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        if self.date != date {
            self.date = date;
            self.reset_paging();
        }
    }

    pub fn select_category(&mut self, category: &str) {
        let category = category.trim();
        self.selected_category = if category.is_empty() {
            ALL_CATEGORIES.to_string()
        } else {
            category.to_string()
        };
        self.reset_paging();
    }

    fn reset_paging(&mut self) {
        self.page = 1;
        self.is_fetching_more = false;
        self.all_loaded = false;
    }

    pub fn filtered(&self) -> Vec<&ArticleListItem> {
        self.articles
            .iter()
            .filter(|a| matches_category(&self.selected_category, &a.category))
            .collect()
    }

    pub fn visible(&self) -> Vec<&ArticleListItem> {
        let mut filtered = self.filtered();
        filtered.truncate(self.page * self.page_size);
        filtered
    }

    pub fn chips(&self) -> Vec<CategoryCount> {
        self.tally.chips()
    }

    pub fn tally(&self) -> &CategoryTally {
        &self.tally
    }

    /// Reveals the next page after the configured delay. Returns false once
    /// everything filtered is already visible.
    pub async fn load_more(&mut self) -> bool {
        if self.loading || self.is_fetching_more || self.all_loaded {
            return false;
        }
        let filtered = self.filtered().len();
        if self.page * self.page_size >= filtered {
            self.all_loaded = true;
            return false;
        }

        self.is_fetching_more = true;
        if !self.load_more_delay.is_zero() {
            tokio::time::sleep(self.load_more_delay).await;
        }
        self.page += 1;
        self.is_fetching_more = false;
        if self.page * self.page_size >= filtered {
            self.all_loaded = true;
        }
        true
    }
}
