use std::collections::HashMap;

use serde::Serialize;

use crate::types::{ArticleListItem, UNKNOWN_CATEGORY};

pub const ALL_CATEGORIES: &str = "All";

/// Trimmed, lowercased form used to compare category names.
pub fn normalize_category(category: &str) -> String {
    category.trim().to_lowercase()
}

/// Chip label: first letter upper, rest lower. Empty input reads as "Unknown".
pub fn chip_label(category: &str) -> String {
    let mut chars = category.trim().chars();
    match chars.next() {
        None => UNKNOWN_CATEGORY.to_string(),
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
    }
}

/// True if `article_category` belongs under the selected chip.
pub fn matches_category(selected: &str, article_category: &str) -> bool {
    let selected = normalize_category(selected);
    selected == normalize_category(ALL_CATEGORIES) || selected == normalize_category(article_category)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    /// Casing of the first occurrence.
    pub display: String,
    pub count: usize,
}

/// Occurrence counts keyed by normalized category name, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct CategoryTally {
    entries: Vec<CategoryCount>,
    index: HashMap<String, usize>,
    total: usize,
}

impl CategoryTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_articles(articles: &[ArticleListItem]) -> Self {
        let mut tally = Self::new();
        for article in articles {
            tally.add(&article.category, 1);
        }
        tally
    }

    /// Merges raw `(name, count)` pairs whose names differ only by case or
    /// surrounding whitespace.
    pub fn from_counts<'a, I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, usize)>,
    {
        let mut tally = Self::new();
        for (name, count) in counts {
            tally.add(name, count);
        }
        tally
    }

    pub fn add(&mut self, category: &str, count: usize) {
        let display = if category.trim().is_empty() {
            UNKNOWN_CATEGORY
        } else {
            category.trim()
        };
        let key = normalize_category(display);
        self.total += count;
        match self.index.get(&key) {
            Some(&i) => self.entries[i].count += count,
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push(CategoryCount {
                    display: display.to_string(),
                    count,
                });
            }
        }
    }

    pub fn get(&self, category: &str) -> Option<&CategoryCount> {
        self.index
            .get(&normalize_category(category))
            .map(|&i| &self.entries[i])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryCount> {
        self.entries.iter()
    }

    /// Filter chips: "All" first, then by descending count with "Unknown" last.
    pub fn chips(&self) -> Vec<CategoryCount> {
        let unknown = normalize_category(UNKNOWN_CATEGORY);
        let mut sorted: Vec<&CategoryCount> = self.entries.iter().collect();
        // stable sort keeps first-seen order among equal counts
        sorted.sort_by(|a, b| {
            let a_unknown = normalize_category(&a.display) == unknown;
            let b_unknown = normalize_category(&b.display) == unknown;
            a_unknown.cmp(&b_unknown).then(b.count.cmp(&a.count))
        });

        let mut chips = Vec::with_capacity(sorted.len() + 1);
        chips.push(CategoryCount {
            display: ALL_CATEGORIES.to_string(),
            count: self.total,
        });
        chips.extend(sorted.into_iter().cloned());
        chips
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(category: &str) -> ArticleListItem {
        ArticleListItem {
            id: category.to_string(),
            title: "t".to_string(),
            category: category.to_string(),
            source: "The Hindu".to_string(),
            syllabus_headings: None,
        }
    }

    #[test]
    fn test_merges_case_and_whitespace() {
        let tally = CategoryTally::from_counts([("Polity", 2), ("polity ", 3)]);
        assert_eq!(tally.len(), 1);
        let entry = tally.get("POLITY").unwrap();
        assert_eq!(entry.display, "Polity");
        assert_eq!(entry.count, 5);
    }

    #[test]
    fn test_chips_order() {
        let articles = vec![
            item("Unknown"),
            item("economy"),
            item("Polity"),
            item("Economy"),
            item("unknown"),
            item("Unknown"),
        ];
        let chips = CategoryTally::from_articles(&articles).chips();
        let labels: Vec<_> = chips.iter().map(|c| (c.display.as_str(), c.count)).collect();
        assert_eq!(
            labels,
            vec![("All", 6), ("economy", 2), ("Polity", 1), ("Unknown", 3)]
        );
    }

    #[test]
    fn test_blank_category_counts_as_unknown() {
        let tally = CategoryTally::from_counts([("", 1), ("unknown", 1)]);
        assert_eq!(tally.get("Unknown").map(|c| c.count), Some(2));
    }

    #[test]
    fn test_chip_label_and_matching() {
        assert_eq!(chip_label("sCIENCE and TECH"), "Science and tech");
        assert_eq!(chip_label("  "), "Unknown");
        assert!(matches_category("All", "Economy"));
        assert!(matches_category(" economy", "Economy "));
        assert!(!matches_category("Polity", "Economy"));
    }
}
