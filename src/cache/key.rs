//! Cache keys derived from request parameters.

use std::fmt;

use crate::types::NewsQuery;

/// Identity of a cacheable request.
///
/// Derived deterministically from the operation and its normalized
/// arguments. Distinct variants never compare equal, so a list page can
/// never shadow an item or the category list whatever the category string
/// contains.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// One page of the news list.
    NewsList {
        category: String,
        page: u32,
        limit: u32,
    },
    /// A single news item.
    NewsItem { id: u64 },
    /// The category list.
    Categories,
}

impl CacheKey {
    /// Key for a news list query. Unset and empty categories map to `all`.
    pub fn news_list(query: &NewsQuery) -> Self {
        CacheKey::NewsList {
            category: query.normalized_category().to_string(),
            page: query.page,
            limit: query.limit,
        }
    }

    pub fn news_item(id: u64) -> Self {
        CacheKey::NewsItem { id }
    }

    pub fn categories() -> Self {
        CacheKey::Categories
    }

    /// Operation tag, used as the metrics label.
    pub fn operation(&self) -> &'static str {
        match self {
            CacheKey::NewsList { .. } => "news",
            CacheKey::NewsItem { .. } => "news_item",
            CacheKey::Categories => "categories",
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::NewsList {
                category,
                page,
                limit,
            } => write!(f, "news_{category}_{page}_{limit}"),
            CacheKey::NewsItem { id } => write!(f, "news_item_{id}"),
            CacheKey::Categories => f.write_str("categories"),
        }
    }
}
