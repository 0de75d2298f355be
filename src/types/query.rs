//! Request parameter types

use serde::{Deserialize, Serialize};

/// Category name meaning "no category filter".
pub const ALL_CATEGORIES: &str = "all";

/// Default page size for news lists.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Whether a fetch may be answered from, and written to, the response cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheMode {
    /// Serve fresh cached data when present, store successful results.
    #[default]
    Use,
    /// Always go to the network and leave the cache untouched.
    Bypass,
}

impl CacheMode {
    pub fn is_enabled(self) -> bool {
        matches!(self, CacheMode::Use)
    }
}

/// Parameters of a paginated news list request.
///
/// Pages are 1-based; page and limit are clamped to at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub page: u32,
    pub limit: u32,
    #[serde(default)]
    pub cache: CacheMode,
}

impl Default for NewsQuery {
    fn default() -> Self {
        Self {
            category: None,
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            cache: CacheMode::Use,
        }
    }
}

impl NewsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit.max(1);
        self
    }

    pub fn cache(mut self, mode: CacheMode) -> Self {
        self.cache = mode;
        self
    }

    /// Skip the response cache for this request.
    pub fn no_cache(self) -> Self {
        self.cache(CacheMode::Bypass)
    }

    /// Category with "unset", empty and `all` collapsed to `all`.
    pub fn normalized_category(&self) -> &str {
        match self.category.as_deref() {
            None | Some("") => ALL_CATEGORIES,
            Some(c) => c,
        }
    }

    /// Category to send as a filter, `None` when listing everything.
    pub fn category_filter(&self) -> Option<&str> {
        match self.normalized_category() {
            ALL_CATEGORIES => None,
            c => Some(c),
        }
    }

    /// Zero-based record offset of the first item on this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.max(1) - 1) * u64::from(self.limit)
    }
}
