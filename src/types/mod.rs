//! Public types for the Huginn API.

mod news;
mod query;

pub use news::{
    CategoriesResponse, DEFAULT_CATEGORIES, DEFAULT_CATEGORY, MediaItem, NewsItem, NewsResponse,
    default_categories,
};
pub use query::{ALL_CATEGORIES, CacheMode, DEFAULT_PAGE_SIZE, NewsQuery};
