//! Huginn - resilient multi-endpoint news feed client
//!
//! This crate fetches paginated news from one of several interchangeable
//! backend endpoints. It picks a reachable endpoint at startup, retries
//! failed requests with linear backoff while failing over to a healthy
//! alternate, and short-circuits repeated requests through a time-bounded
//! response cache.
//!
//! # Example
//!
//! ```rust,no_run
//! use huginn::{Huginn, NewsQuery};
//!
//! #[tokio::main]
//! async fn main() -> huginn::Result<()> {
//!     let client = Huginn::builder()
//!         .hostname("news.example.com")
//!         .connect()
//!         .await?;
//!
//!     // List fetches never fail; a placeholder page is served instead.
//!     let page = client
//!         .fetch_news(&NewsQuery::new().category("gifts").page(2))
//!         .await;
//!     for item in &page.data {
//!         println!("{}: {}", item.id, item.title);
//!     }
//!
//!     let item = client.fetch_news_item(42).await?;
//!     println!("{}", item.content);
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod client;
#[cfg(feature = "cli")]
pub mod config;
pub mod deployment;
pub mod endpoint;
pub mod error;
pub mod retry;
pub mod telemetry;
pub mod types;
mod version;

// Re-export main types at crate root
pub use cache::{CacheConfig, CacheKey, ResponseCache};
pub use client::{ClientStatus, Huginn, HuginnBuilder, NewsClient};
pub use deployment::{DeploymentContext, DeploymentKind, HostDeployment, NewsDelegate};
pub use endpoint::{
    Endpoint, EndpointConfig, EndpointKind, EndpointSelector, EndpointSnapshot, HealthMap,
    HealthProbe, HttpHealthProbe,
};
pub use error::{HuginnError, Result};
pub use retry::{RetryConfig, execute_with_retry};
pub use version::{GIT_BRANCH, GIT_SHA, PKG_VERSION, git_dirty, version_string};

// Re-export all types
pub use types::{
    CacheMode, CategoriesResponse, MediaItem, NewsItem, NewsQuery, NewsResponse,
    default_categories,
};
