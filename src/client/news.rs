//! NewsClient - the fetch operations

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::cache::{CacheKey, ResponseCache};
use crate::deployment::{DeploymentContext, DeploymentKind};
use crate::endpoint::{self, Endpoint, EndpointSelector, HealthMap, HealthProbe};
use crate::retry::{RetryConfig, execute_with_retry};
use crate::telemetry;
use crate::types::{
    CacheMode, CategoriesResponse, NewsItem, NewsQuery, NewsResponse, default_categories,
};
use crate::{HuginnError, Result};

/// Observability view of a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientStatus {
    pub current: Endpoint,
    pub health: HealthMap,
    /// Stored cache entries, expired ones included.
    pub cache_size: u64,
}

/// Client context owning endpoint state, the response cache and the HTTP
/// client. Shared by reference (or `Arc`) between concurrent callers.
pub struct NewsClient {
    http: reqwest::Client,
    selector: EndpointSelector,
    cache: ResponseCache,
    retry: RetryConfig,
    deployment: Arc<dyn DeploymentContext>,
    prober: Arc<dyn HealthProbe>,
    initialized: OnceCell<()>,
}

impl NewsClient {
    pub(crate) fn new(
        http: reqwest::Client,
        selector: EndpointSelector,
        cache: ResponseCache,
        retry: RetryConfig,
        deployment: Arc<dyn DeploymentContext>,
        prober: Arc<dyn HealthProbe>,
    ) -> Self {
        Self {
            http,
            selector,
            cache,
            retry,
            deployment,
            prober,
            initialized: OnceCell::new(),
        }
    }

    /// Pick the initial endpoint by probing, once per client.
    ///
    /// Later and concurrent calls wait for the first run and do not probe
    /// again. Returns the endpoint active afterwards.
    pub async fn initialize(&self) -> Endpoint {
        self.initialized
            .get_or_init(|| async {
                endpoint::initialize(&self.selector, self.prober.as_ref(), self.deployment.as_ref())
                    .await;
            })
            .await;
        self.selector.current()
    }

    pub(crate) fn mark_initialized(&self) {
        let _ = self.initialized.set(());
    }

    /// Whether [`initialize()`](Self::initialize) has completed.
    pub fn is_initialized(&self) -> bool {
        self.initialized.initialized()
    }

    /// Fetch one page of news.
    ///
    /// Never fails: when every attempt fails the result is
    /// [`NewsResponse::unavailable()`]. On static hosting with an in-page
    /// delegate, the delegate answers and cache, retry and endpoint
    /// selection are skipped.
    pub async fn fetch_news(&self, query: &NewsQuery) -> NewsResponse {
        if self.deployment.kind() == DeploymentKind::StaticHosting
            && let Some(delegate) = self.deployment.delegate()
        {
            debug!(hostname = self.deployment.hostname(), "using in-page news API");
            return match delegate
                .get_news(query.category.as_deref(), query.page, query.limit)
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    warn!(error = %e, "in-page news API failed");
                    degraded("news")
                }
            };
        }

        let key = CacheKey::news_list(query);
        if query.cache.is_enabled()
            && let Some(cached) = self.cache.get::<NewsResponse>(&key)
        {
            return cached;
        }

        let result = execute_with_retry(&self.retry, &self.selector, "news", |endpoint| {
            let mut params = Vec::with_capacity(3);
            if let Some(category) = query.category_filter() {
                params.push(("category", category.to_string()));
            }
            params.push(("limit", query.limit.to_string()));
            params.push(("offset", query.offset().to_string()));
            self.get_json::<NewsResponse>(self.http.get(endpoint.list_url()).query(&params))
        })
        .await;

        match result {
            Ok(response) => {
                debug!(key = %key, items = response.data.len(), "fetched news");
                if query.cache.is_enabled() {
                    self.cache.put(key, response.clone());
                }
                response
            }
            Err(e) => {
                warn!(key = %key, endpoint = %self.selector.current(), error = %e, "news unavailable, serving placeholder");
                degraded("news")
            }
        }
    }

    /// Fetch a single news item, using the cache.
    pub async fn fetch_news_item(&self, id: u64) -> Result<NewsItem> {
        self.fetch_news_item_with(id, CacheMode::Use).await
    }

    /// Fetch a single news item.
    ///
    /// Fails with [`HuginnError::ItemFetchFailed`] once retries are
    /// exhausted.
    pub async fn fetch_news_item_with(&self, id: u64, cache: CacheMode) -> Result<NewsItem> {
        let key = CacheKey::news_item(id);
        if cache.is_enabled()
            && let Some(cached) = self.cache.get::<NewsItem>(&key)
        {
            return Ok(cached);
        }

        let item: NewsItem =
            execute_with_retry(&self.retry, &self.selector, "news_item", |endpoint| {
                self.get_json(self.http.get(endpoint.item_url(id)))
            })
            .await
            .map_err(|e| {
                warn!(id, error = %e, "news item unavailable");
                HuginnError::ItemFetchFailed {
                    id,
                    source: Box::new(e),
                }
            })?;

        if cache.is_enabled() {
            self.cache.put(key, item.clone());
        }
        Ok(item)
    }

    /// Fetch the category list, using the cache.
    pub async fn fetch_categories(&self) -> Vec<String> {
        self.fetch_categories_with(CacheMode::Use).await
    }

    /// Fetch the category list.
    ///
    /// Never fails: total failure, or a response without a list, yields the
    /// built-in category set.
    pub async fn fetch_categories_with(&self, cache: CacheMode) -> Vec<String> {
        let key = CacheKey::categories();
        if cache.is_enabled()
            && let Some(cached) = self.cache.get::<Vec<String>>(&key)
        {
            return cached;
        }

        let result = execute_with_retry(&self.retry, &self.selector, "categories", |endpoint| {
            self.get_json::<CategoriesResponse>(self.http.get(endpoint.categories_url()))
        })
        .await;

        match result {
            Ok(response) => {
                let categories = response.data.unwrap_or_else(default_categories);
                if cache.is_enabled() {
                    self.cache.put(key, categories.clone());
                }
                categories
            }
            Err(e) => {
                warn!(error = %e, "categories unavailable, using defaults");
                metrics::counter!(telemetry::DEGRADED_RESPONSES_TOTAL, "operation" => "categories")
                    .increment(1);
                default_categories()
            }
        }
    }

    /// Drop every cached response.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn status(&self) -> ClientStatus {
        let snapshot = self.selector.snapshot();
        ClientStatus {
            current: snapshot.current,
            health: snapshot.health,
            cache_size: self.cache.len(),
        }
    }

    pub fn selector(&self) -> &EndpointSelector {
        &self.selector
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub fn deployment(&self) -> &dyn DeploymentContext {
        self.deployment.as_ref()
    }

    /// Send one request and decode a JSON body. Non-2xx statuses are errors.
    async fn get_json<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(HuginnError::Api {
                status: status.as_u16(),
                message,
            });
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

fn degraded(operation: &'static str) -> NewsResponse {
    metrics::counter!(telemetry::DEGRADED_RESPONSES_TOTAL, "operation" => operation).increment(1);
    NewsResponse::unavailable()
}
