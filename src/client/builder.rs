//! Builder for configuring client instances

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, CACHE_CONTROL, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};

use super::NewsClient;
use crate::cache::{CacheConfig, ResponseCache};
use crate::deployment::{DeploymentContext, HostDeployment};
use crate::endpoint::{
    EndpointConfig, EndpointKind, EndpointSelector, HealthProbe, HttpHealthProbe, PROBE_TIMEOUT,
};
use crate::retry::RetryConfig;
use crate::{HuginnError, Result};

/// Default per-attempt request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Header that skips the tunnelling service's browser interstitial page.
const TUNNEL_WARNING_HEADER: &str = "ngrok-skip-browser-warning";

/// Main entry point for creating client instances.
pub struct Huginn;

impl Huginn {
    /// Create a new builder for configuring the client.
    pub fn builder() -> HuginnBuilder {
        HuginnBuilder::new()
    }
}

/// Builder for configuring client instances.
pub struct HuginnBuilder {
    endpoints: EndpointConfig,
    retry: RetryConfig,
    cache: CacheConfig,
    request_timeout: Duration,
    probe_timeout: Duration,
    deployment: Option<Arc<dyn DeploymentContext>>,
    prober: Option<Arc<dyn HealthProbe>>,
}

impl HuginnBuilder {
    pub fn new() -> Self {
        Self {
            endpoints: EndpointConfig::default(),
            retry: RetryConfig::default(),
            cache: CacheConfig::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            probe_timeout: PROBE_TIMEOUT,
            deployment: None,
            prober: None,
        }
    }

    /// Replace all candidate endpoints.
    pub fn endpoints(mut self, endpoints: EndpointConfig) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Set the local development endpoint.
    pub fn local(mut self, url: impl Into<String>) -> Self {
        self.endpoints.local = url.into();
        self
    }

    /// Set the production endpoint.
    pub fn production(mut self, url: impl Into<String>) -> Self {
        self.endpoints.production = url.into();
        self
    }

    /// Set the retry policy (default: 3 attempts, 1s linear backoff).
    pub fn retry(mut self, config: RetryConfig) -> Self {
        self.retry = config;
        self
    }

    /// Set the response cache configuration (default: 5 minute TTL).
    pub fn cache(mut self, config: CacheConfig) -> Self {
        self.cache = config;
        self
    }

    /// Set the timeout for each request attempt (default: 10s).
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the timeout for each health probe (default: 3s).
    pub fn probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// Set the deployment context (default: a `localhost` development host).
    pub fn deployment(mut self, deployment: Arc<dyn DeploymentContext>) -> Self {
        self.deployment = Some(deployment);
        self
    }

    /// Shorthand for a [`HostDeployment`] without a delegate.
    pub fn hostname(self, hostname: impl Into<String>) -> Self {
        self.deployment(Arc::new(HostDeployment::new(hostname)))
    }

    /// Replace the HTTP health prober.
    pub fn prober(mut self, prober: Arc<dyn HealthProbe>) -> Self {
        self.prober = Some(prober);
        self
    }

    /// Build the client. The active endpoint is local until
    /// [`NewsClient::initialize()`] runs.
    pub fn build(self) -> Result<NewsClient> {
        for (name, url) in [
            ("local", &self.endpoints.local),
            ("local_secondary", &self.endpoints.local_secondary),
            ("production", &self.endpoints.production),
        ] {
            reqwest::Url::parse(url).map_err(|e| {
                HuginnError::Configuration(format!("invalid {name} endpoint {url:?}: {e}"))
            })?;
        }

        let http = reqwest::Client::builder()
            .default_headers(default_headers())
            .user_agent(crate::version::user_agent())
            .timeout(self.request_timeout)
            .build()
            .map_err(|e| HuginnError::Configuration(format!("failed to build HTTP client: {e}")))?;

        let prober = self.prober.unwrap_or_else(|| {
            Arc::new(HttpHealthProbe::with_timeout(
                http.clone(),
                self.probe_timeout,
            ))
        });
        let deployment = self
            .deployment
            .unwrap_or_else(|| Arc::new(HostDeployment::development()));

        Ok(NewsClient::new(
            http,
            EndpointSelector::new(self.endpoints),
            ResponseCache::new(&self.cache),
            self.retry,
            deployment,
            prober,
        ))
    }

    /// Build the client and run the startup health probe.
    pub async fn connect(self) -> Result<NewsClient> {
        let client = self.build()?;
        client.initialize().await;
        Ok(client)
    }

    /// Build a client that skips probing and starts on `active` with the
    /// given health flags. Useful when the deployment is known up front.
    pub fn build_with_state(
        self,
        active: EndpointKind,
        health: crate::endpoint::HealthMap,
    ) -> Result<NewsClient> {
        let client = self.build()?;
        client.selector().select(active);
        client
            .selector()
            .set_health(EndpointKind::Local, health.local);
        client
            .selector()
            .set_health(EndpointKind::Production, health.production);
        client.mark_initialized();
        Ok(client)
    }
}

impl Default for HuginnBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Headers sent with every request.
fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(
        HeaderName::from_static(TUNNEL_WARNING_HEADER),
        HeaderValue::from_static("true"),
    );
    headers
}
