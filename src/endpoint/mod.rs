//! Candidate endpoints, health tracking and startup probing.
//!
//! - [`EndpointConfig`]: the configured base URLs
//! - [`EndpointSelector`]: active endpoint + per-endpoint health flags,
//!   the only place failover happens
//! - [`HealthProbe`] / [`HttpHealthProbe`]: one-shot reachability checks
//!   used by [`initialize()`] at startup

mod probe;
mod selector;

pub use probe::{HealthProbe, HttpHealthProbe, PROBE_TIMEOUT, initialize};
pub use selector::{EndpointSelector, EndpointSnapshot, HealthMap};

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default local development endpoint.
pub const DEFAULT_LOCAL_URL: &str = "http://localhost:8000/api/news";

/// Reserved second local endpoint. Configured but never probed or selected.
pub const DEFAULT_LOCAL_SECONDARY_URL: &str = "http://localhost:8001/api/news";

/// Default production endpoint.
pub const DEFAULT_PRODUCTION_URL: &str = "https://gift-propaganda-cf8i.onrender.com/api/news";

/// Health identity of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointKind {
    Local,
    Production,
}

impl EndpointKind {
    /// The other candidate, used as the failover target.
    pub fn alternate(self) -> Self {
        match self {
            EndpointKind::Local => EndpointKind::Production,
            EndpointKind::Production => EndpointKind::Local,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EndpointKind::Local => "local",
            EndpointKind::Production => "production",
        }
    }
}

impl fmt::Display for EndpointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A backend base URL together with its health identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub kind: EndpointKind,
    pub url: String,
}

impl Endpoint {
    pub fn new(kind: EndpointKind, url: impl Into<String>) -> Self {
        Self {
            kind,
            url: url.into(),
        }
    }

    /// URL for a paginated list request.
    pub fn list_url(&self) -> String {
        self.url.clone()
    }

    /// URL for a single item: `<base>/<id>`.
    pub fn item_url(&self, id: u64) -> String {
        format!("{}/{id}", self.url.trim_end_matches('/'))
    }

    /// URL for the category list: `<base>/categories/`.
    pub fn categories_url(&self) -> String {
        format!("{}/categories/", self.url.trim_end_matches('/'))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.kind, self.url)
    }
}

/// The configured candidate endpoints.
///
/// ```rust
/// # use huginn::EndpointConfig;
/// let endpoints = EndpointConfig::new().local("http://127.0.0.1:9000/api/news");
/// assert_eq!(endpoints.local, "http://127.0.0.1:9000/api/news");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Development endpoint, probed on development hosts.
    #[serde(default = "default_local")]
    pub local: String,
    /// Reserved second local endpoint. Not used by selection.
    #[serde(default = "default_local_secondary")]
    pub local_secondary: String,
    /// Production endpoint, the fallback of last resort.
    #[serde(default = "default_production")]
    pub production: String,
}

fn default_local() -> String {
    DEFAULT_LOCAL_URL.to_string()
}

fn default_local_secondary() -> String {
    DEFAULT_LOCAL_SECONDARY_URL.to_string()
}

fn default_production() -> String {
    DEFAULT_PRODUCTION_URL.to_string()
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            local: default_local(),
            local_secondary: default_local_secondary(),
            production: default_production(),
        }
    }
}

impl EndpointConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn local(mut self, url: impl Into<String>) -> Self {
        self.local = url.into();
        self
    }

    pub fn local_secondary(mut self, url: impl Into<String>) -> Self {
        self.local_secondary = url.into();
        self
    }

    pub fn production(mut self, url: impl Into<String>) -> Self {
        self.production = url.into();
        self
    }

    /// The endpoint for a health identity.
    pub fn endpoint(&self, kind: EndpointKind) -> Endpoint {
        match kind {
            EndpointKind::Local => Endpoint::new(kind, &self.local),
            EndpointKind::Production => Endpoint::new(kind, &self.production),
        }
    }
}
