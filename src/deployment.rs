//! Host environment detection.
//!
//! The client never inspects globals. Everything it needs to know about
//! where it runs comes through a [`DeploymentContext`]: the hostname it is
//! served from and, on static hosting, an in-page [`NewsDelegate`] that
//! replaces the network path for news lists.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::types::NewsResponse;

/// Hostname treated as a development machine.
pub const DEVELOPMENT_HOST: &str = "localhost";

/// Hostname fragment identifying static hosting without a backend.
pub const STATIC_HOSTING_MARKER: &str = "github.io";

/// Deployment classes that change client behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentKind {
    /// Local development: probe the local endpoint first.
    Development,
    /// Any public host: production only, no probing.
    Public,
    /// Static hosting: news lists may come from the in-page delegate.
    StaticHosting,
}

impl DeploymentKind {
    /// Classify a hostname.
    pub fn from_hostname(hostname: &str) -> Self {
        if hostname == DEVELOPMENT_HOST {
            DeploymentKind::Development
        } else if hostname.contains(STATIC_HOSTING_MARKER) {
            DeploymentKind::StaticHosting
        } else {
            DeploymentKind::Public
        }
    }
}

/// In-page news API supplied by a static host.
#[async_trait]
pub trait NewsDelegate: Send + Sync {
    async fn get_news(
        &self,
        category: Option<&str>,
        page: u32,
        limit: u32,
    ) -> Result<NewsResponse>;
}

/// Capability describing the host the client runs in.
pub trait DeploymentContext: Send + Sync {
    /// Hostname the application is served from.
    fn hostname(&self) -> &str;

    /// In-page news API, if the host provides one.
    fn delegate(&self) -> Option<Arc<dyn NewsDelegate>> {
        None
    }

    fn kind(&self) -> DeploymentKind {
        DeploymentKind::from_hostname(self.hostname())
    }
}

/// A fixed hostname with an optional delegate.
///
/// ```rust
/// # use huginn::{DeploymentContext, DeploymentKind, HostDeployment};
/// let host = HostDeployment::new("news.example.com");
/// assert_eq!(host.kind(), DeploymentKind::Public);
/// ```
#[derive(Clone)]
pub struct HostDeployment {
    hostname: String,
    delegate: Option<Arc<dyn NewsDelegate>>,
}

impl HostDeployment {
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            delegate: None,
        }
    }

    /// A development host (`localhost`).
    pub fn development() -> Self {
        Self::new(DEVELOPMENT_HOST)
    }

    /// Attach an in-page news API.
    pub fn with_delegate(mut self, delegate: Arc<dyn NewsDelegate>) -> Self {
        self.delegate = Some(delegate);
        self
    }
}

impl fmt::Debug for HostDeployment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostDeployment")
            .field("hostname", &self.hostname)
            .field("delegate", &self.delegate.is_some())
            .finish()
    }
}

impl DeploymentContext for HostDeployment {
    fn hostname(&self) -> &str {
        &self.hostname
    }

    fn delegate(&self) -> Option<Arc<dyn NewsDelegate>> {
        self.delegate.clone()
    }
}
