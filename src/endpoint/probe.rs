//! Startup health probing.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use super::{Endpoint, EndpointKind, EndpointSelector};
use crate::deployment::{DeploymentContext, DeploymentKind};
use crate::telemetry;

/// Timeout for a single health probe.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// One-shot reachability check.
///
/// Implementations must not fail: every error is reported as unreachable.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn probe(&self, endpoint: &Endpoint) -> bool;
}

/// Probes an endpoint with `GET <url>?limit=1`.
#[derive(Debug, Clone)]
pub struct HttpHealthProbe {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpHealthProbe {
    pub fn new(client: reqwest::Client) -> Self {
        Self::with_timeout(client, PROBE_TIMEOUT)
    }

    pub fn with_timeout(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

#[async_trait]
impl HealthProbe for HttpHealthProbe {
    async fn probe(&self, endpoint: &Endpoint) -> bool {
        let result = self
            .client
            .get(&endpoint.url)
            .query(&[("limit", "1")])
            .timeout(self.timeout)
            .send()
            .await;
        let reachable = match result {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!(endpoint = %endpoint, error = %e, "health probe failed");
                false
            }
        };
        metrics::counter!(telemetry::PROBES_TOTAL,
            "endpoint" => endpoint.kind.as_str(),
            "status" => if reachable { "ok" } else { "error" },
        )
        .increment(1);
        reachable
    }
}

/// Choose the initial endpoint for a deployment.
///
/// - Development host: probe local and select it when reachable; otherwise
///   probe production and select it whatever the outcome, recording its
///   health from the probe.
/// - Any other host: select production without probing, marking production
///   healthy and local unhealthy.
///
/// Never fails; production is the fallback of last resort. Returns the
/// selected endpoint.
pub async fn initialize(
    selector: &EndpointSelector,
    prober: &dyn HealthProbe,
    deployment: &dyn DeploymentContext,
) -> Endpoint {
    match deployment.kind() {
        DeploymentKind::Development => {
            let local = selector.endpoints().endpoint(EndpointKind::Local);
            let local_healthy = prober.probe(&local).await;
            selector.set_health(EndpointKind::Local, local_healthy);
            if local_healthy {
                selector.select(EndpointKind::Local);
            } else {
                let production = selector.endpoints().endpoint(EndpointKind::Production);
                let production_healthy = prober.probe(&production).await;
                selector.set_health(EndpointKind::Production, production_healthy);
                selector.select(EndpointKind::Production);
            }
        }
        DeploymentKind::Public | DeploymentKind::StaticHosting => {
            selector.select(EndpointKind::Production);
            selector.set_health(EndpointKind::Production, true);
            selector.set_health(EndpointKind::Local, false);
        }
    }

    let snapshot = selector.snapshot();
    info!(
        hostname = deployment.hostname(),
        endpoint = %snapshot.current,
        local_healthy = snapshot.health.local,
        production_healthy = snapshot.health.production,
        "selected initial endpoint"
    );
    snapshot.current
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deployment::HostDeployment;
    use crate::endpoint::EndpointConfig;

    struct FixedProbe {
        local: bool,
        production: bool,
    }

    #[async_trait]
    impl HealthProbe for FixedProbe {
        async fn probe(&self, endpoint: &Endpoint) -> bool {
            match endpoint.kind {
                EndpointKind::Local => self.local,
                EndpointKind::Production => self.production,
            }
        }
    }

    #[tokio::test]
    async fn development_with_local_down_and_production_down_still_selects_production() {
        let selector = EndpointSelector::new(EndpointConfig::default());
        let prober = FixedProbe {
            local: false,
            production: false,
        };

        let selected = initialize(&selector, &prober, &HostDeployment::development()).await;

        assert_eq!(selected.kind, EndpointKind::Production);
        assert!(!selector.health().local);
        assert!(!selector.health().production);
    }

    #[tokio::test]
    async fn static_hosting_selects_production() {
        let selector = EndpointSelector::new(EndpointConfig::default());
        let prober = FixedProbe {
            local: true,
            production: true,
        };

        let selected = initialize(&selector, &prober, &HostDeployment::new("me.github.io")).await;

        assert_eq!(selected.kind, EndpointKind::Production);
        assert!(!selector.health().local);
    }

    #[tokio::test]
    async fn http_probe_reports_unreachable_host_as_false() {
        // Port 9 (discard) on localhost is expected to refuse connections.
        let probe = HttpHealthProbe::with_timeout(reqwest::Client::new(), Duration::from_millis(500));
        let endpoint = Endpoint::new(EndpointKind::Local, "http://127.0.0.1:9/api/news");
        assert!(!probe.probe(&endpoint).await);
    }
}
