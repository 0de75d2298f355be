//! Startup endpoint selection against live mock endpoints.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use huginn::{Endpoint, EndpointKind, HealthProbe, Huginn, HuginnBuilder};

/// Probe that counts calls and reports everything reachable.
#[derive(Default)]
struct CountingProbe {
    calls: AtomicU32,
}

#[async_trait]
impl HealthProbe for CountingProbe {
    async fn probe(&self, _endpoint: &Endpoint) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        true
    }
}

fn builder_for(local: &MockServer, production: &MockServer) -> HuginnBuilder {
    Huginn::builder()
        .local(format!("{}/api/news", local.uri()))
        .production(format!("{}/api/news", production.uri()))
}

async fn mount_probe(server: &MockServer, status: u16, expected: u64) {
    Mock::given(method("GET"))
        .and(path("/api/news"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(status).set_body_json(serde_json::json!({"data": []})))
        .expect(expected)
        .mount(server)
        .await;
}

#[tokio::test]
async fn development_host_selects_reachable_local() {
    let local = MockServer::start().await;
    let production = MockServer::start().await;
    mount_probe(&local, 200, 1).await;
    mount_probe(&production, 200, 0).await;

    let client = builder_for(&local, &production)
        .hostname("localhost")
        .connect()
        .await
        .unwrap();

    let status = client.status();
    assert_eq!(status.current.kind, EndpointKind::Local);
    assert!(status.health.local);
    assert!(!status.health.production);
}

#[tokio::test]
async fn development_host_falls_back_to_production() {
    let local = MockServer::start().await;
    let production = MockServer::start().await;
    mount_probe(&local, 503, 1).await;
    mount_probe(&production, 200, 1).await;

    let client = builder_for(&local, &production)
        .hostname("localhost")
        .connect()
        .await
        .unwrap();

    let status = client.status();
    assert_eq!(status.current.kind, EndpointKind::Production);
    assert!(!status.health.local);
    assert!(status.health.production);
}

#[tokio::test]
async fn development_host_with_nothing_reachable_selects_production() {
    let production = MockServer::start().await;
    mount_probe(&production, 500, 1).await;

    let client = Huginn::builder()
        .local("http://127.0.0.1:9/api/news")
        .production(format!("{}/api/news", production.uri()))
        .hostname("localhost")
        .connect()
        .await
        .unwrap();

    let status = client.status();
    assert_eq!(status.current.kind, EndpointKind::Production);
    assert!(!status.health.local);
    assert!(!status.health.production);
}

#[tokio::test]
async fn public_host_skips_probing() {
    let local = MockServer::start().await;
    let production = MockServer::start().await;
    mount_probe(&local, 200, 0).await;
    mount_probe(&production, 200, 0).await;

    let prober = Arc::new(CountingProbe::default());
    let client = builder_for(&local, &production)
        .hostname("news.example.com")
        .prober(prober.clone())
        .connect()
        .await
        .unwrap();

    assert_eq!(prober.calls.load(Ordering::SeqCst), 0);
    let status = client.status();
    assert_eq!(status.current.kind, EndpointKind::Production);
    assert!(status.health.production);
    assert!(!status.health.local);
}

#[tokio::test]
async fn initialize_runs_once() {
    let prober = Arc::new(CountingProbe::default());
    let client = Huginn::builder()
        .hostname("localhost")
        .prober(prober.clone())
        .build()
        .unwrap();
    assert!(!client.is_initialized());

    let (a, b) = tokio::join!(client.initialize(), client.initialize());
    client.initialize().await;

    assert_eq!(a, b);
    assert!(client.is_initialized());
    assert_eq!(prober.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn build_with_state_skips_probing() {
    let prober = Arc::new(CountingProbe::default());
    let client = Huginn::builder()
        .hostname("localhost")
        .prober(prober.clone())
        .build_with_state(
            EndpointKind::Production,
            huginn::HealthMap {
                local: true,
                production: true,
            },
        )
        .unwrap();

    client.initialize().await;
    assert_eq!(prober.calls.load(Ordering::SeqCst), 0);
    assert_eq!(client.status().current.kind, EndpointKind::Production);
}
