//! Tests for [`EndpointSelector`] failover rules.

use std::sync::Arc;
use std::thread;

use huginn::{EndpointConfig, EndpointKind, EndpointSelector, HealthMap};

#[test]
fn failover_moves_to_production_and_back() {
    let config = EndpointConfig::default();
    let selector = EndpointSelector::with_state(
        config.clone(),
        EndpointKind::Local,
        HealthMap {
            local: true,
            production: true,
        },
    );

    selector.report_failure(&config.endpoint(EndpointKind::Local));
    assert_eq!(selector.current().kind, EndpointKind::Production);

    selector.set_health(EndpointKind::Production, false);
    selector.report_failure(&config.endpoint(EndpointKind::Production));
    assert_eq!(selector.current().kind, EndpointKind::Local);
}

#[test]
fn production_without_healthy_local_stays_put() {
    let config = EndpointConfig::default();
    let selector = EndpointSelector::with_state(
        config.clone(),
        EndpointKind::Production,
        HealthMap {
            local: false,
            production: true,
        },
    );

    assert!(!selector.report_failure(&config.endpoint(EndpointKind::Production)));
    assert_eq!(selector.current().kind, EndpointKind::Production);
}

#[test]
fn snapshot_reports_urls_and_flags() {
    let config = EndpointConfig::new()
        .local("http://127.0.0.1:1/api/news")
        .production("https://news.example.com/api/news");
    let selector = EndpointSelector::new(config);
    selector.select(EndpointKind::Production);
    selector.set_health(EndpointKind::Production, true);

    let snapshot = selector.snapshot();
    assert_eq!(snapshot.current.url, "https://news.example.com/api/news");
    assert!(snapshot.health.production);
    assert!(!snapshot.health.local);
}

#[test]
fn concurrent_failures_switch_once() {
    let config = EndpointConfig::default();
    let selector = Arc::new(EndpointSelector::with_state(
        config.clone(),
        EndpointKind::Local,
        HealthMap {
            local: true,
            production: true,
        },
    ));

    // Every caller saw local fail; only the first report may switch.
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let selector = Arc::clone(&selector);
            let local = config.endpoint(EndpointKind::Local);
            thread::spawn(move || selector.report_failure(&local))
        })
        .collect();

    let switches = handles
        .into_iter()
        .map(|h| h.join().expect("thread panicked"))
        .filter(|switched| *switched)
        .count();

    assert_eq!(switches, 1);
    assert_eq!(selector.current().kind, EndpointKind::Production);
}
