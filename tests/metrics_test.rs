//! Tests for metrics integration.
//!
//! Uses `metrics_util::debugging::DebuggingRecorder` to capture and assert
//! on emitted metrics without needing a real exporter.

use std::time::Duration;

use metrics_util::MetricKind;
use metrics_util::debugging::{DebugValue, DebuggingRecorder};

use huginn::cache::{CacheKey, ResponseCache};
use huginn::{
    EndpointConfig, EndpointKind, EndpointSelector, HealthMap, HuginnError, Result, RetryConfig,
    execute_with_retry, telemetry,
};

type SnapshotVec = Vec<(
    metrics_util::CompositeKey,
    Option<metrics::Unit>,
    Option<metrics::SharedString>,
    DebugValue,
)>;

// ============================================================================
// Helpers
// ============================================================================

/// Sum all counter values matching a given metric name.
fn counter_total(snapshot: &SnapshotVec, name: &str) -> u64 {
    snapshot
        .iter()
        .filter(|(key, _, _, _)| key.kind() == MetricKind::Counter && key.key().name() == name)
        .map(|(_, _, _, value)| match value {
            DebugValue::Counter(v) => *v,
            _ => 0,
        })
        .sum()
}

/// Sum counter values for `name` whose labels include `label = value`.
fn counter_with_label(snapshot: &SnapshotVec, name: &str, label: &str, value: &str) -> u64 {
    snapshot
        .iter()
        .filter(|(key, _, _, _)| {
            key.kind() == MetricKind::Counter
                && key.key().name() == name
                && key
                    .key()
                    .labels()
                    .any(|l| l.key() == label && l.value() == value)
        })
        .map(|(_, _, _, value)| match value {
            DebugValue::Counter(v) => *v,
            _ => 0,
        })
        .sum()
}

fn has_histogram(snapshot: &SnapshotVec, name: &str) -> bool {
    snapshot
        .iter()
        .any(|(key, _, _, _)| key.kind() == MetricKind::Histogram && key.key().name() == name)
}

fn fast_retry() -> RetryConfig {
    RetryConfig::new().base_delay(Duration::from_millis(1))
}

// ============================================================================
// Tests
// ============================================================================

/// `block_in_place` keeps the sync `with_local_recorder` closure on the
/// current thread while `block_on` drives the inner async work.
#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn exhausted_request_records_attempts_and_retries() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    let selector = EndpointSelector::with_state(
        EndpointConfig::default(),
        EndpointKind::Local,
        HealthMap::default(),
    );

    let result: Result<()> = metrics::with_local_recorder(&recorder, || {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(execute_with_retry(
                &fast_retry(),
                &selector,
                "news",
                |_| async { Err(HuginnError::Timeout) },
            ))
        })
    });
    assert!(result.is_err());

    let snapshot = snapshotter.snapshot().into_vec();
    assert_eq!(counter_total(&snapshot, telemetry::REQUESTS_TOTAL), 3);
    assert_eq!(
        counter_with_label(&snapshot, telemetry::REQUESTS_TOTAL, "status", "error"),
        3
    );
    assert_eq!(counter_total(&snapshot, telemetry::RETRIES_TOTAL), 2);
    assert_eq!(counter_total(&snapshot, telemetry::FAILOVERS_TOTAL), 0);
    assert!(has_histogram(&snapshot, telemetry::REQUEST_DURATION_SECONDS));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn failover_is_counted_once_per_switch() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    let selector = EndpointSelector::with_state(
        EndpointConfig::default(),
        EndpointKind::Local,
        HealthMap {
            local: true,
            production: true,
        },
    );

    let result = metrics::with_local_recorder(&recorder, || {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(execute_with_retry(
                &fast_retry(),
                &selector,
                "news",
                |endpoint| async move {
                    match endpoint.kind {
                        EndpointKind::Local => Err(HuginnError::Timeout),
                        EndpointKind::Production => Ok(()),
                    }
                },
            ))
        })
    });
    assert!(result.is_ok());

    let snapshot = snapshotter.snapshot().into_vec();
    assert_eq!(
        counter_with_label(&snapshot, telemetry::FAILOVERS_TOTAL, "to", "production"),
        1
    );
    assert_eq!(
        counter_with_label(&snapshot, telemetry::REQUESTS_TOTAL, "status", "ok"),
        1
    );
    assert_eq!(counter_total(&snapshot, telemetry::RETRIES_TOTAL), 1);
}

#[test]
fn cache_lookups_record_hits_and_misses() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        let cache = ResponseCache::default();
        let key = CacheKey::categories();
        assert!(cache.get::<Vec<String>>(&key).is_none());
        cache.put(key.clone(), vec!["tech".to_string()]);
        assert!(cache.get::<Vec<String>>(&key).is_some());
        assert!(cache.get::<Vec<String>>(&key).is_some());
    });

    let snapshot = snapshotter.snapshot().into_vec();
    assert_eq!(counter_total(&snapshot, telemetry::CACHE_MISSES_TOTAL), 1);
    assert_eq!(counter_total(&snapshot, telemetry::CACHE_HITS_TOTAL), 2);
    assert_eq!(
        counter_with_label(
            &snapshot,
            telemetry::CACHE_HITS_TOTAL,
            "operation",
            "categories"
        ),
        2
    );
}

#[tokio::test]
async fn metrics_are_noop_without_recorder() {
    let selector = EndpointSelector::new(EndpointConfig::default());
    let value = execute_with_retry(&fast_retry(), &selector, "news", |_| async {
        Ok::<_, HuginnError>(1)
    })
    .await
    .unwrap();
    assert_eq!(value, 1);
}
