//! Telemetry metric name constants.
//!
//! Centralised metric names for huginn operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `huginn_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `endpoint`: endpoint identity ("local" | "production")
//! - `operation`: fetch operation ("news", "news_item", "categories")
//! - `status`: outcome, "ok" or "error"

/// Total single attempts sent over the network.
///
/// Labels: `endpoint`, `operation`, `status` ("ok" | "error").
pub const REQUESTS_TOTAL: &str = "huginn_requests_total";

/// Single attempt duration in seconds.
///
/// Labels: `endpoint`, `operation`.
pub const REQUEST_DURATION_SECONDS: &str = "huginn_request_duration_seconds";

/// Total retry attempts (not counting the initial request).
///
/// Labels: `operation`.
pub const RETRIES_TOTAL: &str = "huginn_retries_total";

/// Total active-endpoint switches caused by a failed attempt.
///
/// Labels: `from`, `to`.
pub const FAILOVERS_TOTAL: &str = "huginn_failovers_total";

/// Total cache hits.
///
/// Labels: `operation`.
pub const CACHE_HITS_TOTAL: &str = "huginn_cache_hits_total";

/// Total cache misses (including expired entries).
///
/// Labels: `operation`.
pub const CACHE_MISSES_TOTAL: &str = "huginn_cache_misses_total";

/// Total health probes sent.
///
/// Labels: `endpoint`, `status` ("ok" | "error").
pub const PROBES_TOTAL: &str = "huginn_probes_total";

/// Total responses replaced by synthetic fallback data.
///
/// Labels: `operation`.
pub const DEGRADED_RESPONSES_TOTAL: &str = "huginn_degraded_responses_total";
