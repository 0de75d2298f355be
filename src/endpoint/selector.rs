//! Active endpoint and health flags.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{Endpoint, EndpointConfig, EndpointKind};
use crate::telemetry;

/// Reachability flag per endpoint, as of the latest probe or request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthMap {
    pub local: bool,
    pub production: bool,
}

impl HealthMap {
    pub fn get(&self, kind: EndpointKind) -> bool {
        match kind {
            EndpointKind::Local => self.local,
            EndpointKind::Production => self.production,
        }
    }

    pub fn set(&mut self, kind: EndpointKind, healthy: bool) {
        match kind {
            EndpointKind::Local => self.local = healthy,
            EndpointKind::Production => self.production = healthy,
        }
    }
}

/// Point-in-time view of the selector for observability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointSnapshot {
    pub current: Endpoint,
    pub health: HealthMap,
}

#[derive(Debug)]
struct SelectorState {
    active: EndpointKind,
    health: HealthMap,
}

/// Holds the active endpoint and the health of each candidate.
///
/// Every method takes the lock for a single read or read-modify-write and
/// never across an `.await`, so concurrent fetches observe either the state
/// before or after a switch, never a mix.
///
/// Starts on the local endpoint with both flags unhealthy until
/// [`initialize()`](super::initialize) runs.
#[derive(Debug)]
pub struct EndpointSelector {
    endpoints: EndpointConfig,
    state: Mutex<SelectorState>,
}

impl EndpointSelector {
    pub fn new(endpoints: EndpointConfig) -> Self {
        Self::with_state(endpoints, EndpointKind::Local, HealthMap::default())
    }

    /// Create a selector with a known active endpoint and health.
    pub fn with_state(endpoints: EndpointConfig, active: EndpointKind, health: HealthMap) -> Self {
        Self {
            endpoints,
            state: Mutex::new(SelectorState { active, health }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SelectorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The endpoint new requests should target.
    pub fn current(&self) -> Endpoint {
        let active = self.lock().active;
        self.endpoints.endpoint(active)
    }

    /// The configured candidates.
    pub fn endpoints(&self) -> &EndpointConfig {
        &self.endpoints
    }

    /// Record a failed attempt against `attempted`.
    ///
    /// Switches to the alternate endpoint if `attempted` is still the active
    /// one and the alternate is marked healthy. Health flags are left as
    /// they are. Returns whether the active endpoint changed.
    pub fn report_failure(&self, attempted: &Endpoint) -> bool {
        let mut state = self.lock();
        if state.active != attempted.kind {
            return false;
        }
        let alternate = attempted.kind.alternate();
        if !state.health.get(alternate) {
            return false;
        }
        state.active = alternate;
        drop(state);

        info!(from = %attempted.kind, to = %alternate, "failing over to alternate endpoint");
        metrics::counter!(telemetry::FAILOVERS_TOTAL,
            "from" => attempted.kind.as_str(),
            "to" => alternate.as_str(),
        )
        .increment(1);
        true
    }

    /// Record a successful request against `attempted`. Never switches.
    pub fn report_success(&self, attempted: &Endpoint) {
        self.lock().health.set(attempted.kind, true);
    }

    /// Make `kind` the active endpoint.
    pub fn select(&self, kind: EndpointKind) {
        self.lock().active = kind;
    }

    pub fn set_health(&self, kind: EndpointKind, healthy: bool) {
        self.lock().health.set(kind, healthy);
    }

    pub fn health(&self) -> HealthMap {
        self.lock().health
    }

    pub fn snapshot(&self) -> EndpointSnapshot {
        let state = self.lock();
        EndpointSnapshot {
            current: self.endpoints.endpoint(state.active),
            health: state.health,
        }
    }
}
