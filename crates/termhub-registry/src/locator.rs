//! The endpoint-resolution contract and the static test locator.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::RegistryError;

/// A live network address for one service instance, produced per call by a
/// [`ServiceLocator`]. Callers must not hold on to it across calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEndpoint {
    pub host: String,
    pub port: u16,
}

impl ResolvedEndpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for ResolvedEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// How to pick one instance when the registry returns several healthy ones.
#[derive(Debug)]
pub enum SelectionStrategy {
    /// Always take the first healthy instance returned by the registry.
    First,
    /// Rotate through healthy instances with an atomic counter.
    RoundRobin(AtomicUsize),
}

impl SelectionStrategy {
    pub fn round_robin() -> Self {
        Self::RoundRobin(AtomicUsize::new(0))
    }

    pub(crate) fn pick<'a>(&self, instances: &'a [ResolvedEndpoint]) -> Option<&'a ResolvedEndpoint> {
        match self {
            Self::First => instances.first(),
            Self::RoundRobin(counter) => {
                if instances.is_empty() {
                    None
                } else {
                    let idx = counter.fetch_add(1, Ordering::Relaxed) % instances.len();
                    instances.get(idx)
                }
            }
        }
    }
}

impl Default for SelectionStrategy {
    fn default() -> Self {
        Self::First
    }
}

/// Resolves a logical service name to one healthy instance address.
///
/// Implementations must never return an address that is not currently
/// passing health checks; zero healthy instances is
/// [`RegistryError::Unavailable`], a distinguishable failure.
#[async_trait]
pub trait ServiceLocator: Send + Sync {
    async fn resolve(&self, service: &str) -> Result<ResolvedEndpoint, RegistryError>;
}

/// A locator over a fixed set of endpoints.
///
/// Used by tests and by deployments that run without a registry; the same
/// [`SelectionStrategy`] semantics apply.
#[derive(Debug, Default)]
pub struct StaticLocator {
    services: HashMap<String, Vec<ResolvedEndpoint>>,
    selection: SelectionStrategy,
}

impl StaticLocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a single-instance service.
    #[must_use]
    pub fn with_instance(self, service: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        self.with_instances(service, vec![ResolvedEndpoint::new(host, port)])
    }

    /// Registers a service with an explicit instance list.
    #[must_use]
    pub fn with_instances(
        mut self,
        service: impl Into<String>,
        instances: Vec<ResolvedEndpoint>,
    ) -> Self {
        self.services.insert(service.into(), instances);
        self
    }

    #[must_use]
    pub fn with_selection(mut self, selection: SelectionStrategy) -> Self {
        self.selection = selection;
        self
    }
}

#[async_trait]
impl ServiceLocator for StaticLocator {
    async fn resolve(&self, service: &str) -> Result<ResolvedEndpoint, RegistryError> {
        self.services
            .get(service)
            .and_then(|instances| self.selection.pick(instances))
            .cloned()
            .ok_or_else(|| RegistryError::Unavailable {
                service: service.to_string(),
            })
    }
}
