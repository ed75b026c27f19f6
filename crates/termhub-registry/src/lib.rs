//! Service-registry client and endpoint resolution.
//!
//! Sibling services (identity, organization directory, localized messages,
//! file store) are reachable only through a dynamic registry with
//! health-check semantics. This crate provides:
//!
//! - [`ServiceLocator`] - the resolution contract: logical service name in,
//!   one healthy [`ResolvedEndpoint`] out
//! - [`ConsulRegistry`] - a Consul-compatible HTTP API client implementing
//!   the contract, plus agent registration used at process bootstrap
//! - [`StaticLocator`] - a fixed-endpoint locator for tests and
//!   registry-less deployments
//!
//! # Resolution freshness
//!
//! Resolution results are never cached: every call re-queries the registry,
//! trading latency for freshness. Instance selection among multiple healthy
//! instances is pluggable via [`SelectionStrategy`] without changing
//! callers.
//!
//! # Example
//!
//! ```ignore
//! use termhub_registry::{ConsulConfig, ConsulRegistry, ServiceLocator};
//!
//! let registry = ConsulRegistry::new(ConsulConfig::default());
//! let endpoint = registry.resolve("identity-service").await?;
//! println!("http://{}:{}", endpoint.host, endpoint.port);
//! ```

pub mod consul;
pub mod locator;

pub use consul::{ConsulConfig, ConsulRegistry, HealthCheck, ServiceRegistration};
pub use locator::{ResolvedEndpoint, SelectionStrategy, ServiceLocator, StaticLocator};

/// Errors that can occur while talking to the service registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The registry knows no instance of the service that is currently
    /// passing its health checks.
    #[error("No healthy instance of service '{service}'")]
    Unavailable {
        /// The logical service name that failed to resolve.
        service: String,
    },

    /// A network error occurred while querying the registry.
    #[error("Registry request failed: {0}")]
    Transport(String),

    /// The registry response could not be decoded.
    #[error("Failed to decode registry response: {0}")]
    Decode(String),

    /// A dependency did not become healthy within the allotted time.
    #[error("Timed out waiting for service '{service}' to pass health checks")]
    WaitTimeout {
        /// The logical service name that never became healthy.
        service: String,
    },
}
