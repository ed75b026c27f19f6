//! Consul-compatible registry client.
//!
//! Talks to the registry's HTTP API: the health endpoint for resolution
//! (filtered to passing instances) and the agent endpoints for process
//! registration at bootstrap. Any backend honoring those routes satisfies
//! the contract.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::RegistryError;
use crate::locator::{ResolvedEndpoint, SelectionStrategy, ServiceLocator};

/// Configuration for the registry client.
#[derive(Debug, Clone)]
pub struct ConsulConfig {
    /// Base address of the registry agent (default: `http://127.0.0.1:8500`).
    pub address: String,

    /// HTTP request timeout (default: 10 seconds).
    pub request_timeout: Duration,
}

impl Default for ConsulConfig {
    fn default() -> Self {
        Self {
            address: "http://127.0.0.1:8500".to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl ConsulConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the registry agent address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Sets the HTTP request timeout.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// A service registration submitted to the agent at bootstrap.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceRegistration {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "Port")]
    pub port: u16,
    #[serde(rename = "Check", skip_serializing_if = "Option::is_none")]
    pub check: Option<HealthCheck>,
}

/// The agent-side health check attached to a registration.
#[derive(Debug, Clone, Serialize)]
pub struct HealthCheck {
    #[serde(rename = "HTTP")]
    pub http: String,
    #[serde(rename = "Interval")]
    pub interval: String,
    #[serde(rename = "Timeout")]
    pub timeout: String,
    #[serde(rename = "DeregisterCriticalServiceAfter")]
    pub deregister_after: String,
}

#[derive(Debug, Deserialize)]
struct HealthEntry {
    #[serde(rename = "Node", default)]
    node: Option<NodeInfo>,
    #[serde(rename = "Service")]
    service: ServiceInfo,
}

#[derive(Debug, Deserialize)]
struct NodeInfo {
    #[serde(rename = "Address", default)]
    address: String,
}

#[derive(Debug, Deserialize)]
struct ServiceInfo {
    #[serde(rename = "Address", default)]
    address: String,
    #[serde(rename = "Port")]
    port: u16,
}

impl HealthEntry {
    /// The instance address, falling back to the node address when the
    /// service registration left its own address empty (Consul semantics).
    fn endpoint(&self) -> ResolvedEndpoint {
        let host = if self.service.address.is_empty() {
            self.node
                .as_ref()
                .map(|n| n.address.clone())
                .unwrap_or_default()
        } else {
            self.service.address.clone()
        };
        ResolvedEndpoint::new(host, self.service.port)
    }
}

/// Registry client implementing [`ServiceLocator`] over the Consul HTTP API.
///
/// # Panics
///
/// `new` panics if the HTTP client cannot be created (should not happen in
/// practice).
pub struct ConsulRegistry {
    http: reqwest::Client,
    config: ConsulConfig,
    selection: SelectionStrategy,
}

impl ConsulRegistry {
    #[must_use]
    pub fn new(config: ConsulConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .expect("Failed to create HTTP client");
        Self {
            http,
            config,
            selection: SelectionStrategy::default(),
        }
    }

    /// Creates a client with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ConsulConfig::default())
    }

    /// Overrides the instance-selection strategy.
    #[must_use]
    pub fn with_selection(mut self, selection: SelectionStrategy) -> Self {
        self.selection = selection;
        self
    }

    /// Registers this process with the agent.
    pub async fn register(&self, registration: &ServiceRegistration) -> Result<(), RegistryError> {
        let url = format!("{}/v1/agent/service/register", self.config.address);
        let response = self
            .http
            .put(&url)
            .json(registration)
            .send()
            .await
            .map_err(|e| RegistryError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(RegistryError::Transport(format!(
                "register returned status {}",
                response.status()
            )));
        }

        tracing::info!(service = %registration.name, id = %registration.id, "registered with service registry");
        Ok(())
    }

    /// Deregisters this process from the agent. Called on shutdown.
    pub async fn deregister(&self, service_id: &str) -> Result<(), RegistryError> {
        let url = format!(
            "{}/v1/agent/service/deregister/{}",
            self.config.address, service_id
        );
        let response = self
            .http
            .put(&url)
            .send()
            .await
            .map_err(|e| RegistryError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(RegistryError::Transport(format!(
                "deregister returned status {}",
                response.status()
            )));
        }

        tracing::info!(id = %service_id, "deregistered from service registry");
        Ok(())
    }

    /// Polls the registry until `service` has at least one passing instance
    /// or `timeout` elapses. Used at bootstrap to order dependencies.
    pub async fn wait_until_passing(
        &self,
        service: &str,
        timeout: Duration,
    ) -> Result<(), RegistryError> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            match self.healthy_instances(service).await {
                Ok(instances) if !instances.is_empty() => return Ok(()),
                Ok(_) => {}
                Err(e) => {
                    tracing::debug!(service = %service, error = %e, "registry not ready yet");
                }
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(RegistryError::WaitTimeout {
                    service: service.to_string(),
                });
            }
            tokio::time::sleep(Duration::from_secs(2)).await;
        }
    }

    async fn healthy_instances(
        &self,
        service: &str,
    ) -> Result<Vec<ResolvedEndpoint>, RegistryError> {
        let url = format!(
            "{}/v1/health/service/{}?passing=true",
            self.config.address, service
        );

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| RegistryError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(RegistryError::Transport(format!(
                "health query returned status {}",
                response.status()
            )));
        }

        let entries: Vec<HealthEntry> = response
            .json()
            .await
            .map_err(|e| RegistryError::Decode(e.to_string()))?;

        Ok(entries.iter().map(HealthEntry::endpoint).collect())
    }
}

#[async_trait]
impl ServiceLocator for ConsulRegistry {
    async fn resolve(&self, service: &str) -> Result<ResolvedEndpoint, RegistryError> {
        let instances = self.healthy_instances(service).await?;

        let endpoint = self
            .selection
            .pick(&instances)
            .cloned()
            .ok_or_else(|| RegistryError::Unavailable {
                service: service.to_string(),
            })?;

        tracing::debug!(service = %service, endpoint = %endpoint, "resolved service instance");
        Ok(endpoint)
    }
}
