use std::net::SocketAddr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub consul: ConsulSettings,
    #[serde(default)]
    pub redis: RedisConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub upstreams: UpstreamConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("server.port must be > 0".into());
        }
        let lvl = self.logging.level.to_ascii_lowercase();
        let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
        if !valid_levels.contains(&lvl.as_str()) {
            return Err(format!("logging.level must be one of {valid_levels:?}"));
        }
        if self.consul.enabled && self.consul.address.is_empty() {
            return Err("consul.enabled=true requires consul.address".into());
        }
        if self.redis.enabled && self.redis.url.is_empty() {
            return Err("redis.enabled=true requires redis.url".into());
        }
        for (name, value) in [
            ("upstreams.user_service", &self.upstreams.user_service),
            (
                "upstreams.organization_service",
                &self.upstreams.organization_service,
            ),
            ("upstreams.message_service", &self.upstreams.message_service),
            ("upstreams.file_service", &self.upstreams.file_service),
        ] {
            if value.is_empty() {
                return Err(format!("{name} must not be empty"));
            }
        }
        Ok(())
    }

    pub fn addr(&self) -> SocketAddr {
        use std::net::{IpAddr, Ipv4Addr};
        let host: IpAddr = self
            .server
            .host
            .parse()
            .unwrap_or(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)));
        SocketAddr::from((host, self.server.port))
    }

    /// TTL applied by the cached user directory.
    pub fn user_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache.user_ttl_seconds)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Registry settings: where the agent lives, how this process registers,
/// and which dependencies to wait for before serving.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsulSettings {
    #[serde(default = "default_consul_enabled")]
    pub enabled: bool,
    #[serde(default = "default_consul_address")]
    pub address: String,
    #[serde(default = "default_service_name")]
    pub service_name: String,
    /// Instance id; defaults to the service name when empty.
    #[serde(default)]
    pub service_id: String,
    /// Address other services reach this instance at.
    #[serde(default = "default_advertise_address")]
    pub advertise_address: String,
    /// Logical services that must be passing before this one serves.
    #[serde(default)]
    pub wait_for: Vec<String>,
    #[serde(default = "default_wait_timeout_secs")]
    pub wait_timeout_secs: u64,
}

fn default_consul_enabled() -> bool {
    true
}
fn default_consul_address() -> String {
    "http://127.0.0.1:8500".into()
}
fn default_service_name() -> String {
    "termhub".into()
}
fn default_advertise_address() -> String {
    "127.0.0.1".into()
}
fn default_wait_timeout_secs() -> u64 {
    60
}

impl Default for ConsulSettings {
    fn default() -> Self {
        Self {
            enabled: default_consul_enabled(),
            address: default_consul_address(),
            service_name: default_service_name(),
            service_id: String::new(),
            advertise_address: default_advertise_address(),
            wait_for: Vec::new(),
            wait_timeout_secs: default_wait_timeout_secs(),
        }
    }
}

impl ConsulSettings {
    pub fn service_id(&self) -> &str {
        if self.service_id.is_empty() {
            &self.service_name
        } else {
            &self.service_id
        }
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }
}

/// Redis configuration (gracefully degrades to the in-memory store).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    #[serde(default = "default_redis_enabled")]
    pub enabled: bool,
    #[serde(default = "default_redis_url")]
    pub url: String,
}

fn default_redis_enabled() -> bool {
    false
}
fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            enabled: default_redis_enabled(),
            url: default_redis_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Lifetime of cached user-directory entries, in seconds. Zero means
    /// entries never expire.
    #[serde(default = "default_user_ttl")]
    pub user_ttl_seconds: u64,
}

fn default_user_ttl() -> u64 {
    300
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            user_ttl_seconds: default_user_ttl(),
        }
    }
}

/// Logical names the sibling services are registered under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_user_service")]
    pub user_service: String,
    #[serde(default = "default_organization_service")]
    pub organization_service: String,
    #[serde(default = "default_message_service")]
    pub message_service: String,
    #[serde(default = "default_file_service")]
    pub file_service: String,
}

fn default_user_service() -> String {
    "identity-service".into()
}
fn default_organization_service() -> String {
    "organization-service".into()
}
fn default_message_service() -> String {
    "message-service".into()
}
fn default_file_service() -> String {
    "file-service".into()
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            user_service: default_user_service(),
            organization_service: default_organization_service(),
            message_service: default_message_service(),
            file_service: default_file_service(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

pub mod loader {
    use super::AppConfig;
    use config::{Config, Environment, File};
    use std::path::PathBuf;

    pub fn load_config(path: Option<&str>) -> Result<AppConfig, String> {
        let mut builder = Config::builder();
        match path {
            Some(p) => {
                let pathbuf = PathBuf::from(p);
                if pathbuf.exists() {
                    builder = builder.add_source(File::from(pathbuf));
                }
            }
            None => {
                let default_path = PathBuf::from("termhub.toml");
                if default_path.exists() {
                    builder = builder.add_source(File::from(default_path));
                }
            }
        }
        // Environment variable overrides, e.g., TERMHUB__SERVER__PORT=9090
        builder = builder.add_source(
            Environment::with_prefix("TERMHUB")
                .try_parsing(true)
                .separator("__"),
        );
        let cfg = builder
            .build()
            .map_err(|e| format!("config build error: {e}"))?;
        let merged: AppConfig = cfg
            .try_deserialize()
            .map_err(|e| format!("config deserialize error: {e}"))?;
        merged.validate()?;
        Ok(merged)
    }
}
