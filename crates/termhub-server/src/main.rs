use std::env;
use std::sync::Arc;

use termhub_cache::{CacheStore, MemoryCacheStore, RedisCacheStore};
use termhub_registry::{
    ConsulConfig, ConsulRegistry, HealthCheck, ServiceLocator, ServiceRegistration,
};
use termhub_server::config::loader::load_config;
use termhub_server::{AppState, observability, router};

/// How the configuration path was determined.
#[derive(Debug, Clone, Copy)]
enum ConfigSource {
    /// From --config CLI argument
    CliArgument,
    /// From TERMHUB_CONFIG environment variable
    EnvironmentVariable,
    /// Default path (termhub.toml)
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CliArgument => write!(f, "CLI argument (--config)"),
            Self::EnvironmentVariable => write!(f, "environment variable (TERMHUB_CONFIG)"),
            Self::Default => write!(f, "default"),
        }
    }
}

#[tokio::main]
async fn main() {
    // Load .env file if present (before anything else)
    if let Err(e) = dotenvy::dotenv() {
        if !matches!(e, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound)
        {
            eprintln!("Warning: Failed to load .env file: {e}");
        }
    }

    // Initialize tracing early with the default level
    observability::init_tracing();

    let (config_path, source) = resolve_config_path();

    let cfg = match load_config(Some(&config_path)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(2);
        }
    };

    tracing::info!(
        path = %config_path,
        source = %source,
        "Configuration loaded"
    );

    observability::apply_logging_level(&cfg.logging.level);

    // Distributed cache, degrading gracefully to the in-memory store.
    let cache: Arc<dyn CacheStore> = if cfg.redis.enabled {
        match RedisCacheStore::from_url(&cfg.redis.url) {
            Ok(store) => {
                tracing::info!(url = %cfg.redis.url, "redis cache enabled");
                Arc::new(store)
            }
            Err(e) => {
                tracing::warn!(error = %e, "redis unavailable, falling back to in-memory cache");
                Arc::new(MemoryCacheStore::new())
            }
        }
    } else {
        Arc::new(MemoryCacheStore::new())
    };

    let registry = Arc::new(ConsulRegistry::new(
        ConsulConfig::new().with_address(&cfg.consul.address),
    ));

    // Dependencies must be passing before this instance serves.
    for dependency in &cfg.consul.wait_for {
        if let Err(e) = registry
            .wait_until_passing(dependency, cfg.consul.wait_timeout())
            .await
        {
            eprintln!("Dependency not ready: {e}");
            std::process::exit(2);
        }
    }

    if cfg.consul.enabled {
        let registration = ServiceRegistration {
            id: cfg.consul.service_id().to_string(),
            name: cfg.consul.service_name.clone(),
            address: cfg.consul.advertise_address.clone(),
            port: cfg.server.port,
            check: Some(HealthCheck {
                http: format!(
                    "http://{}:{}/healthz",
                    cfg.consul.advertise_address, cfg.server.port
                ),
                interval: "10s".into(),
                timeout: "2s".into(),
                deregister_after: "1m".into(),
            }),
        };
        if let Err(e) = registry.register(&registration).await {
            eprintln!("Service registration failed: {e}");
            std::process::exit(2);
        }
    }

    let addr = cfg.addr();
    let consul = cfg.consul.clone();
    let state = AppState::build(cfg, Arc::clone(&registry) as Arc<dyn ServiceLocator>, cache);
    let app = router(state);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to bind {addr}: {e}");
            std::process::exit(2);
        }
    };
    tracing::info!(addr = %addr, "server listening");

    let result = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    if consul.enabled {
        if let Err(e) = registry.deregister(consul.service_id()).await {
            tracing::warn!(error = %e, "failed to deregister from service registry");
        }
    }

    if let Err(err) = result {
        eprintln!("Server error: {err}");
    }
}

/// Resolve the configuration file path.
///
/// Priority order:
/// 1. CLI argument: --config <path>
/// 2. Environment variable: TERMHUB_CONFIG
/// 3. Default: termhub.toml
fn resolve_config_path() -> (String, ConfigSource) {
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            if let Some(path) = args.next() {
                return (path, ConfigSource::CliArgument);
            }
        }
    }

    if let Ok(path) = env::var("TERMHUB_CONFIG") {
        if !path.is_empty() {
            return (path, ConfigSource::EnvironmentVariable);
        }
    }

    ("termhub.toml".to_string(), ConfigSource::Default)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
