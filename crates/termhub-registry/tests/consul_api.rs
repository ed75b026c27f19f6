use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use termhub_registry::{
    ConsulConfig, ConsulRegistry, HealthCheck, RegistryError, SelectionStrategy, ServiceLocator,
    ServiceRegistration,
};

fn registry_for(server: &MockServer) -> ConsulRegistry {
    ConsulRegistry::new(
        ConsulConfig::new()
            .with_address(server.uri())
            .with_request_timeout(Duration::from_secs(2)),
    )
}

fn health_entry(service_address: &str, node_address: &str, port: u16) -> serde_json::Value {
    json!({
        "Node": { "Node": "node-1", "Address": node_address },
        "Service": {
            "ID": "identity-service-1",
            "Service": "identity-service",
            "Address": service_address,
            "Port": port
        },
        "Checks": [{ "Status": "passing" }]
    })
}

#[tokio::test]
async fn resolve_returns_passing_instance() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/health/service/identity-service"))
        .and(query_param("passing", "true"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([health_entry("10.0.0.5", "10.1.0.1", 8080)])),
        )
        .mount(&server)
        .await;

    let registry = registry_for(&server);
    let endpoint = registry.resolve("identity-service").await.unwrap();
    assert_eq!(endpoint.host, "10.0.0.5");
    assert_eq!(endpoint.port, 8080);
}

#[tokio::test]
async fn resolve_falls_back_to_node_address() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/health/service/identity-service"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([health_entry("", "10.1.0.1", 8080)])),
        )
        .mount(&server)
        .await;

    let registry = registry_for(&server);
    let endpoint = registry.resolve("identity-service").await.unwrap();
    assert_eq!(endpoint.host, "10.1.0.1");
}

#[tokio::test]
async fn resolve_with_zero_passing_instances_is_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/health/service/identity-service"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let registry = registry_for(&server);
    let err = registry.resolve("identity-service").await.unwrap_err();
    assert!(matches!(
        err,
        RegistryError::Unavailable { service } if service == "identity-service"
    ));
}

#[tokio::test]
async fn resolve_round_robin_rotates_across_instances() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/health/service/identity-service"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            health_entry("10.0.0.5", "10.1.0.1", 8080),
            health_entry("10.0.0.6", "10.1.0.2", 8080),
        ])))
        .mount(&server)
        .await;

    let registry = registry_for(&server).with_selection(SelectionStrategy::round_robin());
    let first = registry.resolve("identity-service").await.unwrap();
    let second = registry.resolve("identity-service").await.unwrap();
    assert_eq!(first.host, "10.0.0.5");
    assert_eq!(second.host, "10.0.0.6");
}

#[tokio::test]
async fn register_and_deregister_hit_agent_endpoints() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v1/agent/service/register"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/v1/agent/service/deregister/termhub-1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let registry = registry_for(&server);
    registry
        .register(&ServiceRegistration {
            id: "termhub-1".into(),
            name: "termhub".into(),
            address: "10.0.0.9".into(),
            port: 8080,
            check: Some(HealthCheck {
                http: "http://10.0.0.9:8080/healthz".into(),
                interval: "10s".into(),
                timeout: "2s".into(),
                deregister_after: "1m".into(),
            }),
        })
        .await
        .unwrap();

    registry.deregister("termhub-1").await.unwrap();
}

#[tokio::test]
async fn wait_until_passing_times_out_when_service_never_appears() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/health/service/go-main-service"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let registry = registry_for(&server);
    let err = registry
        .wait_until_passing("go-main-service", Duration::from_millis(50))
        .await
        .unwrap_err();
    assert!(matches!(err, RegistryError::WaitTimeout { .. }));
}
