use std::{env, fs};

use termhub_server::config::loader::load_config;

#[test]
fn config_parsing_and_env_overrides_and_validation() {
    // Create a temporary TOML configuration file
    let dir = tempfile::tempdir().expect("tmp dir");
    let path = dir.path().join("termhub.toml");

    let toml_content = r#"
[server]
host = "127.0.0.1"
port = 8081

[consul]
enabled = true
address = "http://127.0.0.1:8500"
service_name = "termhub"
advertise_address = "10.0.0.9"
wait_for = ["identity-service"]

[redis]
enabled = true
url = "redis://127.0.0.1:6379"

[cache]
user_ttl_seconds = 300

[upstreams]
user_service = "identity-service"
organization_service = "organization-service"
message_service = "message-service"
file_service = "file-service"

[logging]
level = "debug"
"#;
    fs::write(&path, toml_content).expect("write toml");

    // 1) Valid config parses
    let cfg = load_config(path.to_str()).expect("should parse config");
    assert_eq!(cfg.server.port, 8081);
    assert_eq!(cfg.consul.service_name, "termhub");
    assert_eq!(cfg.consul.wait_for, vec!["identity-service".to_string()]);
    assert_eq!(cfg.cache.user_ttl_seconds, 300);
    assert_eq!(cfg.upstreams.user_service, "identity-service");
    assert_eq!(cfg.logging.level.to_ascii_lowercase(), "debug");

    // 2) Env override should win over file
    unsafe {
        env::set_var("TERMHUB__CACHE__USER_TTL_SECONDS", "60");
    }
    let cfg_env = load_config(path.to_str()).expect("should parse config with env overrides");
    assert_eq!(cfg_env.cache.user_ttl_seconds, 60);
    unsafe {
        env::remove_var("TERMHUB__CACHE__USER_TTL_SECONDS");
    }

    // 3) Validation failure surfaces as an error
    let bad = toml_content.replace("port = 8081", "port = 0");
    fs::write(&path, bad).expect("write toml");
    assert!(load_config(path.to_str()).is_err());
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let cfg = load_config(Some("/definitely/not/here/termhub.toml")).expect("defaults validate");
    assert_eq!(cfg.server.port, 8080);
    assert!(!cfg.redis.enabled);
}
