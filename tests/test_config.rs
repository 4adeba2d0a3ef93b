use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use docroot::config::Config;

#[test]
fn test_config_defaults() {
    let cfg = Config::default();

    assert_eq!(cfg.server.listen_addr, "0.0.0.0:8080");
    assert_eq!(cfg.server.max_connections, 256);
    assert_eq!(cfg.server.max_request_bytes, 1024 * 1024);
    assert_eq!(cfg.static_files.root, PathBuf::from("."));
    assert_eq!(cfg.static_files.not_found_page, "404.html");
    assert_eq!(cfg.static_files.max_file_bytes, 100 * 1024 * 1024);
}

#[test]
fn test_config_from_empty_yaml() {
    let cfg = Config::from_yaml("").unwrap();
    assert_eq!(cfg.server.listen_addr, "0.0.0.0:8080");
}

#[test]
fn test_config_partial_yaml_keeps_defaults() {
    let yaml = r#"
server:
  listen_addr: "127.0.0.1:9000"
  read_timeout_secs: 5
static_files:
  root: "/srv/www"
"#;
    let cfg = Config::from_yaml(yaml).unwrap();

    assert_eq!(cfg.server.listen_addr, "127.0.0.1:9000");
    assert_eq!(cfg.server.read_timeout_secs, 5);
    assert_eq!(cfg.server.write_timeout_secs, 30);
    assert_eq!(cfg.static_files.root, PathBuf::from("/srv/www"));
    assert_eq!(cfg.static_files.not_found_page, "404.html");
}

#[test]
fn test_config_invalid_yaml() {
    assert!(Config::from_yaml("server: [not, a, map]").is_err());
    assert!(Config::from_yaml("server:\n  max_connections: many").is_err());
}

#[test]
fn test_connection_settings() {
    let yaml = r#"
server:
  max_request_bytes: 2048
  read_timeout_secs: 3
  write_timeout_secs: 4
"#;
    let settings = Config::from_yaml(yaml).unwrap().server.connection_settings();

    assert_eq!(settings.max_request_bytes, 2048);
    assert_eq!(settings.read_timeout, Duration::from_secs(3));
    assert_eq!(settings.write_timeout, Duration::from_secs(4));
}

#[test]
fn test_env_overrides() {
    let env: HashMap<&str, &str> =
        HashMap::from([("LISTEN", "127.0.0.1:3000"), ("DOCROOT", "/var/www")]);

    let mut cfg = Config::default();
    cfg.apply_env(|key| env.get(key).map(|v| v.to_string()));

    assert_eq!(cfg.server.listen_addr, "127.0.0.1:3000");
    assert_eq!(cfg.static_files.root, PathBuf::from("/var/www"));
}

#[test]
fn test_env_overrides_absent() {
    let mut cfg = Config::from_yaml("server:\n  listen_addr: \"0.0.0.0:5000\"").unwrap();
    cfg.apply_env(|_| None);

    assert_eq!(cfg.server.listen_addr, "0.0.0.0:5000");
}

#[test]
fn test_config_clone() {
    let cfg1 = Config::default();
    let cfg2 = cfg1.clone();
    assert_eq!(cfg1.server.listen_addr, cfg2.server.listen_addr);
}
