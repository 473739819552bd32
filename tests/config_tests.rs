// tests/config_tests.rs

use search_health_probe::{
    config::{load_config, loader},
    AppError,
};
use serial_test::serial;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

fn clear_env() {
    for var in [
        loader::ENV_ENDPOINTS,
        loader::ENV_REQUEST_TIMEOUT,
        loader::ENV_CONNECT_TIMEOUT,
        loader::ENV_PROXY_URL,
    ] {
        std::env::remove_var(var);
    }
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
#[serial]
fn test_load_full_yaml() {
    clear_env();
    let file = write_config(
        r#"
check:
  name: "Search cluster"
  category: "Search"
client:
  connect_timeout_secs: 2
  request_timeout_secs: 7
endpoints:
  - uri: "http://search.local:9200"
    repeat_after_secs: 30
  - uri: "https://search.example.com"
"#,
    );

    let config = load_config(file.path()).unwrap();

    assert_eq!(config.check.name, "Search cluster");
    assert_eq!(config.check.category, "Search");
    assert_eq!(config.client.connect_timeout_secs, 2);
    assert_eq!(config.client.request_timeout_secs, Some(7));
    assert_eq!(config.endpoints.len(), 2);
    assert_eq!(config.endpoints[0].repeat_after_secs, Some(30));
    assert_eq!(config.endpoints[1].repeat_after(), None);
}

#[test]
#[serial]
fn test_defaults_fill_missing_sections() {
    clear_env();
    let file = write_config("endpoints:\n  - uri: \"http://search.local:9200\"\n");

    let config = load_config(file.path()).unwrap();

    assert_eq!(config.check.name, "Monitor ElasticSearch");
    assert_eq!(config.check.category, "Database");
    assert_eq!(config.client.connect_timeout_secs, 5);
    assert_eq!(config.client.request_timeout_secs, Some(10));
    assert_eq!(config.client.proxy_url, None);
}

#[test]
#[serial]
fn test_missing_file_without_endpoints_fails_validation() {
    clear_env();

    let err = load_config(Path::new("/nonexistent/probe.yaml")).unwrap_err();

    assert!(matches!(err, AppError::ConfigValidation { .. }));
}

#[test]
#[serial]
fn test_env_overrides_endpoints_and_timeout() {
    clear_env();
    let file = write_config("endpoints:\n  - uri: \"http://from-file:9200\"\n");
    std::env::set_var(loader::ENV_ENDPOINTS, "http://a.local:9200, http://b.local:9200");
    std::env::set_var(loader::ENV_REQUEST_TIMEOUT, "0");
    std::env::set_var(loader::ENV_CONNECT_TIMEOUT, "3");

    let config = load_config(file.path());
    clear_env();
    let config = config.unwrap();

    let uris: Vec<&str> = config.endpoints.iter().map(|e| e.uri.as_str()).collect();
    assert_eq!(uris, vec!["http://a.local:9200", "http://b.local:9200"]);
    assert_eq!(config.client.request_timeout_secs, None);
    assert_eq!(config.client.connect_timeout_secs, 3);
}

#[test]
#[serial]
fn test_invalid_env_timeout_is_ignored() {
    clear_env();
    let file = write_config("endpoints:\n  - uri: \"http://search.local:9200\"\n");
    std::env::set_var(loader::ENV_REQUEST_TIMEOUT, "soon");

    let config = load_config(file.path());
    clear_env();

    assert_eq!(config.unwrap().client.request_timeout_secs, Some(10));
}

#[test]
#[serial]
fn test_malformed_yaml_is_parse_error() {
    clear_env();
    let file = write_config("endpoints: [unterminated\n");

    let err = load_config(file.path()).unwrap_err();

    assert!(matches!(err, AppError::ConfigParse { .. }));
}

#[test]
#[serial]
fn test_unknown_scheme_rejected() {
    clear_env();
    let file = write_config("endpoints:\n  - uri: \"tcp://search.local:9300\"\n");

    let err = load_config(file.path()).unwrap_err();

    match err {
        AppError::ConfigValidation { field, .. } => {
            assert_eq!(field.as_deref(), Some("endpoints.uri"))
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
#[serial]
fn test_invalid_proxy_from_env_rejected() {
    clear_env();
    let file = write_config("endpoints:\n  - uri: \"http://search.local:9200\"\n");
    std::env::set_var(loader::ENV_PROXY_URL, "not a proxy");

    let err = load_config(file.path());
    clear_env();

    match err.unwrap_err() {
        AppError::ConfigValidation { field, .. } => {
            assert_eq!(field.as_deref(), Some("client.proxy_url"))
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
#[serial]
fn test_empty_proxy_env_clears_file_proxy() {
    clear_env();
    let file = write_config(
        "client:\n  proxy_url: \"http://proxy.local:3128\"\nendpoints:\n  - uri: \"http://search.local:9200\"\n",
    );
    std::env::set_var(loader::ENV_PROXY_URL, "");

    let config = load_config(file.path());
    clear_env();

    assert_eq!(config.unwrap().client.proxy_url, None);
}

#[test]
#[serial]
fn test_proxy_env_overrides_file() {
    clear_env();
    let file = write_config("endpoints:\n  - uri: \"http://search.local:9200\"\n");
    std::env::set_var(loader::ENV_PROXY_URL, " http://proxy.local:3128 ");

    let config = load_config(file.path());
    clear_env();

    assert_eq!(
        config.unwrap().client.proxy_url.as_deref(),
        Some("http://proxy.local:3128")
    );
}

#[test]
#[serial]
fn test_unreadable_path_keeps_io_cause() {
    clear_env();
    // A directory exists but cannot be read as a file.
    let dir = tempfile::tempdir().unwrap();

    let err = load_config(dir.path()).unwrap_err();

    match err {
        AppError::Io { operation, message } => {
            assert!(operation.contains("read config"));
            assert!(!message.is_empty());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
