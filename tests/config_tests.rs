mod common;

use common::temp_files::{create_temp_json, create_temp_yaml};
use riouter::config::{ConfigError, ENV_BASE_PATH, ENV_UPDATE_HISTORY};
use riouter::{Router, RouterConfig};

const YAML_CONFIG: &str = r#"
base_path: /app
update_history: true
pattern:
  sensitive: false
  delimiter: "/#?"
routes:
  - path: /user/:id
  - path: /docs/:page*
    options:
      strict: true
"#;

#[test]
fn test_load_yaml_file() {
    let file = create_temp_yaml(YAML_CONFIG);
    let config = RouterConfig::load(file.path()).unwrap();
    assert_eq!(config.base_path, "/app");
    assert!(config.update_history);
    assert_eq!(config.routes.len(), 2);
    assert_eq!(config.routes[1].options.strict, Some(true));

    let router = Router::from_config(config).unwrap();
    assert_eq!(router.routes(), vec!["/user/:id", "/docs/:page*"]);
    router.push("/app/docs/").unwrap();
    assert!(router.current_route().is_none());
    router.push("/app/docs").unwrap();
    assert_eq!(router.current_route().unwrap().template(), "/docs/:page*");
}

#[test]
fn test_load_json_file() {
    let file = create_temp_json(
        r#"{ "base_path": "/j", "routes": [ { "path": "/a/:b", "options": { "sensitive": true } } ] }"#,
    );
    let config = RouterConfig::load(file.path()).unwrap();
    assert_eq!(config.base_path, "/j");
    assert_eq!(config.routes[0].options.sensitive, Some(true));
    assert!(!config.update_history);
}

#[test]
fn test_load_missing_file() {
    let err = RouterConfig::load("/definitely/not/a/config.yaml").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("/definitely/not/a/config.yaml"));
}

#[test]
fn test_load_malformed_json() {
    let file = create_temp_json("{ \"routes\": ");
    let err = RouterConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
}

#[test]
fn test_invalid_route_template_fails_router_build() {
    let file = create_temp_yaml("routes:\n  - path: /ok\n  - path: \"/bad/(\"\n");
    let config = RouterConfig::load(file.path()).unwrap();
    let err = Router::from_config(config).unwrap_err();
    assert!(err.to_string().contains("/bad/("));
}

#[test]
fn test_env_overrides_file_values() {
    let file = create_temp_yaml(YAML_CONFIG);
    let mut config = RouterConfig::load(file.path()).unwrap();
    config.apply_env_from(|key| match key {
        k if k == ENV_BASE_PATH => Some("/override".to_string()),
        k if k == ENV_UPDATE_HISTORY => Some("0".to_string()),
        _ => None,
    });
    assert_eq!(config.base_path, "/override");
    assert!(!config.update_history);
    assert_eq!(config.routes.len(), 2);
}
