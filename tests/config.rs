use std::{collections::HashMap, time::Duration};

use bookshelf::config::{
    API_URL_ENV, AppConfig, ConfigError, DEFAULT_API_URL, EnvConfig, FileConfig, PAGE_SIZE_ENV,
    PAGED_ENV, load_config,
};

fn env(pairs: &[(&str, &str)]) -> EnvConfig {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    EnvConfig::from_lookup(|key| vars.get(key).cloned())
}

fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("bookshelf-{}-{}.toml", name, std::process::id()));
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn defaults_apply_without_file_or_env() {
    let config = AppConfig::resolve(None, EnvConfig::default());
    assert_eq!(config.api_url, DEFAULT_API_URL);
    assert_eq!(config.page_size, 10);
    assert!(config.paged);
    assert_eq!(config.notification_ttl, Duration::from_secs(4));
}

#[test]
fn environment_overrides_file() {
    let file = FileConfig {
        api_url: Some("http://books.internal/api".into()),
        page_size: Some(20),
        paged: Some(true),
        notification_secs: Some(2),
    };
    let config = AppConfig::resolve(
        Some(file),
        env(&[(API_URL_ENV, "http://127.0.0.1:8080/api"), (PAGED_ENV, "off")]),
    );

    assert_eq!(config.api_url, "http://127.0.0.1:8080/api");
    assert_eq!(config.page_size, 20);
    assert!(!config.paged);
    assert_eq!(config.notification_ttl, Duration::from_secs(2));
}

#[test]
fn unusable_env_values_are_ignored() {
    let config = AppConfig::resolve(
        None,
        env(&[
            (API_URL_ENV, "   "),
            (PAGE_SIZE_ENV, "lots"),
            (PAGED_ENV, "maybe"),
        ]),
    );
    assert_eq!(config, AppConfig::default());
}

#[test]
fn zero_page_size_falls_back_to_default() {
    let config = AppConfig::resolve(None, env(&[(PAGE_SIZE_ENV, "0")]));
    assert_eq!(config.page_size, 10);
}

#[test]
fn toml_file_parses_and_ignores_unknown_keys() {
    let path = write_temp(
        "valid",
        r#"
api_url = "http://shelf.local/api"
page_size = 50
theme = "solarized"
"#,
    );

    let file = load_config(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(
        file,
        FileConfig {
            api_url: Some("http://shelf.local/api".into()),
            page_size: Some(50),
            paged: None,
            notification_secs: None,
        }
    );
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let path = write_temp("broken", "page_size = \"ten\"\n");
    let result = load_config(&path);
    std::fs::remove_file(&path).ok();

    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn missing_file_is_an_io_error() {
    let path = std::env::temp_dir().join("bookshelf-does-not-exist.toml");
    assert!(matches!(load_config(&path), Err(ConfigError::Io(_))));
}
