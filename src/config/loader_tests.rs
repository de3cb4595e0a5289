use super::*;
use serial_test::serial;
use std::fs;

fn temp_config(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("scanview_config_tests");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn defaults_point_at_local_endpoint() {
    let config = ResolvedConfig::default();
    assert_eq!(config.api_base_url, "http://localhost:8080/api");
    assert_eq!(config.module, "nmap");
    assert_eq!(config.page_size, 10);
}

#[test]
fn missing_file_is_not_an_error() {
    let result = load_config_file("/nonexistent/scanview/config.toml");
    assert_eq!(result, Ok(None));
}

#[test]
fn file_values_override_defaults() {
    let path = temp_config(
        "full.toml",
        r#"
            api_base_url = "https://scans.example.com/api"
            module = "masscan"
            page_size = 25
        "#,
    );
    let file = load_config_file(&path).unwrap();
    let resolved = merge_config(file);
    assert_eq!(resolved.api_base_url, "https://scans.example.com/api");
    assert_eq!(resolved.module, "masscan");
    assert_eq!(resolved.page_size, 25);
    let _ = fs::remove_file(path);
}

#[test]
fn unset_fields_keep_defaults() {
    let path = temp_config("partial.toml", r#"module = "masscan""#);
    let resolved = merge_config(load_config_file(&path).unwrap());
    assert_eq!(resolved.module, "masscan");
    assert_eq!(resolved.api_base_url, "http://localhost:8080/api");
    assert_eq!(resolved.page_size, 10);
    let _ = fs::remove_file(path);
}

#[test]
fn invalid_toml_is_a_parse_error() {
    let path = temp_config("broken.toml", "api_base_url = [not toml");
    let err = load_config_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
    let _ = fs::remove_file(path);
}

#[test]
fn unknown_keys_are_rejected() {
    let path = temp_config("unknown.toml", r#"no_such_setting = true"#);
    let err = load_config_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
    let _ = fs::remove_file(path);
}

#[test]
#[serial(scanview_env)]
fn env_var_overrides_file_value() {
    std::env::set_var("SCANVIEW_API_URL", "http://env.example.com/api");
    let resolved = apply_env_overrides(merge_config(Some(ConfigFile {
        api_base_url: Some("http://file.example.com/api".to_string()),
        ..ConfigFile::default()
    })));
    std::env::remove_var("SCANVIEW_API_URL");
    assert_eq!(resolved.api_base_url, "http://env.example.com/api");
}

#[test]
#[serial(scanview_env)]
fn env_override_is_inert_when_unset() {
    std::env::remove_var("SCANVIEW_API_URL");
    let resolved = apply_env_overrides(ResolvedConfig::default());
    assert_eq!(resolved.api_base_url, "http://localhost:8080/api");
}

#[test]
fn cli_flags_have_highest_precedence() {
    let base = merge_config(Some(ConfigFile {
        api_base_url: Some("http://file.example.com/api".to_string()),
        page_size: Some(25),
        ..ConfigFile::default()
    }));
    let resolved = apply_cli_overrides(
        base,
        Some("http://cli.example.com/api".to_string()),
        Some("masscan".to_string()),
        Some(50),
    )
    .unwrap();
    assert_eq!(resolved.api_base_url, "http://cli.example.com/api");
    assert_eq!(resolved.module, "masscan");
    assert_eq!(resolved.page_size, 50);
}

#[test]
fn none_overrides_change_nothing() {
    let resolved = apply_cli_overrides(ResolvedConfig::default(), None, None, None).unwrap();
    assert_eq!(resolved, ResolvedConfig::default());
}

#[test]
fn zero_page_size_is_rejected_at_startup() {
    let err = apply_cli_overrides(ResolvedConfig::default(), None, None, Some(0)).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue(_)));
}

#[test]
fn default_log_path_ends_with_scanview_log() {
    let path = default_log_path();
    assert!(path.to_string_lossy().ends_with("scanview.log"));
}
