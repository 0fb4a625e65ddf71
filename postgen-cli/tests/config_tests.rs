// ABOUTME: Comprehensive tests for configuration file loading, validation, and merging
// ABOUTME: Tests TOML parsing, path resolution, and hierarchical config merging

use postgen_cli::config::Config;
use tempfile::TempDir;

#[test]
fn test_config_deserialize_complete() {
    let toml_content = r#"
        default_tone = "casual"
        default_format = "naver_blog"
        languages = ["한국어", "English"]
        output_dir = "out"
        catalog_path = "prompts/3rd_sys_prompt.json"

        [chat]
        model = "gpt-4o-mini"
        api_url = "https://api.openai.com/v1"
        temperature = 0.3
        max_tokens = 2048

        [search]
        api_url = "https://openapi.naver.com/v1"
        display = 10
        sort = "sim"
    "#;

    let config: Config = toml::from_str(toml_content).expect("Should parse valid TOML");

    assert_eq!(config.default_tone, Some("casual".to_string()));
    assert_eq!(config.default_format, Some("naver_blog".to_string()));
    assert_eq!(
        config.languages,
        Some(vec!["한국어".to_string(), "English".to_string()])
    );
    assert_eq!(config.output_dir, Some("out".to_string()));

    let chat = config.chat.expect("chat section");
    assert_eq!(chat.model, Some("gpt-4o-mini".to_string()));
    assert_eq!(chat.temperature, Some(0.3));
    assert_eq!(chat.max_tokens, Some(2048));

    let search = config.search.expect("search section");
    assert_eq!(search.display, Some(10));
    assert_eq!(search.sort, Some("sim".to_string()));
}

#[test]
fn test_config_deserialize_minimal() {
    let toml_content = r#"
        default_format = "instagram"
    "#;

    let config: Config = toml::from_str(toml_content).expect("Should parse minimal TOML");

    assert_eq!(config.default_format, Some("instagram".to_string()));
    assert_eq!(config.default_tone, None);
    assert!(config.chat.is_none());
    assert!(config.search.is_none());
}

#[test]
fn test_config_deserialize_empty() {
    let config: Config = toml::from_str("").expect("Should parse empty TOML");
    assert_eq!(config, Config::default());
}

#[test]
fn test_config_rejects_unknown_tone() {
    let result: Result<Config, _> = toml::from_str(r#"default_tone = "bombastic""#);
    assert!(result.is_err());
}

#[test]
fn test_config_rejects_unknown_sort() {
    let result: Result<Config, _> = toml::from_str(
        r#"
        [search]
        sort = "best"
        "#,
    );
    assert!(result.is_err());
}

#[test]
fn test_load_from_file() {
    let temp_dir = TempDir::new().expect("Should create temp dir");
    let config_path = temp_dir.path().join("config.toml");

    std::fs::write(
        &config_path,
        r#"
        default_tone = "formal"
        languages = ["日本語"]
        "#,
    )
    .expect("Should write config file");

    let config = Config::load_from_file(&config_path).expect("Should load config");
    assert_eq!(config.default_tone, Some("formal".to_string()));
    assert_eq!(config.languages, Some(vec!["日本語".to_string()]));
}

#[test]
fn test_load_from_file_missing_path_errors() {
    let result = Config::load_from_file("/no/such/postgen.toml");
    assert!(result.is_err());
}

#[test]
fn test_load_from_paths_later_overrides_earlier() {
    let temp_dir = TempDir::new().expect("Should create temp dir");
    let base_path = temp_dir.path().join("base.toml");
    let override_path = temp_dir.path().join("override.toml");

    std::fs::write(
        &base_path,
        r#"
        default_tone = "formal"
        default_format = "naver_blog"
        "#,
    )
    .unwrap();
    std::fs::write(
        &override_path,
        r#"
        default_tone = "casual"
        "#,
    )
    .unwrap();

    let config = Config::load_from_paths(&[
        base_path.to_str().unwrap(),
        override_path.to_str().unwrap(),
    ])
    .expect("Should merge configs");

    assert_eq!(config.default_tone, Some("casual".to_string()));
    assert_eq!(config.default_format, Some("naver_blog".to_string()));
}

#[test]
fn test_load_from_paths_skips_missing_files() {
    let temp_dir = TempDir::new().expect("Should create temp dir");
    let only_path = temp_dir.path().join("only.toml");
    std::fs::write(&only_path, r#"default_format = "instagram""#).unwrap();

    let config = Config::load_from_paths(&[
        "/nonexistent/one.toml",
        only_path.to_str().unwrap(),
        "/nonexistent/two.toml",
    ])
    .expect("Missing files are skipped");

    assert_eq!(config.default_format, Some("instagram".to_string()));
}

#[test]
fn test_config_paths_include_project_file() {
    let paths = Config::get_config_paths();
    assert!(!paths.is_empty());
    assert!(paths[0].ends_with("postgen.toml"));
}

#[test]
fn test_display_out_of_range_fails_validation() {
    let temp_dir = TempDir::new().expect("Should create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        r#"
        [search]
        display = 1000
        "#,
    )
    .unwrap();

    assert!(Config::load_from_file(&config_path).is_err());
}
