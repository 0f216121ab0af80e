use tempfile::TempDir;
use tutor_render::config::{
    Catalog, Config, ConfigError, IdentifierHeuristic, RendererConfig, RuleOverride,
};
use tutor_render::{ContentBlock, MarkdownRenderer};

#[test]
fn test_config_defaults() {
    let config = Config::default();
    assert_eq!(config.renderer.default_language, "python");
    assert_eq!(config.renderer.cell_code_language, "text");
    assert_eq!(config.renderer.indent_code_min, 4);
    assert_eq!(
        config.renderer.identifier_heuristic,
        IdentifierHeuristic::AllTokens
    );
    assert!(config.renderer.operator_repairs);
    assert!(config.renderer.rule_overrides.is_empty());
    assert_eq!(config.streaming.chunk_size, 5);
    assert_eq!(config.streaming.delay_ms, 50);
    assert_eq!(config.quiz.questions_per_page, 5);
    assert_eq!(config.quiz.min_questions, 3);
    assert_eq!(config.quiz.max_questions, 5);
    assert!(config.validate().is_ok());
}

#[test]
fn test_stopwords_case_insensitive() {
    let renderer = RendererConfig::default();
    assert!(renderer.is_stopword("The"));
    assert!(renderer.is_stopword("WILL"));
    assert!(!renderer.is_stopword("list"));
}

#[test]
fn test_config_builder_chain() {
    let config = Config::new()
        .with_default_language("javascript")
        .with_identifier_heuristic(IdentifierHeuristic::Identifiers);
    assert_eq!(config.renderer.default_language, "javascript");
    assert_eq!(
        config.renderer.identifier_heuristic,
        IdentifierHeuristic::Identifiers
    );
}

#[test]
fn test_config_validation() {
    let mut config = Config::default();
    config.streaming.chunk_size = 0;
    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

    let mut config = Config::default();
    config.quiz.min_questions = 6;
    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

    let config = Config::new().with_default_language("  ");
    assert!(config.validate().is_err());
}

#[test]
fn test_config_partial_yaml() {
    let yaml = r#"
renderer:
  default_language: javascript
  identifier_heuristic: "off"
  rule_overrides:
    - id: doc_style_table
      enabled: false
quiz:
  questions_per_page: 2
"#;
    let config: Config = serde_yaml_ng::from_str(yaml).unwrap();
    assert_eq!(config.renderer.default_language, "javascript");
    assert_eq!(config.renderer.identifier_heuristic, IdentifierHeuristic::Off);
    assert_eq!(
        config.renderer.rule_overrides,
        vec![RuleOverride {
            id: "doc_style_table".to_string(),
            enabled: Some(false),
        }]
    );
    assert_eq!(config.renderer.indent_code_min, 4); // default
    assert_eq!(config.quiz.questions_per_page, 2);
    assert_eq!(config.quiz.max_questions, 5); // default
    assert_eq!(config.streaming.chunk_size, 5); // default
}

#[test]
fn test_empty_yaml_is_default() {
    let config: Config = serde_yaml_ng::from_str("{}").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.yaml");

    let config = Config::new().with_default_language("rust");
    config.save_to(&path).unwrap();
    assert!(path.exists());
    assert!(!path.with_extension("yaml.tmp").exists());

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_load_rejects_invalid_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "streaming:\n  chunk_size: 0\n").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::Validation(_))
    ));
}

#[test]
fn test_load_reports_yaml_errors() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "renderer: [not, a, map").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::Parse(_))
    ));
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = Config::load_from(&dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::Io(_))
    ));
}

#[test]
fn test_config_path_location() {
    let path = Config::config_path();
    assert!(path.ends_with("tutor-render/config.yaml"));
}

#[test]
fn test_catalog_queries() {
    let catalog = Catalog::default();
    assert!(catalog.has_model(&catalog.default_model));
    assert!(!catalog.has_model("no-such-model"));
    assert_eq!(catalog.chapter_of("Boolean"), Some("Knowledge of data types"));
    assert_eq!(
        catalog.topics_for("Errors").map(<[String]>::len),
        Some(3)
    );
    assert!(catalog.topics_for("Unknown chapter").is_none());
    assert_eq!(catalog.topics().first(), Some(&"Introduction to Python"));
}

#[test]
fn test_rule_override_from_config_reaches_renderer() {
    let yaml = "renderer:\n  rule_overrides:\n    - id: pipe_table\n      enabled: false\n";
    let config: Config = serde_yaml_ng::from_str(yaml).unwrap();
    let renderer = MarkdownRenderer::new(config.renderer);
    assert!(!renderer.detector().rule("pipe_table").unwrap().enabled);
    let blocks = renderer.render("| A | B |\n|---|---|\n| 1 | 2 |");
    assert!(!blocks.iter().any(ContentBlock::is_table));
}
