//! Tests for config functionality.

use crate::config::Config;
use crate::config::types::{default_exclude, default_include};
use crate::error::DestyleError;
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.stylesheet, "css/styles.css");
    assert_eq!(config.include, default_include());
    assert_eq!(config.exclude, default_exclude());
    assert_eq!(config.class_prefix, "inl-");
    assert_eq!(
        config.block_comment,
        "Generated classes moved from inline styles"
    );
    assert!(config.backup);
    assert_eq!(config.backup_suffix, "bak");
    assert!(config.events_log.is_none());
    assert!(config.validate().is_ok());
}

#[test]
fn test_parse_empty_yaml() {
    let config = Config::from_yaml("").unwrap();
    assert_eq!(config.stylesheet, "css/styles.css");
    assert_eq!(config.class_prefix, "inl-");
}

#[test]
fn test_parse_partial_yaml() {
    let yaml = r#"
stylesheet: assets/site.css
backup: false
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.stylesheet, "assets/site.css");
    assert!(!config.backup);

    // Unspecified values should use defaults
    assert_eq!(config.include, default_include());
    assert_eq!(config.backup_suffix, "bak");
}

#[test]
fn test_parse_full_yaml() {
    let yaml = r#"
stylesheet: static/app.css
include:
  - "pages/**/*.html"
  - "*.htm"
exclude:
  - "pages/vendor/**"
class_prefix: gen-
block_comment: Extracted styles
backup: true
backup_suffix: orig
events_log: .destyle/events.ndjson
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.stylesheet, "static/app.css");
    assert_eq!(config.include, vec!["pages/**/*.html", "*.htm"]);
    assert_eq!(config.exclude, vec!["pages/vendor/**"]);
    assert_eq!(config.class_prefix, "gen-");
    assert_eq!(config.block_comment, "Extracted styles");
    assert_eq!(config.backup_suffix, "orig");
    assert_eq!(config.events_log.as_deref(), Some(".destyle/events.ndjson"));
}

#[test]
fn test_unknown_fields_are_ignored() {
    let config = Config::from_yaml("future_option: 42\nstylesheet: a.css\n").unwrap();
    assert_eq!(config.stylesheet, "a.css");
    assert!(config.extra.contains_key("future_option"));
}

#[test]
fn test_invalid_class_prefix_rejected() {
    for prefix in ["", "1abc", "in l-", "inl."] {
        let config = Config {
            class_prefix: prefix.to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("class_prefix"), "prefix {:?}", prefix);
    }
}

#[test]
fn test_valid_class_prefixes_accepted() {
    for prefix in ["inl-", "_x", "-gen-", "s1"] {
        let config = Config {
            class_prefix: prefix.to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok(), "prefix {:?}", prefix);
    }
}

#[test]
fn test_empty_include_rejected() {
    let err = Config::from_yaml("include: []").unwrap_err();
    assert!(err.to_string().contains("include"));
}

#[test]
fn test_invalid_glob_rejected() {
    let err = Config::from_yaml("exclude: ['a/[b']").unwrap_err();
    assert!(matches!(err, DestyleError::UserError(_)));
    assert!(err.to_string().contains("exclude"));
}

#[test]
fn test_backup_suffix_with_dot_rejected() {
    let err = Config::from_yaml("backup_suffix: .bak").unwrap_err();
    assert!(err.to_string().contains("Use 'bak' instead"));
}

#[test]
fn test_block_comment_cannot_close_comment() {
    let err = Config::from_yaml("block_comment: 'oops */ body {}'").unwrap_err();
    assert!(err.to_string().contains("block_comment"));
}

#[test]
fn test_malformed_yaml_is_user_error() {
    let err = Config::from_yaml("include: [unterminated").unwrap_err();
    assert!(matches!(err, DestyleError::UserError(_)));
}

#[test]
fn test_yaml_round_trip_keeps_values() {
    let config = Config {
        stylesheet: "x.css".to_string(),
        events_log: Some("log.ndjson".to_string()),
        ..Default::default()
    };
    let yaml = config.to_yaml().unwrap();
    let parsed = Config::from_yaml(&yaml).unwrap();

    assert_eq!(parsed.stylesheet, "x.css");
    assert_eq!(parsed.events_log.as_deref(), Some("log.ndjson"));
}

#[test]
fn test_load_or_default_without_file() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::load_or_default(temp_dir.path().join("destyle.yaml")).unwrap();
    assert_eq!(config.stylesheet, "css/styles.css");
}

#[test]
fn test_load_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("destyle.yaml");
    std::fs::write(&path, "class_prefix: s-\n").unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.class_prefix, "s-");
}
