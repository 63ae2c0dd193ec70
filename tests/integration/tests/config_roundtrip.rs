//! Config save/load roundtrip integration tests.
//!
//! These tests verify that configuration can be serialized, written to disk,
//! and loaded back with identical field values.

use recap_core::config::{BindMode, Config};
use std::path::Path;
use tempfile::TempDir;

#[test]
fn test_config_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("recap.json5");

    let config = Config::default();
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    // Defaults should survive the roundtrip
    assert_eq!(loaded.server.port, config.server.port);
    assert_eq!(loaded.server.bind, config.server.bind);
    assert_eq!(loaded.search.top_k, config.search.top_k);
    assert_eq!(loaded.search.min_score, config.search.min_score);
    assert_eq!(loaded.openai.embedding_model, config.openai.embedding_model);
}

#[test]
fn test_config_modify_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("recap.json5");

    let mut config = Config::default();
    config.server.port = 9090;
    config.server.bind = BindMode::Lan;
    config.search.top_k = 8;
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded.server.port, 9090);
    assert_eq!(loaded.server.bind, BindMode::Lan);
    assert_eq!(loaded.search.top_k, 8);
}

#[test]
fn test_config_load_nonexistent() {
    let result = Config::load(Path::new("/nonexistent/recap.json5"));
    assert!(result.is_err());
}

#[test]
fn test_config_parse_invalid() {
    let result = Config::parse("not valid json");
    assert!(result.is_err());
}

#[test]
fn test_config_parse_json5_comments() {
    let config = Config::parse(
        r#"{
            // local override
            server: { port: 8111 },
        }"#,
    )
    .unwrap();
    assert_eq!(config.server.port, 8111);
}

#[test]
fn test_invalid_config_fails_validation_after_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("recap.json5");

    let mut config = Config::default();
    config.search.min_score = 5.0;
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert!(loaded.validate().is_err());
}
