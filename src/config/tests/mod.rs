//! Unit tests for config module
//!
//! Tests configuration types, defaults, and loading.

#![allow(clippy::unwrap_used, clippy::panic)]

use std::{fs, time::Duration};

use tempfile::TempDir;

use crate::{
    config::{CatalogEntry, Config, LogLevel},
    core::SessionError,
    services::session::MediaItem,
};

#[test]
fn config_serialize_toml() {
    let config = Config::default();

    let toml_str = toml::to_string(&config).unwrap();
    assert!(toml_str.contains("[general]"));
    assert!(toml_str.contains("[session]"));
}

#[test]
fn config_empty_toml_uses_defaults() {
    let config = Config::from_toml_str("").unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.session.bus_name, "mediasession");
    assert_eq!(config.general.log_level, LogLevel::Info);
    assert!(config.catalog.is_empty());
}

#[test]
fn config_deserialize_full() {
    let toml_str = r#"
        [general]
        log_level = "debug"

        [session]
        identity = "Radio"
        bus_name = "radio"
        desktop_entry = "radio"

        [[catalog]]
        id = "news"
        title = "Morning News"
        uri = "https://example.invalid/news"
        live = true

        [[catalog]]
        id = "song"
        title = "Night Drive"
        duration_secs = 215
    "#;

    let config = Config::from_toml_str(toml_str).unwrap();

    assert_eq!(config.general.log_level, LogLevel::Debug);
    assert_eq!(config.session.identity, "Radio");
    assert_eq!(config.session.desktop_entry.as_deref(), Some("radio"));
    assert_eq!(config.session.supported_uri_schemes.len(), 3);
    assert_eq!(config.catalog.len(), 2);
    assert!(config.catalog[0].live);
    assert_eq!(config.catalog[1].duration_secs, Some(215));
}

#[test]
fn config_serialize_roundtrip() {
    let mut original = Config::default();
    original.catalog.push(CatalogEntry {
        id: "a".to_string(),
        title: Some("A".to_string()),
        ..Default::default()
    });

    let toml_str = toml::to_string(&original).unwrap();
    let deserialized = Config::from_toml_str(&toml_str).unwrap();

    assert_eq!(original, deserialized);
}

#[test]
fn invalid_log_level_is_a_parse_error() {
    let result = Config::from_toml_str("[general]\nlog_level = \"loud\"");

    match result {
        Err(SessionError::TomlParseError { location, .. }) => assert_eq!(location, "string"),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn from_file_reports_path_on_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[session\nidentity = 3").unwrap();

    let result = Config::from_file(&path);

    match result {
        Err(SessionError::TomlParseError { location, .. }) => {
            assert!(location.ends_with("config.toml"));
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn from_file_missing_is_io_error() {
    let dir = TempDir::new().unwrap();

    let result = Config::from_file(&dir.path().join("absent.toml"));

    assert!(matches!(result, Err(SessionError::Io(_))));
}

#[test]
fn catalog_entry_converts_to_media_item() {
    let entry = CatalogEntry {
        id: "song".to_string(),
        title: Some("Night Drive".to_string()),
        artist: Some("Low Tide".to_string()),
        uri: Some("file:///music/night.flac".to_string()),
        duration_secs: Some(215),
        ..Default::default()
    };

    let item = MediaItem::from(&entry);

    assert_eq!(item.media_id, "song");
    assert_eq!(item.duration, Some(Duration::from_secs(215)));
    assert_eq!(item.metadata.artist.as_deref(), Some("Low Tide"));
    assert!(!item.live);
}

#[test]
fn json_schema_names_sections() {
    let schema = Config::json_schema().unwrap();

    assert!(schema.contains("session"));
    assert!(schema.contains("catalog"));
}
