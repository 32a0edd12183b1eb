// livetail - tests/filter_pipeline.rs
//
// End-to-end tests for the filter pipeline and configuration loading.
//
// These tests exercise the real public surface: real nucleo scoring, real
// regex compilation, real serde decoding of event payloads, and real
// config.toml parsing from disk — no mocks, no stubs.

use chrono::{TimeZone, Utc};
use livetail::core::filter::filter_entries;
use livetail::core::model::{Level, LogEntry, SearchMode};
use livetail::platform::config::{endpoint_url, load_config, RawConfig, Settings};
use livetail::util::error::ConfigError;
use std::fs;

// =============================================================================
// Helpers
// =============================================================================

/// The two-entry buffer from the acceptance scenario.
fn scenario_buffer() -> Vec<LogEntry> {
    vec![
        LogEntry {
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
            level: Level::Info,
            message: "server started".to_string(),
        },
        LogEntry {
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 1).unwrap(),
            level: Level::Error,
            message: "disk full".to_string(),
        },
    ]
}

// =============================================================================
// Filter pipeline
// =============================================================================

/// Empty query returns the full buffer in original order, in either mode.
#[test]
fn empty_query_returns_everything_in_receipt_order() {
    let entries = scenario_buffer();
    for mode in SearchMode::all() {
        assert_eq!(filter_entries(&entries, "", *mode), vec![0, 1]);
    }
}

/// Fuzzy "disk" includes the error entry.
#[test]
fn fuzzy_query_finds_disk_full() {
    let entries = scenario_buffer();
    let result = filter_entries(&entries, "disk", SearchMode::Fuzzy);
    assert!(result.contains(&1), "expected entry 1 in {result:?}");
}

/// Regex "^disk" matches the error entry only.
#[test]
fn anchored_regex_matches_second_entry_only() {
    let entries = scenario_buffer();
    assert_eq!(filter_entries(&entries, "^disk", SearchMode::Regex), vec![1]);
}

/// Invalid regex "[" silently downgrades to substring containment; no
/// message contains a literal "[", so the result is empty.
#[test]
fn invalid_regex_falls_back_to_substring_containment() {
    let entries = scenario_buffer();
    let result = filter_entries(&entries, "[", SearchMode::Regex);
    assert!(result.is_empty(), "expected empty result, got {result:?}");
}

// =============================================================================
// Wire decoding
// =============================================================================

/// A well-formed SSE payload round-trips into a typed entry.
#[test]
fn wire_payload_decodes_into_entry() {
    let entry = LogEntry::parse_event_data(
        r#"{"timestamp":"2024-05-01T10:00:01Z","level":"error","message":"disk full"}"#,
    )
    .unwrap();
    assert_eq!(entry.level, Level::Error);
    assert_eq!(entry.message, "disk full");
    assert_eq!(
        entry.timestamp,
        Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 1).unwrap()
    );
}

/// A malformed payload is an error, never a panic.
#[test]
fn malformed_wire_payload_is_an_error() {
    assert!(LogEntry::parse_event_data("{\"level\": 3}").is_err());
    assert!(LogEntry::parse_event_data("").is_err());
}

// =============================================================================
// Configuration
// =============================================================================

/// Base address and path join with exactly one slash.
#[test]
fn endpoint_join_normalises_slashes() {
    assert_eq!(endpoint_url("http://a/", "/logs"), "http://a/logs");
    assert_eq!(endpoint_url("http://a", "logs"), "http://a/logs");
}

/// A config.toml on disk overrides the defaults.
#[test]
fn config_file_values_are_loaded_and_validated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "[stream]\naddr = \"http://logs.internal:8080\"\npath = \"stream/logs\"\n\
         [ui]\ndebounce_ms = 500\n[logging]\nlevel = \"debug\"\n",
    )
    .unwrap();

    let raw = load_config(&path).unwrap();
    let settings = Settings::from_sources(None, &raw).unwrap();

    assert_eq!(settings.endpoint_path, "stream/logs");
    assert_eq!(settings.debounce.as_millis(), 500);
    assert_eq!(settings.log_level.as_deref(), Some("debug"));
}

/// A missing config file yields defaults, not an error.
#[test]
fn missing_config_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let raw = load_config(&dir.path().join("config.toml")).unwrap();
    assert!(raw.stream.addr.is_none());
}

/// Broken TOML is reported as a parse error with the offending path.
#[test]
fn broken_config_file_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[stream\naddr = ").unwrap();

    assert!(matches!(
        load_config(&path),
        Err(ConfigError::TomlParse { .. })
    ));
}

/// An out-of-range debounce in the config is rejected at startup.
#[test]
fn out_of_range_debounce_is_rejected() {
    let raw: RawConfig = toml::from_str("[ui]\ndebounce_ms = 10\n").unwrap();
    assert!(matches!(
        Settings::from_sources(None, &raw),
        Err(ConfigError::ValueOutOfRange { .. })
    ));
}
