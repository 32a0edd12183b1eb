// livetail - platform/config.rs
//
// Platform config directory resolution, config.toml loading with startup
// validation, and endpoint URL resolution.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Resolved platform paths for livetail configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/livetail/ or %APPDATA%\livetail\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to the current directory if platform dirs cannot be
    /// determined. Runs before logging is initialised, so it stays silent.
    pub fn resolve() -> Self {
        let config_dir = ProjectDirs::from("", "", constants::APP_ID)
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));
        Self { config_dir }
    }

    /// Full path of the config file.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility -- a newer
/// config file can be used with an older binary without crashing.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[stream]` section.
    pub stream: StreamSection,
    /// `[ui]` section.
    pub ui: UiSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[stream]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct StreamSection {
    /// Base address of the log server.
    pub addr: Option<String>,
    /// Endpoint path appended to the base address.
    pub path: Option<String>,
}

/// `[ui]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct UiSection {
    /// Search debounce quiet period in ms.
    pub debounce_ms: Option<u64>,
    /// Body font size in points.
    pub font_size: Option<f32>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level ("trace", "debug", "info", "warn", "error").
    pub level: Option<String>,
}

/// Load config.toml from `path`.
///
/// A missing file is not an error: defaults apply.
pub fn load_config(path: &Path) -> Result<RawConfig, ConfigError> {
    if !path.exists() {
        return Ok(RawConfig::default());
    }

    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&text).map_err(|e| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source: e,
    })
}

// =============================================================================
// Validated settings
// =============================================================================

/// Validated runtime settings, assembled from CLI, environment, and config.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base address of the log server.
    pub addr: String,
    /// Endpoint path appended to the base address.
    pub endpoint_path: String,
    /// Search debounce quiet period.
    pub debounce: Duration,
    /// Body font size in points.
    pub font_size: f32,
    /// Log level from config, if set.
    pub log_level: Option<String>,
}

impl Settings {
    /// Assemble settings with the documented priority:
    /// CLI `--addr` > `LIVETAIL_ADDR` env var > config file > default.
    ///
    /// Out-of-range config values are rejected rather than clamped, so a
    /// typo is visible at startup instead of silently altering behaviour.
    pub fn from_sources(cli_addr: Option<&str>, raw: &RawConfig) -> Result<Settings, ConfigError> {
        let env_addr = std::env::var(constants::ADDR_ENV_VAR)
            .ok()
            .filter(|v| !v.is_empty());

        let addr = cli_addr
            .map(str::to_string)
            .or(env_addr)
            .or_else(|| raw.stream.addr.clone())
            .unwrap_or_else(|| constants::DEFAULT_ADDR.to_string());

        let endpoint_path = raw
            .stream
            .path
            .clone()
            .unwrap_or_else(|| constants::DEFAULT_ENDPOINT_PATH.to_string());

        let debounce_ms = raw.ui.debounce_ms.unwrap_or(constants::SEARCH_DEBOUNCE_MS);
        if !(constants::MIN_SEARCH_DEBOUNCE_MS..=constants::MAX_SEARCH_DEBOUNCE_MS)
            .contains(&debounce_ms)
        {
            return Err(ConfigError::ValueOutOfRange {
                field: "ui.debounce_ms".to_string(),
                value: debounce_ms.to_string(),
                expected: format!(
                    "{}..={}",
                    constants::MIN_SEARCH_DEBOUNCE_MS,
                    constants::MAX_SEARCH_DEBOUNCE_MS
                ),
            });
        }

        let font_size = raw.ui.font_size.unwrap_or(constants::DEFAULT_FONT_SIZE);
        if !(constants::MIN_FONT_SIZE..=constants::MAX_FONT_SIZE).contains(&font_size) {
            return Err(ConfigError::ValueOutOfRange {
                field: "ui.font_size".to_string(),
                value: font_size.to_string(),
                expected: format!("{}..={}", constants::MIN_FONT_SIZE, constants::MAX_FONT_SIZE),
            });
        }

        Ok(Settings {
            addr,
            endpoint_path,
            debounce: Duration::from_millis(debounce_ms),
            font_size,
            log_level: raw.logging.level.clone(),
        })
    }

    /// Full URL of the log endpoint.
    pub fn endpoint_url(&self) -> String {
        endpoint_url(&self.addr, &self.endpoint_path)
    }
}

/// Join a base address and an endpoint path with exactly one slash.
pub fn endpoint_url(addr: &str, path: &str) -> String {
    format!(
        "{}/{}",
        addr.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_joins_with_single_slash() {
        assert_eq!(
            endpoint_url("http://host:9000", "logs"),
            "http://host:9000/logs"
        );
        assert_eq!(
            endpoint_url("http://host:9000/", "logs"),
            "http://host:9000/logs"
        );
        assert_eq!(
            endpoint_url("http://host:9000", "/logs"),
            "http://host:9000/logs"
        );
        assert_eq!(
            endpoint_url("http://host:9000/", "/logs"),
            "http://host:9000/logs"
        );
    }

    #[test]
    fn test_defaults_when_no_sources() {
        let settings = Settings::from_sources(None, &RawConfig::default()).unwrap();
        assert_eq!(settings.endpoint_path, constants::DEFAULT_ENDPOINT_PATH);
        assert_eq!(
            settings.debounce,
            Duration::from_millis(constants::SEARCH_DEBOUNCE_MS)
        );
        assert_eq!(settings.font_size, constants::DEFAULT_FONT_SIZE);
    }

    #[test]
    fn test_cli_addr_overrides_config() {
        let raw = RawConfig {
            stream: StreamSection {
                addr: Some("http://from-config:1".to_string()),
                path: None,
            },
            ..Default::default()
        };
        let settings = Settings::from_sources(Some("http://from-cli:2"), &raw).unwrap();
        assert_eq!(settings.addr, "http://from-cli:2");
    }

    #[test]
    fn test_debounce_out_of_range_rejected() {
        let raw = RawConfig {
            ui: UiSection {
                debounce_ms: Some(60_000),
                font_size: None,
            },
            ..Default::default()
        };
        let result = Settings::from_sources(None, &raw);
        assert!(matches!(
            result,
            Err(ConfigError::ValueOutOfRange { .. })
        ));
    }

    #[test]
    fn test_font_size_out_of_range_rejected() {
        let raw = RawConfig {
            ui: UiSection {
                debounce_ms: None,
                font_size: Some(2.0),
            },
            ..Default::default()
        };
        assert!(Settings::from_sources(None, &raw).is_err());
    }
}
