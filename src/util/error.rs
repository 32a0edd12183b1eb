// livetail - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; all errors keep their causal chain
// for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all livetail operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum LivetailError {
    /// Stream subscription or transport failed.
    Stream(StreamError),

    /// Filter operation failed.
    Filter(FilterError),

    /// Configuration loading or validation failed.
    Config(ConfigError),
}

impl fmt::Display for LivetailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stream(e) => write!(f, "Stream error: {e}"),
            Self::Filter(e) => write!(f, "Filter error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
        }
    }
}

impl std::error::Error for LivetailError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Stream(e) => Some(e),
            Self::Filter(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Stream errors
// ---------------------------------------------------------------------------

/// Errors produced by the log stream subscription.
#[derive(Debug)]
pub enum StreamError {
    /// The HTTP client could not be constructed.
    Client { source: reqwest::Error },

    /// The subscription request failed before any event arrived.
    Request { url: String, source: reqwest::Error },

    /// The endpoint answered with a non-success status.
    Status { url: String, status: u16 },

    /// The event stream broke mid-subscription.
    Transport {
        source: eventsource_stream::EventStreamError<reqwest::Error>,
    },

    /// An event payload could not be decoded into a log entry.
    Payload(PayloadError),

    /// The stream ended cleanly. A live log endpoint never legitimately
    /// ends, so this is treated the same as a transport failure.
    Ended { url: String },
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Client { source } => write!(f, "Cannot build HTTP client: {source}"),
            Self::Request { url, source } => {
                write!(f, "Request to '{url}' failed: {source}")
            }
            Self::Status { url, status } => {
                write!(f, "'{url}' answered with status {status}")
            }
            Self::Transport { source } => write!(f, "Event stream broke: {source}"),
            Self::Payload(e) => write!(f, "Bad event payload: {e}"),
            Self::Ended { url } => write!(f, "Event stream from '{url}' ended"),
        }
    }
}

impl std::error::Error for StreamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Client { source } | Self::Request { source, .. } => Some(source),
            Self::Transport { source } => Some(source),
            Self::Payload(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StreamError> for LivetailError {
    fn from(e: StreamError) -> Self {
        Self::Stream(e)
    }
}

impl From<PayloadError> for StreamError {
    fn from(e: PayloadError) -> Self {
        Self::Payload(e)
    }
}

// ---------------------------------------------------------------------------
// Payload errors
// ---------------------------------------------------------------------------

/// Errors decoding a single event payload.
#[derive(Debug)]
pub enum PayloadError {
    /// The event data is not the expected JSON object.
    Json { source: serde_json::Error },

    /// The timestamp field is not a parseable date-time.
    Timestamp {
        raw: String,
        source: chrono::ParseError,
    },
}

impl fmt::Display for PayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json { source } => write!(f, "invalid JSON: {source}"),
            Self::Timestamp { raw, source } => {
                write!(f, "cannot parse timestamp '{raw}': {source}")
            }
        }
    }
}

impl std::error::Error for PayloadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json { source } => Some(source),
            Self::Timestamp { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Filter errors
// ---------------------------------------------------------------------------

/// Errors related to filter operations.
#[derive(Debug)]
pub enum FilterError {
    /// User-provided regex is invalid.
    InvalidRegex {
        pattern: String,
        source: regex::Error,
    },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRegex { pattern, source } => {
                write!(f, "Invalid search regex '{pattern}': {source}")
            }
        }
    }
}

impl std::error::Error for FilterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidRegex { source, .. } => Some(source),
        }
    }
}

impl From<FilterError> for LivetailError {
    fn from(e: FilterError) -> Self {
        Self::Filter(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for LivetailError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for livetail results.
pub type Result<T> = std::result::Result<T, LivetailError>;
