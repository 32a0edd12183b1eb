// livetail - core/model.rs
//
// Core data model types: the log entry, severity levels, search modes,
// the SSE wire payload, and the messages the stream worker sends to the UI.
//
// These types are the shared vocabulary across all layers.

use crate::util::error::PayloadError;
use chrono::{DateTime, Utc};
use serde::Deserialize;

// =============================================================================
// Log Entry
// =============================================================================

/// A single received log event.
///
/// Immutable once received: entries are appended to an in-memory buffer in
/// arrival order and never removed for the lifetime of the session.
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Event timestamp, parsed from the wire payload.
    pub timestamp: DateTime<Utc>,

    /// Severity level.
    pub level: Level,

    /// Full message text.
    pub message: String,
}

impl LogEntry {
    /// Decode the data field of a server-sent event into a `LogEntry`.
    ///
    /// The payload is a JSON object
    /// `{"timestamp": <RFC 3339 string>, "level": <string>, "message": <string>}`.
    pub fn parse_event_data(data: &str) -> Result<LogEntry, PayloadError> {
        let wire: WireEvent =
            serde_json::from_str(data).map_err(|e| PayloadError::Json { source: e })?;
        wire.into_entry()
    }
}

/// Raw deserialisable shape of a single event payload.
#[derive(Debug, Deserialize)]
pub struct WireEvent {
    pub timestamp: String,
    pub level: String,
    pub message: String,
}

impl WireEvent {
    /// Convert the raw payload into a typed entry.
    ///
    /// The timestamp must be RFC 3339. The level string is matched
    /// case-insensitively; unrecognised levels fall back to `Level::Info`
    /// rather than dropping the entry.
    pub fn into_entry(self) -> Result<LogEntry, PayloadError> {
        let timestamp = DateTime::parse_from_rfc3339(&self.timestamp)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| PayloadError::Timestamp {
                raw: self.timestamp.clone(),
                source: e,
            })?;

        Ok(LogEntry {
            timestamp,
            level: Level::parse(&self.level),
            message: self.message,
        })
    }
}

// =============================================================================
// Level
// =============================================================================

/// Severity levels, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Level {
    Verbose,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Fatal,
}

impl Level {
    /// Returns all variants in severity order.
    pub fn all() -> &'static [Level] {
        &[
            Level::Verbose,
            Level::Debug,
            Level::Info,
            Level::Warn,
            Level::Error,
            Level::Fatal,
        ]
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Level::Verbose => "Verbose",
            Level::Debug => "Debug",
            Level::Info => "Info",
            Level::Warn => "Warn",
            Level::Error => "Error",
            Level::Fatal => "Fatal",
        }
    }

    /// Parse a wire-format level string (case-insensitive).
    ///
    /// Unrecognised strings map to `Level::Info` so a source emitting a
    /// non-standard level cannot poison the stream.
    pub fn parse(raw: &str) -> Level {
        match raw.to_ascii_lowercase().as_str() {
            "verbose" => Level::Verbose,
            "debug" => Level::Debug,
            "info" => Level::Info,
            "warn" => Level::Warn,
            "error" => Level::Error,
            "fatal" => Level::Fatal,
            _ => Level::default(),
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Search mode
// =============================================================================

/// How the search query is interpreted when filtering the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Approximate matching ranked by relevance score.
    #[default]
    Fuzzy,

    /// Regular-expression matching. Invalid patterns silently fall back
    /// to plain substring containment.
    Regex,
}

impl SearchMode {
    /// Returns all variants in display order.
    pub fn all() -> &'static [SearchMode] {
        &[SearchMode::Fuzzy, SearchMode::Regex]
    }

    /// Label for the mode selector.
    pub fn label(&self) -> &'static str {
        match self {
            SearchMode::Fuzzy => "Fuzzy",
            SearchMode::Regex => "Regex",
        }
    }
}

// =============================================================================
// Stream events (worker thread -> UI)
// =============================================================================

/// Messages sent from the stream worker thread to the UI thread.
#[derive(Debug)]
pub enum StreamEvent {
    /// The subscription opened successfully.
    Connected { url: String },

    /// A log entry arrived.
    Entry { entry: LogEntry },

    /// An event payload could not be decoded; the entry was skipped and
    /// the stream stays up.
    ParseError { reason: String },

    /// The subscription failed; a retry countdown follows.
    Disconnected { reason: String },

    /// One countdown notification per second while waiting to reconnect.
    RetryCountdown { secs_remaining: u64 },
}
