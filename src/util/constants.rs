// livetail - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "livetail";

/// Application identifier used for config directories.
pub const APP_ID: &str = "livetail";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Stream endpoint
// =============================================================================

/// Default base address of the log server when no override is given.
pub const DEFAULT_ADDR: &str = "http://127.0.0.1:9000";

/// Path of the server-sent-event log endpoint, appended to the base address.
pub const DEFAULT_ENDPOINT_PATH: &str = "logs";

/// Environment variable that overrides the base address.
pub const ADDR_ENV_VAR: &str = "LIVETAIL_ADDR";

// =============================================================================
// Reconnect behaviour
// =============================================================================

/// Seconds counted down between a transport failure and the next
/// connection attempt. Fixed interval: no backoff growth, no retry cap.
pub const RETRY_DELAY_SECS: u64 = 5;

/// Interval between countdown notifications during the retry wait (ms).
pub const RETRY_TICK_MS: u64 = 1_000;

/// How often the stream worker wakes to check the cancel flag while
/// waiting on a quiet stream (ms).
pub const STREAM_CANCEL_CHECK_INTERVAL_MS: u64 = 100;

// =============================================================================
// Per-frame UI message budget
// =============================================================================

/// Maximum number of stream events drained by the UI update loop per frame.
/// Remaining events stay queued and are processed on subsequent frames,
/// preventing a burst from stalling the render loop.
pub const MAX_STREAM_MESSAGES_PER_FRAME: usize = 500;

/// Repaint cadence while the stream is active (ms), so entries arriving
/// between input events still appear promptly.
pub const STREAM_REPAINT_INTERVAL_MS: u64 = 100;

// =============================================================================
// Search
// =============================================================================

/// Quiet period after the last keystroke before the search query is
/// applied to the buffer (ms).
pub const SEARCH_DEBOUNCE_MS: u64 = 250;

/// Minimum user-configurable search debounce (ms).
pub const MIN_SEARCH_DEBOUNCE_MS: u64 = 50;

/// Maximum user-configurable search debounce (ms).
pub const MAX_SEARCH_DEBOUNCE_MS: u64 = 5_000;

// =============================================================================
// UI defaults
// =============================================================================

/// Default UI body font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 14.5;

/// Minimum user-configurable UI font size (points).
pub const MIN_FONT_SIZE: f32 = 10.0;

/// Maximum user-configurable UI font size (points).
pub const MAX_FONT_SIZE: f32 = 24.0;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
