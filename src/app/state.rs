// livetail - app/state.rs
//
// Application state: the entry buffer, filtered view, search state with
// its debounce clock, and connection status.
// Owned by the eframe::App implementation; mutated only from the UI thread.

use crate::core::filter;
use crate::core::model::{LogEntry, SearchMode};
use std::time::{Duration, Instant};

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// Full URL of the log endpoint.
    pub endpoint: String,

    /// All received log entries, in arrival order. Append-only; grows
    /// without bound for the lifetime of the session.
    pub entries: Vec<LogEntry>,

    /// Indices of entries matching the debounced search (into `entries`).
    /// Receipt order for empty/regex/substring searches, relevance order
    /// for fuzzy searches.
    pub filtered_indices: Vec<usize>,

    /// Raw search text, as typed.
    pub search_query: String,

    /// Search interpretation mode.
    pub search_mode: SearchMode,

    /// The query currently applied to the buffer. Lags `search_query` by
    /// the debounce quiet period.
    pub debounced_query: String,

    /// Timestamp of the most recent keystroke; `None` when no promotion
    /// is pending.
    last_query_edit: Option<Instant>,

    /// Quiet period before a raw query is promoted.
    pub debounce: Duration,

    /// Whether the subscription is currently open.
    pub connected: bool,

    /// Seconds remaining in the current retry countdown, if disconnected.
    pub retry_secs_remaining: Option<u64>,

    /// Countdown notification text; `Some` while the notice is visible.
    /// The user can dismiss it, but the next countdown tick re-surfaces it.
    pub retry_notice: Option<String>,

    /// Number of undecodable event payloads skipped this session.
    pub parse_error_count: u64,

    /// Status message for the status bar.
    pub status_message: String,

    /// Force the log view back to the newest entry on the next frame.
    pub scroll_to_bottom: bool,

    /// Whether debug mode is enabled.
    pub debug_mode: bool,
}

impl AppState {
    /// Create initial state for the given endpoint.
    pub fn new(endpoint: String, debounce: Duration, debug_mode: bool) -> Self {
        Self {
            endpoint,
            entries: Vec::new(),
            filtered_indices: Vec::new(),
            search_query: String::new(),
            search_mode: SearchMode::default(),
            debounced_query: String::new(),
            last_query_edit: None,
            debounce,
            connected: false,
            retry_secs_remaining: None,
            retry_notice: None,
            parse_error_count: 0,
            status_message: "Connecting...".to_string(),
            scroll_to_bottom: false,
            debug_mode,
        }
    }

    /// Recompute filtered indices from the buffer and the debounced query.
    pub fn apply_filter(&mut self) {
        self.filtered_indices =
            filter::filter_entries(&self.entries, &self.debounced_query, self.search_mode);
    }

    /// Record a keystroke in the search field, restarting the quiet period.
    pub fn note_query_edit(&mut self) {
        self.last_query_edit = Some(Instant::now());
    }

    /// Returns `true` while a debounce promotion is pending.
    pub fn debounce_pending(&self) -> bool {
        self.last_query_edit.is_some()
    }

    /// Promote the raw query once the quiet period has elapsed.
    ///
    /// Called from the UI update loop with the current instant. Returns
    /// `true` if the promotion happened this tick; the filtered view is
    /// recomputed and the log view scrolls to the newest entry.
    pub fn tick_debounce(&mut self, now: Instant) -> bool {
        match self.last_query_edit {
            Some(edited) if now.duration_since(edited) >= self.debounce => {
                self.last_query_edit = None;
                if self.debounced_query != self.search_query {
                    self.debounced_query = self.search_query.clone();
                    self.apply_filter();
                }
                self.scroll_to_bottom = true;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Level;
    use chrono::Utc;

    fn state_with_entries() -> AppState {
        let mut state = AppState::new(
            "http://127.0.0.1:9000/logs".to_string(),
            Duration::from_millis(250),
            false,
        );
        state.entries = vec![
            LogEntry {
                timestamp: Utc::now(),
                level: Level::Info,
                message: "server started".to_string(),
            },
            LogEntry {
                timestamp: Utc::now(),
                level: Level::Error,
                message: "disk full".to_string(),
            },
        ];
        state.apply_filter();
        state
    }

    #[test]
    fn test_promotes_only_after_quiet_period() {
        let mut state = state_with_entries();
        state.search_query = "disk".to_string();
        let edited = Instant::now();
        state.last_query_edit = Some(edited);

        // Still inside the quiet period: no promotion, view unchanged.
        assert!(!state.tick_debounce(edited + Duration::from_millis(100)));
        assert_eq!(state.debounced_query, "");
        assert_eq!(state.filtered_indices, vec![0, 1]);

        // Quiet period elapsed: promoted, view refiltered, scroll requested.
        assert!(state.tick_debounce(edited + Duration::from_millis(300)));
        assert_eq!(state.debounced_query, "disk");
        assert_eq!(state.filtered_indices, vec![1]);
        assert!(state.scroll_to_bottom);
        assert!(!state.debounce_pending());
    }

    #[test]
    fn test_new_keystroke_restarts_quiet_period() {
        let mut state = state_with_entries();
        state.search_query = "d".to_string();
        let first = Instant::now();
        state.last_query_edit = Some(first);

        // A later keystroke restamps the clock; the original deadline no
        // longer promotes.
        state.search_query = "di".to_string();
        let second = first + Duration::from_millis(200);
        state.last_query_edit = Some(second);

        assert!(!state.tick_debounce(first + Duration::from_millis(260)));
        assert!(state.tick_debounce(second + Duration::from_millis(260)));
        assert_eq!(state.debounced_query, "di");
    }
}
