// livetail - core/filter.rs
//
// Search engine for the entry buffer.
// Core layer: pure logic, no I/O or UI dependencies.
//
// Fuzzy results are ranked by relevance score, so their order is not
// receipt order. Regex and substring results keep receipt order.

use crate::core::model::{LogEntry, SearchMode};
use crate::util::error::FilterError;
use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};
use regex::Regex;

/// Apply the search to a slice of entries, returning indices of matches.
///
/// Returns a Vec of indices into the original entries slice. This avoids
/// copying entries and enables virtual scrolling on the filtered view.
///
/// An empty query matches everything in receipt order.
pub fn filter_entries(entries: &[LogEntry], query: &str, mode: SearchMode) -> Vec<usize> {
    if query.is_empty() {
        return (0..entries.len()).collect();
    }

    match mode {
        SearchMode::Fuzzy => fuzzy_filter(entries, query),
        SearchMode::Regex => regex_filter(entries, query),
    }
}

/// Compile a user-supplied regex pattern.
pub fn compile_regex(pattern: &str) -> Result<Regex, FilterError> {
    Regex::new(pattern).map_err(|e| FilterError::InvalidRegex {
        pattern: pattern.to_string(),
        source: e,
    })
}

/// Score every message against the query and return matching indices
/// ranked by descending relevance.
fn fuzzy_filter(entries: &[LogEntry], query: &str) -> Vec<usize> {
    let mut matcher = Matcher::new(Config::DEFAULT);
    let pattern = Pattern::parse(query, CaseMatching::Ignore, Normalization::Smart);

    let mut scored: Vec<(usize, u32)> = entries
        .iter()
        .enumerate()
        .filter_map(|(idx, entry)| {
            let mut buf = Vec::new();
            let haystack = Utf32Str::new(&entry.message, &mut buf);
            pattern.score(haystack, &mut matcher).map(|score| (idx, score))
        })
        .collect();

    // Best matches first; ties keep receipt order (sort is stable).
    scored.sort_by_key(|&(_, score)| std::cmp::Reverse(score));
    scored.into_iter().map(|(idx, _)| idx).collect()
}

/// Match messages against the compiled pattern, or fall back to plain
/// case-sensitive substring containment when the pattern does not compile.
/// The fallback is silent: no error reaches the user.
fn regex_filter(entries: &[LogEntry], query: &str) -> Vec<usize> {
    match compile_regex(query) {
        Ok(regex) => entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| regex.is_match(&entry.message))
            .map(|(idx, _)| idx)
            .collect(),
        Err(e) => {
            tracing::debug!(error = %e, "Pattern rejected; using substring containment");
            entries
                .iter()
                .enumerate()
                .filter(|(_, entry)| entry.message.contains(query))
                .map(|(idx, _)| idx)
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Level;
    use chrono::Utc;

    fn make_entry(level: Level, message: &str) -> LogEntry {
        LogEntry {
            timestamp: Utc::now(),
            level,
            message: message.to_string(),
        }
    }

    fn buffer() -> Vec<LogEntry> {
        vec![
            make_entry(Level::Info, "server started"),
            make_entry(Level::Error, "disk full"),
        ]
    }

    #[test]
    fn test_empty_query_returns_all_in_order() {
        let entries = buffer();
        assert_eq!(
            filter_entries(&entries, "", SearchMode::Fuzzy),
            vec![0, 1]
        );
        assert_eq!(
            filter_entries(&entries, "", SearchMode::Regex),
            vec![0, 1]
        );
    }

    #[test]
    fn test_fuzzy_includes_matching_entry() {
        let entries = buffer();
        let result = filter_entries(&entries, "disk", SearchMode::Fuzzy);
        assert!(result.contains(&1), "expected 'disk full' in {result:?}");
    }

    #[test]
    fn test_fuzzy_ranks_contiguous_match_first() {
        let entries = vec![
            make_entry(Level::Debug, "d-e-p-o-i-s-k"),
            make_entry(Level::Error, "disk full"),
        ];
        let result = filter_entries(&entries, "disk", SearchMode::Fuzzy);
        assert_eq!(result.first(), Some(&1));
    }

    #[test]
    fn test_fuzzy_no_match_is_empty() {
        let entries = buffer();
        let result = filter_entries(&entries, "zzzqqq", SearchMode::Fuzzy);
        assert!(result.is_empty());
    }

    #[test]
    fn test_regex_valid_pattern_exact_subset() {
        let entries = buffer();
        let result = filter_entries(&entries, "^disk", SearchMode::Regex);
        assert_eq!(result, vec![1]);
    }

    #[test]
    fn test_regex_matches_all_satisfying_entries() {
        let entries = vec![
            make_entry(Level::Error, "code 404"),
            make_entry(Level::Error, "code 500"),
            make_entry(Level::Info, "ok"),
        ];
        let result = filter_entries(&entries, r"code \d{3}", SearchMode::Regex);
        assert_eq!(result, vec![0, 1]);
    }

    #[test]
    fn test_invalid_regex_falls_back_to_substring() {
        // "[" does not compile; no message contains a literal "[".
        let entries = buffer();
        let result = filter_entries(&entries, "[", SearchMode::Regex);
        assert!(result.is_empty());

        // With a message that does contain the literal text, the fallback matches.
        let entries = vec![make_entry(Level::Warn, "bracket [ here")];
        let result = filter_entries(&entries, "[", SearchMode::Regex);
        assert_eq!(result, vec![0]);
    }

    #[test]
    fn test_substring_fallback_is_case_sensitive() {
        // "Disk [" does not compile as a regex, forcing the substring path.
        let entries = vec![make_entry(Level::Error, "Disk [ full")];
        assert_eq!(filter_entries(&entries, "Disk [", SearchMode::Regex), vec![0]);
        assert!(filter_entries(&entries, "disk [", SearchMode::Regex).is_empty());
    }

    #[test]
    fn test_compile_regex_invalid_is_error() {
        assert!(matches!(
            compile_regex("[invalid"),
            Err(FilterError::InvalidRegex { .. })
        ));
    }
}
