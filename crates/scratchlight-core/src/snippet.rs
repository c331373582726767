//! Snippet carving and spotlight frame decomposition.
//!
//! Pure text algorithms shared by every front end: locating a search term
//! inside an extract, carving a bounded context window around the first
//! occurrence, and splitting a snippet into left-context / matched word /
//! right-context for the spotlight display.
//!
//! Matching is a plain case-insensitive substring search. Window arithmetic
//! is byte-based with cuts snapped inward to UTF-8 character boundaries, so
//! the advertised widths are upper bounds.

use std::ops::Range;

/// Ellipsis marker for truncated windows.
const ELLIPSIS: &str = "...";

/// Window used when the term is not found in the extract.
const FALLBACK_WINDOW: usize = 220;

/// Bytes of context kept before a match.
const CONTEXT_BEFORE: usize = 80;

/// Bytes kept from the match position onward.
const CONTEXT_AFTER: usize = 140;

/// Bytes of context on each side of the matched word in a spotlight frame.
const SIDE_CONTEXT: usize = 50;

/// Fallback result limit when the limit field is empty or unparsable.
const DEFAULT_LIMIT: i64 = 10;

/// Smallest result limit the remote search is asked for.
const MIN_LIMIT: i64 = 3;

/// Largest result limit the remote search is asked for.
const MAX_LIMIT: i64 = 25;

/// One spotlight frame: the matched word with its surrounding context.
///
/// `word` carries the casing found in the snippet, not the query's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpotlightFrame {
    pub left: String,
    pub word: String,
    pub right: String,
}

/// Byte range of the first case-insensitive occurrence of `needle` in
/// `haystack`. An empty needle matches at `0..0`.
pub fn find_ignore_case(haystack: &str, needle: &str) -> Option<Range<usize>> {
    if needle.is_empty() {
        return Some(0..0);
    }

    if haystack.is_ascii() && needle.is_ascii() {
        let lowered = haystack.to_ascii_lowercase();
        let needle = needle.to_ascii_lowercase();
        return lowered.find(&needle).map(|start| start..start + needle.len());
    }

    // Non-ASCII input: lowercasing can change byte lengths, so offsets in the
    // lowered haystack do not transfer back. Scan candidate start positions
    // instead and lowercase just enough characters to compare.
    let needle = needle.to_lowercase();
    for (start, _) in haystack.char_indices() {
        let mut lowered = String::with_capacity(needle.len());
        let mut end = start;
        for ch in haystack[start..].chars() {
            lowered.extend(ch.to_lowercase());
            end += ch.len_utf8();
            if lowered.len() >= needle.len() {
                break;
            }
        }
        if lowered == needle {
            return Some(start..end);
        }
    }
    None
}

/// Carve a bounded snippet out of `extract`, centred on the first
/// case-insensitive occurrence of `term`.
///
/// When the term is found at byte `i`, the window spans
/// `[i - CONTEXT_BEFORE, i + CONTEXT_AFTER)` clamped to the extract, with an
/// ellipsis on each side that was cut. When the term is absent, the first
/// `FALLBACK_WINDOW` bytes are returned with a trailing ellipsis, including
/// for extracts shorter than the window; the display relies on that marker
/// being stable.
pub fn build_snippet(extract: &str, term: &str) -> String {
    let Some(found) = find_ignore_case(extract, term) else {
        let cut = floor_boundary(extract, FALLBACK_WINDOW);
        return format!("{}{ELLIPSIS}", &extract[..cut]);
    };

    let start = ceil_boundary(extract, found.start.saturating_sub(CONTEXT_BEFORE));
    let end = floor_boundary(extract, found.start.saturating_add(CONTEXT_AFTER));

    let mut snippet = String::with_capacity(end - start + 2 * ELLIPSIS.len());
    if start > 0 {
        snippet.push_str(ELLIPSIS);
    }
    snippet.push_str(&extract[start..end]);
    if end < extract.len() {
        snippet.push_str(ELLIPSIS);
    }
    snippet
}

/// Split a snippet into left context, matched word, and right context for
/// the spotlight display.
///
/// The contexts are trimmed and capped at `SIDE_CONTEXT` bytes each. When
/// the term is not present in the snippet the contexts are empty and the
/// word falls back to the query term verbatim.
pub fn decompose(snippet: &str, term: &str) -> SpotlightFrame {
    let Some(found) = find_ignore_case(snippet, term) else {
        return SpotlightFrame {
            left: String::new(),
            word: term.to_string(),
            right: String::new(),
        };
    };

    let left_raw = snippet[..found.start].trim();
    let right_raw = snippet[found.end..].trim();

    let left_start = ceil_boundary(left_raw, left_raw.len().saturating_sub(SIDE_CONTEXT));
    let right_end = floor_boundary(right_raw, SIDE_CONTEXT);

    SpotlightFrame {
        left: left_raw[left_start..].to_string(),
        word: snippet[found.start..found.end].to_string(),
        right: right_raw[..right_end].to_string(),
    }
}

/// Parse the raw contents of the limit field into an effective search limit.
///
/// Empty, unparsable, or zero input falls back to the default; the result
/// is clamped to the supported range.
pub fn clamp_limit(raw: &str) -> u32 {
    let requested = raw
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|&n| n != 0)
        .unwrap_or(DEFAULT_LIMIT);
    requested.clamp(MIN_LIMIT, MAX_LIMIT) as u32
}

/// Largest char boundary in `s` that is `<= at`.
fn floor_boundary(s: &str, at: usize) -> usize {
    let mut at = at.min(s.len());
    while !s.is_char_boundary(at) {
        at -= 1;
    }
    at
}

/// Smallest char boundary in `s` that is `>= at`.
fn ceil_boundary(s: &str, at: usize) -> usize {
    let mut at = at.min(s.len());
    while !s.is_char_boundary(at) {
        at += 1;
    }
    at
}
