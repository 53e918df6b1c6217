//! Header code parsing and depth classification.

use regex::Regex;
use std::sync::LazyLock;

use super::types::{ClassifiedEntry, HeaderCode, RawEntry};
use crate::error::{Result, SegmenterError};

/// Leading run of letters, digits and periods, followed by whitespace or the
/// end of the entry.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static HEADER_CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([\p{L}\p{N}.]+)(?:\s|$)").expect("valid regex"));

/// Maximum number of characters of an entry quoted in error messages.
const SNIPPET_CHARS: usize = 60;

/// Parse the header code at the start of a rule body entry.
///
/// # Errors
/// `SegmenterError::MalformedHeader` if the entry does not start with a code.
///
/// # Examples
/// ```
/// use rulebook_segmenter::segmentation::{parse_header, DepthClass, RawEntry};
///
/// let code = parse_header(&RawEntry::new(0, "702.16a Protection is a static ability.")).unwrap();
/// assert_eq!(code.as_str(), "702.16a");
/// assert_eq!(code.depth_class(), DepthClass::SubruleContinuation);
/// ```
pub fn parse_header<'a>(entry: &RawEntry<'a>) -> Result<HeaderCode<'a>> {
    HEADER_CODE_PATTERN
        .captures(entry.text)
        .and_then(|caps| caps.get(1))
        .map(|m| HeaderCode::new(m.as_str()))
        .ok_or_else(|| SegmenterError::MalformedHeader {
            position: entry.position,
            snippet: snippet(entry.text),
        })
}

/// Parse and classify one rule body entry.
pub fn classify_entry<'a>(entry: RawEntry<'a>) -> Result<ClassifiedEntry<'a>> {
    let code = parse_header(&entry)?;
    Ok(ClassifiedEntry {
        entry,
        code,
        depth: code.depth_class(),
    })
}

/// Classify a whole rule body, stopping at the first malformed entry.
pub fn classify_entries<'a>(
    entries: impl IntoIterator<Item = RawEntry<'a>>,
) -> Result<Vec<ClassifiedEntry<'a>>> {
    entries.into_iter().map(classify_entry).collect()
}

fn snippet(text: &str) -> String {
    let mut snippet: String = text.chars().take(SNIPPET_CHARS).collect();
    if text.chars().count() > SNIPPET_CHARS {
        snippet.push_str("...");
    }
    snippet
}
