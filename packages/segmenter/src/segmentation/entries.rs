//! Entry splitting on blank-line runs.

use regex::Regex;
use std::sync::LazyLock;

use super::types::RawEntry;

/// Two or more consecutive line breaks.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static BLANK_LINE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{2,}").expect("valid regex"));

/// Split region text into trimmed, non-empty entries.
///
/// Entries keep document order and are numbered from zero after empty pieces
/// are discarded.
///
/// # Examples
/// ```
/// use rulebook_segmenter::segmentation::split_entries;
///
/// let entries = split_entries("100. General\n\n\n100.1. Rule one.\nstill rule one\n\n");
/// assert_eq!(entries.len(), 2);
/// assert_eq!(entries[1].text, "100.1. Rule one.\nstill rule one");
/// ```
#[must_use]
pub fn split_entries(text: &str) -> Vec<RawEntry<'_>> {
    BLANK_LINE_RUN
        .split(text)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .enumerate()
        .map(|(position, piece)| RawEntry::new(position, piece))
        .collect()
}
