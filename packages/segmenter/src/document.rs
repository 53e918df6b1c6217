//! Document loading.
//!
//! The rules text is published with Windows line endings and sometimes a
//! byte-order mark. Markers and blank-line splitting are written against
//! `\n`, so the text is normalized once at load time.

use std::borrow::Cow;
use std::path::Path;

use crate::error::{Result, SegmenterError};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Read a document from disk and normalize it.
pub fn load_document(path: &Path) -> Result<String> {
    let raw = std::fs::read_to_string(path).map_err(|source| SegmenterError::ReadDocument {
        path: path.to_path_buf(),
        source,
    })?;

    let document = normalize_document(&raw).into_owned();
    tracing::info!(
        path = %path.display(),
        bytes = document.len(),
        "Loaded rules document"
    );
    Ok(document)
}

/// Strip a leading byte-order mark and convert `\r\n` and lone `\r` to `\n`.
///
/// # Examples
/// ```
/// use rulebook_segmenter::document::normalize_document;
///
/// assert_eq!(normalize_document("\u{feff}a\r\n\r\nb\rc"), "a\n\nb\nc");
/// assert_eq!(normalize_document("already clean\n"), "already clean\n");
/// ```
#[must_use]
pub fn normalize_document(text: &str) -> Cow<'_, str> {
    let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}
