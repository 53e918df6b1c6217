//! Types for the segmentation pipeline.
//!
//! Everything here borrows from the document text. Regions own nothing;
//! entries, header codes and chunks are views into the same buffer.

use std::fmt;
use std::ops::Range;

use serde::Serialize;

use crate::types::RegionKind;

/// A trimmed, non-empty division of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region<'a> {
    /// Which division this is.
    pub kind: RegionKind,

    /// Trimmed region text.
    pub text: &'a str,

    /// Byte span of `text` within the document.
    pub span: Range<usize>,
}

/// A trimmed entry of a region, separated from its neighbours by blank lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RawEntry<'a> {
    /// Zero-based position in the region's entry sequence.
    pub position: usize,

    /// Trimmed entry text.
    pub text: &'a str,
}

impl<'a> RawEntry<'a> {
    /// Create a new entry.
    #[must_use]
    pub fn new(position: usize, text: &'a str) -> Self {
        Self { position, text }
    }
}

/// Hierarchy depth bucket of a header code.
///
/// Classification looks only at the code's length and whether it ends in a
/// period:
///
/// ```text
/// "1."       length 2        -> Ignored
/// "100."     length 4        -> Section
/// "100.1"    length 5        -> Section
/// "100.1."   length 6, "."   -> SubruleTerminal
/// "100.1a"   length 6        -> SubruleContinuation
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DepthClass {
    /// Chapter-level numbers ("1.", "100"). Seals the open group, adds nothing.
    Ignored,

    /// Starts a new section and becomes the label for following chunks.
    Section,

    /// Numbered rule ("100.1."). Always starts a fresh group.
    SubruleTerminal,

    /// Lettered sub-rule ("100.1a"). Appended to the open group.
    SubruleContinuation,
}

impl DepthClass {
    /// Minimum code length of a section header.
    pub const SECTION_MIN_LENGTH: usize = 4;

    /// Minimum code length of a sub-rule header.
    pub const SUBRULE_MIN_LENGTH: usize = 6;

    /// Classify a header code by its shape.
    #[must_use]
    pub fn from_shape(length: usize, trailing_period: bool) -> Self {
        if length < Self::SECTION_MIN_LENGTH {
            Self::Ignored
        } else if length < Self::SUBRULE_MIN_LENGTH {
            Self::Section
        } else if trailing_period {
            Self::SubruleTerminal
        } else {
            Self::SubruleContinuation
        }
    }

    /// Get the string value for logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ignored => "ignored",
            Self::Section => "section",
            Self::SubruleTerminal => "subrule-terminal",
            Self::SubruleContinuation => "subrule-continuation",
        }
    }
}

impl fmt::Display for DepthClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Leading identifying token of a rule body entry (e.g. "702.16a").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HeaderCode<'a> {
    raw: &'a str,
}

impl<'a> HeaderCode<'a> {
    pub(crate) fn new(raw: &'a str) -> Self {
        Self { raw }
    }

    /// The code exactly as it appears in the entry.
    #[must_use]
    pub fn as_str(&self) -> &'a str {
        self.raw
    }

    /// Length in characters.
    #[must_use]
    pub fn length(&self) -> usize {
        self.raw.chars().count()
    }

    /// Whether the code ends with a period ("100.1.").
    #[must_use]
    pub fn has_trailing_period(&self) -> bool {
        self.raw.ends_with('.')
    }

    /// Depth class derived from length and trailing punctuation.
    #[must_use]
    pub fn depth_class(&self) -> DepthClass {
        DepthClass::from_shape(self.length(), self.has_trailing_period())
    }
}

impl fmt::Display for HeaderCode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.raw)
    }
}

/// A rule body entry together with its parsed header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClassifiedEntry<'a> {
    pub entry: RawEntry<'a>,
    pub code: HeaderCode<'a>,
    pub depth: DepthClass,
}

/// A section's sub-rules grouped into one indexable block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk<'a> {
    /// Full text of the section entry this chunk sits under, if one was seen.
    pub header: Option<&'a str>,

    /// Member entries in document order. Never empty.
    pub members: Vec<ClassifiedEntry<'a>>,
}

impl<'a> Chunk<'a> {
    /// Label line prepended to the chunk body.
    #[must_use]
    pub fn label(&self) -> Option<String> {
        self.header.map(|header| format!("...under section {header}:"))
    }

    /// Member texts joined by blank lines.
    #[must_use]
    pub fn body(&self) -> String {
        self.members
            .iter()
            .map(|m| m.entry.text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Label and body as handed to the index.
    #[must_use]
    pub fn render(&self) -> String {
        match self.label() {
            Some(label) => format!("{label}\n\n{}", self.body()),
            None => self.body(),
        }
    }

    /// Header code of the first member (e.g. "702.16.").
    #[must_use]
    pub fn lead_code(&self) -> Option<HeaderCode<'a>> {
        self.members.first().map(|m| m.code)
    }

    /// Entry positions covered by this chunk.
    pub fn positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.members.iter().map(|m| m.entry.position)
    }
}

/// A flat glossary entry: a term on the first line, its definition below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GlossaryEntry<'a> {
    /// Zero-based position in the glossary.
    pub position: usize,

    /// Trimmed entry text.
    pub text: &'a str,
}

impl<'a> GlossaryEntry<'a> {
    /// The defined term.
    #[must_use]
    pub fn term(&self) -> &'a str {
        self.text.lines().next().unwrap_or_default().trim()
    }

    /// Definition text following the term line, if any.
    #[must_use]
    pub fn definition(&self) -> Option<&'a str> {
        self.text
            .split_once('\n')
            .map(|(_, rest)| rest.trim())
            .filter(|rest| !rest.is_empty())
    }
}

impl<'a> From<RawEntry<'a>> for GlossaryEntry<'a> {
    fn from(entry: RawEntry<'a>) -> Self {
        Self {
            position: entry.position,
            text: entry.text,
        }
    }
}
