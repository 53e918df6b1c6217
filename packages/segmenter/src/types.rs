//! Core data types for the segmenter.
//!
//! A [`Segmentation`] is the complete result of one run over a document:
//! the three regions plus every sequence derived from them. All of it
//! borrows from the document text, which is never copied or mutated.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::segmentation::{Chunk, ClassifiedEntry, GlossaryEntry, Region};

/// The three major divisions of the rules document, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionKind {
    /// Table of contents.
    Toc,

    /// Numbered rule body.
    RuleBody,

    /// Alphabetical glossary of terms.
    Glossary,
}

impl RegionKind {
    /// Get the string value used in logs and output.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Toc => "table of contents",
            Self::RuleBody => "rule body",
            Self::Glossary => "glossary",
        }
    }
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of segmenting one document.
#[derive(Debug, Clone)]
pub struct Segmentation<'a> {
    /// Table of contents region.
    pub toc: Region<'a>,

    /// Rule body region.
    pub rule_body: Region<'a>,

    /// Glossary region.
    pub glossary: Region<'a>,

    /// Every rule body entry with its header code and depth class.
    pub rule_entries: Vec<ClassifiedEntry<'a>>,

    /// Grouped rule chunks, in document order.
    pub chunks: Vec<Chunk<'a>>,

    /// Flat glossary entries, in document order.
    pub glossary_entries: Vec<GlossaryEntry<'a>>,
}

impl Segmentation<'_> {
    /// Render every chunk to the label+body text handed to the index.
    #[must_use]
    pub fn rendered_chunks(&self) -> Vec<String> {
        self.chunks.iter().map(Chunk::render).collect()
    }

    /// Glossary entry texts, in document order.
    #[must_use]
    pub fn glossary_texts(&self) -> Vec<&str> {
        self.glossary_entries.iter().map(|e| e.text).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_kind_display() {
        assert_eq!(RegionKind::Toc.to_string(), "table of contents");
        assert_eq!(RegionKind::RuleBody.to_string(), "rule body");
        assert_eq!(RegionKind::Glossary.to_string(), "glossary");
    }

    #[test]
    fn test_region_kind_serialization() {
        let json = serde_json::to_string(&RegionKind::RuleBody).unwrap();
        assert_eq!(json, "\"rule_body\"");
    }
}
