//! Glossary segmentation.
//!
//! Glossary terms are flat, so this is entry splitting without grouping.

use super::entries::split_entries;
use super::types::GlossaryEntry;

/// Split glossary region text into independent entries.
#[must_use]
pub fn segment_glossary(text: &str) -> Vec<GlossaryEntry<'_>> {
    split_entries(text)
        .into_iter()
        .map(GlossaryEntry::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_glossary() {
        let text = "Abandon\nTo turn a face-up ongoing scheme card face down.\n\nActivate\nTo put an activated ability onto the stack.\n\n\nActive Player\nThe player whose turn it is";
        let entries = segment_glossary(text);

        assert_eq!(entries.len(), 3);
        let terms: Vec<&str> = entries.iter().map(GlossaryEntry::term).collect();
        assert_eq!(terms, vec!["Abandon", "Activate", "Active Player"]);
        assert_eq!(entries[2].position, 2);
        assert_eq!(entries[2].definition(), Some("The player whose turn it is"));
    }

    #[test]
    fn test_multi_paragraph_definition_splits() {
        // A blank line inside a definition starts a new entry; glossary text
        // is taken as-is.
        let entries = segment_glossary("Term\nFirst part.\n\nSecond part.");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].text, "Second part.");
    }
}
