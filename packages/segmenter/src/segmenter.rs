//! Main segmentation pipeline that ties all components together.

use crate::config::SegmenterConfig;
use crate::error::Result;
use crate::segmentation::{
    classify_entries, extract_regions, segment_glossary, split_entries, RuleGrouper,
};
use crate::types::Segmentation;

/// Segment a normalized rules document.
///
/// All-or-nothing: the first boundary or header error aborts the run and no
/// partial result is returned.
///
/// # Arguments
/// * `document` - Full document text (see [`crate::document::normalize_document`])
/// * `config` - Markers, override prefixes and diagnostics threshold
///
/// # Returns
/// A `Segmentation` borrowing from `document`
pub fn segment_document<'a>(
    document: &'a str,
    config: &SegmenterConfig,
) -> Result<Segmentation<'a>> {
    config.validate()?;

    let regions = extract_regions(document, &config.markers)?;

    let rule_entries = classify_entries(split_entries(regions.rule_body.text))?;
    let chunks = RuleGrouper::new(config.override_prefixes.clone()).group(&rule_entries);

    let glossary_entries = segment_glossary(regions.glossary.text);

    tracing::info!(
        rule_entries = rule_entries.len(),
        chunks = chunks.len(),
        glossary_entries = glossary_entries.len(),
        "Segmented document"
    );

    Ok(Segmentation {
        toc: regions.toc,
        rule_body: regions.rule_body,
        glossary: regions.glossary,
        rule_entries,
        chunks,
        glossary_entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Markers;
    use crate::error::SegmenterError;
    use crate::segmentation::OverrideSet;

    fn config() -> SegmenterConfig {
        SegmenterConfig::default()
            .with_markers(Markers::new("<toc>", "<rules>", "<glossary>"))
            .with_override_prefixes(OverrideSet::empty())
    }

    #[test]
    fn test_segment_document() {
        let doc = "Contents\n<toc>\n1. Game Concepts\n\n100. General\n\n100.1. Rule.\n\n100.1a Sub.\n<rules>\nTerm\nDefinition.\n\nOther\nMore.\n<glossary>";
        let seg = segment_document(doc, &config()).unwrap();

        assert_eq!(seg.toc.text, "Contents");
        assert_eq!(seg.rule_entries.len(), 4);
        assert_eq!(
            seg.rendered_chunks(),
            vec!["...under section 100. General:\n\n100.1. Rule.\n\n100.1a Sub.".to_string()]
        );
        assert_eq!(
            seg.glossary_texts(),
            vec!["Term\nDefinition.", "Other\nMore."]
        );
    }

    #[test]
    fn test_malformed_first_entry_aborts() {
        let doc = "Contents<toc>... stray\n\n100. General\n\n100.1. Rule.<rules>Term<glossary>";
        let err = segment_document(doc, &config()).unwrap_err();
        assert!(matches!(
            err,
            SegmenterError::MalformedHeader { position: 0, .. }
        ));
    }

    #[test]
    fn test_invalid_config_aborts_before_extraction() {
        let config = config().with_max_chunk_length_advisory(0);
        let err = segment_document("anything", &config).unwrap_err();
        assert!(matches!(err, SegmenterError::InvalidConfig(_)));
    }

    #[test]
    fn test_segmentation_is_idempotent() {
        let doc = "C<toc>100. G\n\n100.1. R.\n\n100.1a S<rules>T\nD<glossary>";
        let first = segment_document(doc, &config()).unwrap();
        let second = segment_document(doc, &config()).unwrap();

        assert_eq!(first.rendered_chunks(), second.rendered_chunks());
        assert_eq!(first.glossary_texts(), second.glossary_texts());
    }
}
