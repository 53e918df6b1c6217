//! Region boundary extraction.
//!
//! The document is one undifferentiated text blob. The three regions are
//! located purely by literal markers, each searched for after the end of the
//! previous one:
//!
//! ```text
//! [ TOC ][toc_end][ rule body ][rules_end][ glossary ][glossary_end] credits...
//! ```

use std::ops::Range;

use super::types::Region;
use crate::config::Markers;
use crate::error::{Result, SegmenterError};
use crate::types::RegionKind;

/// The three regions of a document, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Regions<'a> {
    pub toc: Region<'a>,
    pub rule_body: Region<'a>,
    pub glossary: Region<'a>,
}

/// Split a document into its table of contents, rule body and glossary.
///
/// # Errors
/// * `SegmenterError::BoundaryNotFound` if a marker does not occur after the previous one
/// * `SegmenterError::EmptyRegion` if a region is only whitespace
///
/// # Examples
/// ```
/// use rulebook_segmenter::config::Markers;
/// use rulebook_segmenter::segmentation::extract_regions;
///
/// let markers = Markers::new("<toc>", "<rules>", "<glossary>");
/// let document = "Contents <toc> 100. General <rules> Term <glossary>";
/// let regions = extract_regions(document, &markers).unwrap();
/// assert_eq!(regions.toc.text, "Contents");
/// assert_eq!(regions.rule_body.text, "100. General");
/// assert_eq!(regions.glossary.text, "Term");
/// ```
pub fn extract_regions<'a>(document: &'a str, markers: &Markers) -> Result<Regions<'a>> {
    let toc_end = find_marker(document, 0, &markers.toc_end, "toc_end", RegionKind::Toc)?;
    let toc = trimmed_region(document, RegionKind::Toc, 0..toc_end)?;

    let body_start = toc_end + markers.toc_end.len();
    let body_end = find_marker(
        document,
        body_start,
        &markers.rules_end,
        "rules_end",
        RegionKind::RuleBody,
    )?;
    let rule_body = trimmed_region(document, RegionKind::RuleBody, body_start..body_end)?;

    let glossary_start = body_end + markers.rules_end.len();
    let glossary_end = find_marker(
        document,
        glossary_start,
        &markers.glossary_end,
        "glossary_end",
        RegionKind::Glossary,
    )?;
    let glossary = trimmed_region(document, RegionKind::Glossary, glossary_start..glossary_end)?;

    tracing::debug!(
        toc_bytes = toc.text.len(),
        rule_body_bytes = rule_body.text.len(),
        glossary_bytes = glossary.text.len(),
        "Extracted document regions"
    );

    Ok(Regions {
        toc,
        rule_body,
        glossary,
    })
}

/// Byte offset of the first occurrence of `marker` at or after `from`.
fn find_marker(
    document: &str,
    from: usize,
    marker: &str,
    name: &'static str,
    region: RegionKind,
) -> Result<usize> {
    document[from..]
        .find(marker)
        .map(|offset| from + offset)
        .ok_or(SegmenterError::BoundaryNotFound {
            marker: name,
            region,
        })
}

/// Trim `document[range]` and record where the trimmed text sits.
fn trimmed_region(document: &str, kind: RegionKind, range: Range<usize>) -> Result<Region<'_>> {
    let raw = &document[range.clone()];
    let text = raw.trim();
    if text.is_empty() {
        return Err(SegmenterError::EmptyRegion { region: kind });
    }

    let start = range.start + (raw.len() - raw.trim_start().len());
    Ok(Region {
        kind,
        text,
        span: start..start + text.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markers() -> Markers {
        Markers::new("<toc>", "<rules>", "<glossary>")
    }

    #[test]
    fn test_extract_regions_trims_and_orders() {
        let doc = "  Contents\n <toc>\n\n100. General\n\n<rules>\nTerm\nDefinition\n<glossary> credits";
        let regions = extract_regions(doc, &markers()).unwrap();

        assert_eq!(regions.toc.text, "Contents");
        assert_eq!(regions.rule_body.text, "100. General");
        assert_eq!(regions.glossary.text, "Term\nDefinition");

        assert_eq!(regions.toc.kind, RegionKind::Toc);
        assert_eq!(regions.rule_body.kind, RegionKind::RuleBody);
        assert_eq!(regions.glossary.kind, RegionKind::Glossary);
    }

    #[test]
    fn test_region_spans_slice_the_document() {
        let doc = "Contents <toc> 100. General <rules> Term <glossary>";
        let regions = extract_regions(doc, &markers()).unwrap();

        for region in [&regions.toc, &regions.rule_body, &regions.glossary] {
            assert_eq!(&doc[region.span.clone()], region.text);
        }
        assert!(regions.toc.span.end < regions.rule_body.span.start);
        assert!(regions.rule_body.span.end < regions.glossary.span.start);
    }

    #[test]
    fn test_markers_are_searched_in_order() {
        // A rules_end occurring inside the TOC must not close the rule body.
        let doc = "Contents <rules> <toc> Body <rules> Gloss <glossary>";
        let regions = extract_regions(doc, &markers()).unwrap();

        assert_eq!(regions.toc.text, "Contents <rules>");
        assert_eq!(regions.rule_body.text, "Body");
        assert_eq!(regions.glossary.text, "Gloss");
    }

    #[test]
    fn test_missing_toc_marker() {
        let err = extract_regions("no markers here", &markers()).unwrap_err();
        assert!(matches!(
            err,
            SegmenterError::BoundaryNotFound {
                marker: "toc_end",
                region: RegionKind::Toc
            }
        ));
    }

    #[test]
    fn test_missing_rules_marker() {
        let err = extract_regions("Contents <toc> Body only", &markers()).unwrap_err();
        assert!(matches!(
            err,
            SegmenterError::BoundaryNotFound {
                marker: "rules_end",
                ..
            }
        ));
    }

    #[test]
    fn test_glossary_marker_before_rules_marker_is_not_found() {
        let doc = "Contents <toc> Body <glossary> more <rules> Gloss";
        let err = extract_regions(doc, &markers()).unwrap_err();
        assert!(matches!(
            err,
            SegmenterError::BoundaryNotFound {
                marker: "glossary_end",
                region: RegionKind::Glossary
            }
        ));
    }

    #[test]
    fn test_empty_toc() {
        let err =
            extract_regions("  \n<toc> Body <rules> Gloss <glossary>", &markers()).unwrap_err();
        assert!(matches!(
            err,
            SegmenterError::EmptyRegion {
                region: RegionKind::Toc
            }
        ));
    }

    #[test]
    fn test_empty_rule_body() {
        let err = extract_regions("Contents <toc>\n\n\n<rules> Gloss <glossary>", &markers())
            .unwrap_err();
        assert!(matches!(
            err,
            SegmenterError::EmptyRegion {
                region: RegionKind::RuleBody
            }
        ));
    }

    #[test]
    fn test_empty_glossary() {
        let err = extract_regions("Contents <toc> Body <rules><glossary>", &markers()).unwrap_err();
        assert!(matches!(
            err,
            SegmenterError::EmptyRegion {
                region: RegionKind::Glossary
            }
        ));
    }
}
