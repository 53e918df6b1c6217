//! Rulebook Segmenter - Split the Magic: The Gathering Comprehensive Rules
//! into indexable units.
//!
//! The rules are published as one plain-text file. This crate locates its
//! table of contents, rule body and glossary, groups each numbered rule with
//! its lettered sub-rules into labelled chunks, and hands the chunks and
//! glossary entries to an index.
//!
//! # Example
//!
//! ```
//! use rulebook_segmenter::config::{Markers, SegmenterConfig};
//! use rulebook_segmenter::segment_document;
//!
//! let document = "Contents <toc> 100. General\n\n100.1. Rule one.\n\n100.1a Sub-rule. <rules> Term\nDefinition <glossary>";
//! let markers = Markers::new("<toc>", "<rules>", "<glossary>");
//! let config = SegmenterConfig::default().with_markers(markers);
//!
//! let segmentation = segment_document(document, &config).unwrap();
//! assert_eq!(
//!     segmentation.rendered_chunks(),
//!     vec!["...under section 100. General:\n\n100.1. Rule one.\n\n100.1a Sub-rule."]
//! );
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Markers, default values and the configuration value
//! - [`types`]: Region kinds and the segmentation result
//! - [`error`]: Error types and Result alias
//! - [`document`]: Document loading and newline normalization
//! - [`segmentation`]: Boundary extraction, entry splitting, header classification, grouping
//! - [`segmenter`]: The end-to-end pipeline
//! - [`diagnostics`]: Advisory counts, samples and length extremes
//! - [`output`]: JSON/text artifacts
//! - [`index`]: Batched hand-off to an index sink
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod document;
pub mod error;
pub mod index;
pub mod output;
pub mod segmentation;
pub mod segmenter;
pub mod types;

// Re-export main functions
pub use document::load_document;
pub use segmenter::segment_document;

// Re-export commonly used items
pub use config::SegmenterConfig;
pub use error::{Result, SegmenterError};
pub use types::{RegionKind, Segmentation};
