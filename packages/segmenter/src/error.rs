//! Error types for the segmenter.
//!
//! Every failure is fatal for the run: segmentation is all-or-nothing, so
//! errors carry enough context (marker, region, entry snippet) to diagnose
//! a document-format drift without re-running.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::RegionKind;

/// Main error type for the segmenter library.
#[derive(Debug, Error)]
pub enum SegmenterError {
    /// A boundary marker does not occur where the region layout expects it.
    #[error("Boundary marker {marker} not found while extracting the {region} region")]
    BoundaryNotFound {
        /// Name of the marker (`toc_end`, `rules_end`, `glossary_end`).
        marker: &'static str,
        /// Region that the marker closes.
        region: RegionKind,
    },

    /// A region was located but contains only whitespace.
    #[error("The {region} region is empty after trimming")]
    EmptyRegion { region: RegionKind },

    /// A rule body entry does not start with a parseable header code.
    #[error("Rule body entry #{position} has no parseable header code: '{snippet}'")]
    MalformedHeader { position: usize, snippet: String },

    /// Configuration values are unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The source document could not be read.
    #[error("Failed to read document {}: {source}", .path.display())]
    ReadDocument {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML configuration error.
    #[error("YAML configuration error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

/// Result type alias for segmenter operations.
pub type Result<T> = std::result::Result<T, SegmenterError>;
