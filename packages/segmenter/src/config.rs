//! Configuration constants and the segmenter configuration value.
//!
//! Nothing here is global state: a [`SegmenterConfig`] is built once (from
//! defaults, a YAML file or CLI flags) and threaded through the pipeline.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SegmenterError};
use crate::segmentation::{create_comprehensive_rules_overrides, OverrideSet};

/// Marker closing the table of contents (the TOC lists "Glossary" and
/// "Credits" as its last two lines).
pub const DEFAULT_TOC_END_MARKER: &str = "\nGlossary\n\nCredits\n\n";

/// Marker closing the rule body: the final rule's period followed by the
/// "Glossary" heading.
pub const DEFAULT_RULES_END_MARKER: &str = ".\n\nGlossary\n\n";

/// Marker closing the glossary: the final definition's period followed by
/// the "Credits" heading.
pub const DEFAULT_GLOSSARY_END_MARKER: &str = ".\n\n\nCredits";

/// Chunks longer than this many characters are flagged in diagnostics.
///
/// Advisory only. Oversized chunks are still emitted.
pub const DEFAULT_MAX_CHUNK_LENGTH: usize = 4000;

/// Literal marker strings that delimit the three document regions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Markers {
    /// End of the table of contents / start of the rule body.
    pub toc_end: String,

    /// End of the rule body / start of the glossary.
    pub rules_end: String,

    /// End of the glossary.
    pub glossary_end: String,
}

impl Markers {
    /// Create a marker set from three literal strings.
    #[must_use]
    pub fn new(
        toc_end: impl Into<String>,
        rules_end: impl Into<String>,
        glossary_end: impl Into<String>,
    ) -> Self {
        Self {
            toc_end: toc_end.into(),
            rules_end: rules_end.into(),
            glossary_end: glossary_end.into(),
        }
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("toc_end", &self.toc_end),
            ("rules_end", &self.rules_end),
            ("glossary_end", &self.glossary_end),
        ] {
            if value.is_empty() {
                return Err(SegmenterError::InvalidConfig(format!(
                    "marker {name} must not be empty"
                )));
            }
        }
        Ok(())
    }
}

impl Default for Markers {
    fn default() -> Self {
        Self::new(
            DEFAULT_TOC_END_MARKER,
            DEFAULT_RULES_END_MARKER,
            DEFAULT_GLOSSARY_END_MARKER,
        )
    }
}

/// Complete configuration for one segmentation run.
///
/// # Examples
/// ```
/// use rulebook_segmenter::config::SegmenterConfig;
/// use rulebook_segmenter::segmentation::OverrideSet;
///
/// let config = SegmenterConfig::default()
///     .with_override_prefixes(OverrideSet::empty())
///     .with_max_chunk_length_advisory(2000);
/// assert!(config.validate().is_ok());
/// assert!(config.override_prefixes.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Region boundary markers.
    pub markers: Markers,

    /// Header code prefixes that force early chunk closure.
    pub override_prefixes: OverrideSet,

    /// Diagnostics threshold for oversized chunks, in characters.
    pub max_chunk_length_advisory: usize,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            markers: Markers::default(),
            override_prefixes: create_comprehensive_rules_overrides(),
            max_chunk_length_advisory: DEFAULT_MAX_CHUNK_LENGTH,
        }
    }
}

impl SegmenterConfig {
    /// Load a configuration from a YAML file.
    ///
    /// Every field is optional; missing fields take their default value.
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&text)?;
        tracing::debug!(path = %path.display(), "Loaded segmenter configuration");
        Ok(config)
    }

    /// Parse a configuration from YAML text and validate it.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the boundary markers.
    #[must_use]
    pub fn with_markers(mut self, markers: Markers) -> Self {
        self.markers = markers;
        self
    }

    /// Set the override prefixes.
    #[must_use]
    pub fn with_override_prefixes(mut self, overrides: OverrideSet) -> Self {
        self.override_prefixes = overrides;
        self
    }

    /// Set the oversized-chunk diagnostics threshold.
    #[must_use]
    pub fn with_max_chunk_length_advisory(mut self, max_length: usize) -> Self {
        self.max_chunk_length_advisory = max_length;
        self
    }

    /// Check that the configuration can drive a segmentation run.
    ///
    /// # Returns
    /// * `Ok(())` if all markers and prefixes are non-empty and the threshold is positive
    /// * `Err(SegmenterError::InvalidConfig)` otherwise
    pub fn validate(&self) -> Result<()> {
        self.markers.validate()?;
        if self.override_prefixes.iter().any(str::is_empty) {
            return Err(SegmenterError::InvalidConfig(
                "override prefixes must not be empty strings".to_string(),
            ));
        }
        if self.max_chunk_length_advisory == 0 {
            return Err(SegmenterError::InvalidConfig(
                "max_chunk_length_advisory must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
