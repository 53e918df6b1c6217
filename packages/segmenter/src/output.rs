//! Segmentation artifacts written to disk.
//!
//! ```text
//! <output>/
//! ├── toc_entries.txt         table of contents region, verbatim
//! ├── grouped_rules.json      rendered chunks, JSON array of strings
//! └── glossary_entries.json   glossary entries, JSON array of strings
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SegmenterError};
use crate::types::Segmentation;

/// File name of the table of contents artifact.
pub const TOC_FILE_NAME: &str = "toc_entries.txt";

/// File name of the grouped rules artifact.
pub const RULES_FILE_NAME: &str = "grouped_rules.json";

/// File name of the glossary artifact.
pub const GLOSSARY_FILE_NAME: &str = "glossary_entries.json";

/// Paths of the written artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedArtifacts {
    pub toc: PathBuf,
    pub rules: PathBuf,
    pub glossary: PathBuf,
}

/// Render the chunk sequence as a pretty-printed JSON array.
pub fn generate_rules_json(segmentation: &Segmentation<'_>) -> Result<String> {
    Ok(serde_json::to_string_pretty(&segmentation.rendered_chunks())?)
}

/// Render the glossary sequence as a pretty-printed JSON array.
pub fn generate_glossary_json(segmentation: &Segmentation<'_>) -> Result<String> {
    Ok(serde_json::to_string_pretty(&segmentation.glossary_texts())?)
}

/// Write all artifacts into an existing directory.
///
/// # Arguments
/// * `segmentation` - Result of a segmentation run
/// * `output_dir` - Directory to write into (must exist)
///
/// # Returns
/// Paths of the three written files
pub fn save_segmentation(
    segmentation: &Segmentation<'_>,
    output_dir: &Path,
) -> Result<SavedArtifacts> {
    if !output_dir.is_dir() {
        return Err(SegmenterError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Output directory does not exist: {}", output_dir.display()),
        )));
    }

    let artifacts = SavedArtifacts {
        toc: output_dir.join(TOC_FILE_NAME),
        rules: output_dir.join(RULES_FILE_NAME),
        glossary: output_dir.join(GLOSSARY_FILE_NAME),
    };

    fs::write(&artifacts.toc, segmentation.toc.text)?;
    fs::write(&artifacts.rules, generate_rules_json(segmentation)?)?;
    fs::write(&artifacts.glossary, generate_glossary_json(segmentation)?)?;

    tracing::info!(dir = %output_dir.display(), "Saved segmentation artifacts");
    Ok(artifacts)
}
