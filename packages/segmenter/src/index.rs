//! Hand-off of segmented sequences to an index.
//!
//! The segmentation core produces ordered strings. Identifiers, namespaces
//! and batching are decided here, at the boundary, and the actual storage is
//! behind [`IndexSink`]. The in-tree [`JsonlDirectorySink`] writes one JSON
//! record per line so a separate uploader can replay the batches.
//! Each export replaces the namespace files of the previous one.

use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use indicatif::ProgressBar;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, SegmenterError};
use crate::types::Segmentation;

/// Namespace for grouped rule chunks.
pub const RULES_NAMESPACE: &str = "cr";

/// Namespace for glossary entries.
pub const GLOSSARY_NAMESPACE: &str = "gls";

/// Default number of batches the rule chunks are split into.
pub const DEFAULT_RULES_BATCHES: usize = 50;

/// Default number of batches the glossary is split into.
pub const DEFAULT_GLOSSARY_BATCHES: usize = 10;

/// File name of the export manifest.
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

/// One record handed to an index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRecord {
    pub id: String,
    pub namespace: String,
    pub data: String,
}

impl IndexRecord {
    /// Create a record with a fresh random identifier.
    #[must_use]
    pub fn new(namespace: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            namespace: namespace.into(),
            data: data.into(),
        }
    }
}

/// Destination for index records.
pub trait IndexSink {
    /// Insert or replace a batch of records in a namespace.
    fn upsert(&mut self, namespace: &str, records: &[IndexRecord]) -> Result<()>;
}

/// Batch counts for an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub rules_batches: usize,
    pub glossary_batches: usize,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            rules_batches: DEFAULT_RULES_BATCHES,
            glossary_batches: DEFAULT_GLOSSARY_BATCHES,
        }
    }
}

impl ExportOptions {
    fn validate(&self) -> Result<()> {
        if self.rules_batches == 0 || self.glossary_batches == 0 {
            return Err(SegmenterError::InvalidConfig(
                "batch counts must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// What an export wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    pub rules_records: usize,
    pub rules_batches: usize,
    pub glossary_records: usize,
    pub glossary_batches: usize,
}

/// Split `items` into `batches` contiguous slices whose sizes differ by at
/// most one, larger slices first. Empty slices are dropped, so fewer items
/// than batches yields one slice per item.
///
/// # Examples
/// ```
/// use rulebook_segmenter::index::split_batches;
///
/// let items = [1, 2, 3, 4, 5, 6, 7];
/// let sizes: Vec<usize> = split_batches(&items, 3).iter().map(|b| b.len()).collect();
/// assert_eq!(sizes, vec![3, 2, 2]);
/// ```
#[must_use]
pub fn split_batches<T>(items: &[T], batches: usize) -> Vec<&[T]> {
    let batches = batches.max(1);
    let base = items.len() / batches;
    let extra = items.len() % batches;

    let mut result = Vec::with_capacity(batches.min(items.len()));
    let mut start = 0;
    for i in 0..batches {
        let size = base + usize::from(i < extra);
        if size == 0 {
            break;
        }
        result.push(&items[start..start + size]);
        start += size;
    }
    result
}

/// Export rule chunks and glossary entries to a sink, batch by batch.
///
/// # Arguments
/// * `segmentation` - Result of a segmentation run
/// * `sink` - Destination for the records
/// * `options` - Batch counts per namespace
/// * `progress` - Advanced once per batch (use `ProgressBar::hidden()` when not interactive)
pub fn export_segmentation<S: IndexSink>(
    segmentation: &Segmentation<'_>,
    sink: &mut S,
    options: &ExportOptions,
    progress: &ProgressBar,
) -> Result<ExportSummary> {
    options.validate()?;

    let rules = segmentation.rendered_chunks();
    let glossary = segmentation.glossary_texts();

    let rule_batches = split_batches(&rules, options.rules_batches);
    let glossary_batches = split_batches(&glossary, options.glossary_batches);
    progress.set_length((rule_batches.len() + glossary_batches.len()) as u64);

    tracing::info!(namespace = RULES_NAMESPACE, "Indexing rules");
    export_batches(sink, RULES_NAMESPACE, &rule_batches, progress)?;

    tracing::info!(namespace = GLOSSARY_NAMESPACE, "Indexing glossary");
    export_batches(sink, GLOSSARY_NAMESPACE, &glossary_batches, progress)?;

    tracing::info!("Indexing complete");
    Ok(ExportSummary {
        rules_records: rules.len(),
        rules_batches: rule_batches.len(),
        glossary_records: glossary.len(),
        glossary_batches: glossary_batches.len(),
    })
}

fn export_batches<S: IndexSink, T: AsRef<str>>(
    sink: &mut S,
    namespace: &str,
    batches: &[&[T]],
    progress: &ProgressBar,
) -> Result<()> {
    for (i, batch) in batches.iter().enumerate() {
        let records: Vec<IndexRecord> = batch
            .iter()
            .map(|text| {
                let data: &str = text.as_ref();
                IndexRecord::new(namespace, data)
            })
            .collect();
        sink.upsert(namespace, &records)?;

        progress.set_message(format!("{namespace} batch {}/{}", i + 1, batches.len()));
        progress.inc(1);
        tracing::info!(
            namespace,
            batch = i + 1,
            total = batches.len(),
            records = records.len(),
            "Indexed batch"
        );
    }
    Ok(())
}

/// Sink writing records to `<dir>/<namespace>.jsonl`.
///
/// The first upsert into a namespace truncates its file; later upserts in
/// the same run append.
#[derive(Debug, Clone)]
pub struct JsonlDirectorySink {
    dir: PathBuf,
    opened: HashSet<String>,
}

impl JsonlDirectorySink {
    /// Create a sink writing into `dir`, creating it if needed.
    ///
    /// A manifest left by an earlier export is removed; the directory only
    /// carries a manifest once this run has finished.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        let manifest = dir.join(MANIFEST_FILE_NAME);
        if manifest.exists() {
            fs::remove_file(&manifest)?;
            tracing::debug!(path = %manifest.display(), "Removed previous manifest");
        }

        Ok(Self {
            dir,
            opened: HashSet::new(),
        })
    }

    /// Directory the sink writes into.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the JSONL file for a namespace.
    #[must_use]
    pub fn namespace_path(&self, namespace: &str) -> PathBuf {
        self.dir.join(format!("{namespace}.jsonl"))
    }

    /// Write a manifest describing a finished export.
    pub fn write_manifest(&self, summary: &ExportSummary) -> Result<PathBuf> {
        #[derive(Serialize)]
        struct Manifest<'s> {
            generated_at: DateTime<Utc>,
            namespaces: [&'static str; 2],
            #[serde(flatten)]
            summary: &'s ExportSummary,
        }

        let path = self.dir.join(MANIFEST_FILE_NAME);
        let manifest = Manifest {
            generated_at: Utc::now(),
            namespaces: [RULES_NAMESPACE, GLOSSARY_NAMESPACE],
            summary,
        };
        fs::write(&path, serde_json::to_string_pretty(&manifest)?)?;
        Ok(path)
    }
}

impl IndexSink for JsonlDirectorySink {
    fn upsert(&mut self, namespace: &str, records: &[IndexRecord]) -> Result<()> {
        let first_batch = self.opened.insert(namespace.to_string());
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(first_batch)
            .append(!first_batch)
            .open(self.namespace_path(namespace))?;
        let mut writer = BufWriter::new(file);
        for record in records {
            serde_json::to_writer(&mut writer, record)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Markers, SegmenterConfig};
    use crate::segmenter::segment_document;
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct MemorySink {
        batches: Vec<(String, Vec<IndexRecord>)>,
    }

    impl IndexSink for MemorySink {
        fn upsert(&mut self, namespace: &str, records: &[IndexRecord]) -> Result<()> {
            self.batches.push((namespace.to_string(), records.to_vec()));
            Ok(())
        }
    }

    const DOC: &str =
        "C<toc>100. G\n\n100.1. A.\n\n100.2. B.\n\n100.3. C.<rules>One\n\nTwo<glossary>";

    fn segmentation() -> Segmentation<'static> {
        let config =
            SegmenterConfig::default().with_markers(Markers::new("<toc>", "<rules>", "<glossary>"));
        segment_document(DOC, &config).unwrap()
    }

    fn export_to<S: IndexSink>(sink: &mut S, seg: &Segmentation<'_>) -> ExportSummary {
        export_segmentation(seg, sink, &ExportOptions::default(), &ProgressBar::hidden()).unwrap()
    }

    fn line_count(path: &Path) -> usize {
        fs::read_to_string(path).unwrap().lines().count()
    }

    #[test]
    fn test_split_batches_sizes() {
        let items: Vec<usize> = (0..10).collect();
        let sizes: Vec<usize> = split_batches(&items, 4).iter().map(|b| b.len()).collect();
        assert_eq!(sizes, vec![3, 3, 2, 2]);
    }

    #[test]
    fn test_split_batches_preserves_order() {
        let items: Vec<usize> = (0..10).collect();
        let flattened: Vec<usize> = split_batches(&items, 3).concat();
        assert_eq!(flattened, items);
    }

    #[test]
    fn test_split_batches_more_batches_than_items() {
        let items = ["a", "b"];
        let batches = split_batches(&items, 50);
        assert_eq!(batches, vec![&["a"][..], &["b"][..]]);
    }

    #[test]
    fn test_split_batches_empty_and_zero() {
        let empty: [u8; 0] = [];
        assert!(split_batches(&empty, 5).is_empty());
        assert_eq!(split_batches(&[1, 2, 3], 0).len(), 1);
    }

    #[test]
    fn test_export_segmentation_to_memory() {
        let seg = segmentation();
        let mut sink = MemorySink::default();
        let options = ExportOptions {
            rules_batches: 2,
            glossary_batches: 10,
        };

        let summary =
            export_segmentation(&seg, &mut sink, &options, &ProgressBar::hidden()).unwrap();

        assert_eq!(
            summary,
            ExportSummary {
                rules_records: 3,
                rules_batches: 2,
                glossary_records: 2,
                glossary_batches: 2,
            }
        );
        let namespaces: Vec<&str> = sink.batches.iter().map(|(ns, _)| ns.as_str()).collect();
        assert_eq!(namespaces, vec!["cr", "cr", "gls", "gls"]);

        let data: Vec<String> = sink
            .batches
            .iter()
            .filter(|(ns, _)| ns == RULES_NAMESPACE)
            .flat_map(|(_, records)| records.iter().map(|r| r.data.clone()))
            .collect();
        assert_eq!(data, seg.rendered_chunks());
    }

    #[test]
    fn test_export_assigns_unique_ids() {
        let seg = segmentation();
        let mut sink = MemorySink::default();
        export_to(&mut sink, &seg);

        let mut ids: Vec<String> = sink
            .batches
            .iter()
            .flat_map(|(_, records)| records.iter().map(|r| r.id.clone()))
            .collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
        assert!(ids.iter().all(|id| Uuid::parse_str(id).is_ok()));
    }

    #[test]
    fn test_export_rejects_zero_batches() {
        let seg = segmentation();
        let mut sink = MemorySink::default();
        let options = ExportOptions {
            rules_batches: 0,
            glossary_batches: 1,
        };
        let result = export_segmentation(&seg, &mut sink, &options, &ProgressBar::hidden());
        assert!(matches!(result, Err(SegmenterError::InvalidConfig(_))));
        assert!(sink.batches.is_empty());
    }

    #[test]
    fn test_jsonl_directory_sink() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = JsonlDirectorySink::new(dir.path().join("index")).unwrap();
        let seg = segmentation();

        let summary = export_to(&mut sink, &seg);
        let manifest = sink.write_manifest(&summary).unwrap();

        let rules = fs::read_to_string(sink.namespace_path(RULES_NAMESPACE)).unwrap();
        let records: Vec<IndexRecord> = rules
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.namespace == "cr"));

        let manifest: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(manifest).unwrap()).unwrap();
        assert_eq!(manifest["rules_records"], 3);
        assert_eq!(manifest["glossary_records"], 2);
        assert!(manifest["generated_at"].is_string());
    }

    #[test]
    fn test_repeated_export_replaces_namespace_files() {
        let dir = tempfile::tempdir().unwrap();
        let seg = segmentation();

        for _ in 0..2 {
            let mut sink = JsonlDirectorySink::new(dir.path()).unwrap();
            let summary = export_to(&mut sink, &seg);
            sink.write_manifest(&summary).unwrap();
        }

        let manifest: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(dir.path().join(MANIFEST_FILE_NAME)).unwrap(),
        )
        .unwrap();
        let sink = JsonlDirectorySink::new(dir.path()).unwrap();
        assert_eq!(
            manifest["rules_records"],
            line_count(&sink.namespace_path(RULES_NAMESPACE))
        );
        assert_eq!(
            manifest["glossary_records"],
            line_count(&sink.namespace_path(GLOSSARY_NAMESPACE))
        );
    }

    #[test]
    fn test_batches_within_one_export_append() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = JsonlDirectorySink::new(dir.path()).unwrap();
        fs::write(sink.namespace_path(RULES_NAMESPACE), "stale\n").unwrap();

        sink.upsert(RULES_NAMESPACE, &[IndexRecord::new(RULES_NAMESPACE, "a")]).unwrap();
        sink.upsert(RULES_NAMESPACE, &[IndexRecord::new(RULES_NAMESPACE, "b")]).unwrap();

        let rules = fs::read_to_string(sink.namespace_path(RULES_NAMESPACE)).unwrap();
        let data: Vec<String> = rules
            .lines()
            .map(|line| serde_json::from_str::<IndexRecord>(line).unwrap().data)
            .collect();
        assert_eq!(data, vec!["a", "b"]);
    }

    #[test]
    fn test_new_sink_removes_stale_manifest() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MANIFEST_FILE_NAME), "{}").unwrap();

        let sink = JsonlDirectorySink::new(dir.path()).unwrap();

        assert_eq!(sink.dir(), dir.path());
        assert!(!sink.dir().join(MANIFEST_FILE_NAME).exists());
    }
}
