//! Advisory diagnostics over a segmentation.
//!
//! Counts, first/last samples and length extremes help an operator spot a
//! format drift (e.g. a chunk that swallowed a whole section). Nothing in
//! here feeds back into segmentation.

use serde::Serialize;

use crate::config::{SegmenterConfig, DEFAULT_MAX_CHUNK_LENGTH};
use crate::types::Segmentation;

/// Number of leading items sampled per sequence.
pub const DEFAULT_HEAD_SAMPLES: usize = 5;

/// Number of trailing items sampled per sequence.
pub const DEFAULT_TAIL_SAMPLES: usize = 3;

/// Number of longest items listed per sequence.
pub const DEFAULT_LONGEST_SAMPLES: usize = 5;

/// Characters of each sampled item shown in previews.
pub const DEFAULT_PREVIEW_CHARS: usize = 100;

/// Sampling options for a diagnostics report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticsOptions {
    pub head: usize,
    pub tail: usize,
    pub longest: usize,
    pub preview_chars: usize,
    pub max_chunk_length: usize,
}

impl Default for DiagnosticsOptions {
    fn default() -> Self {
        Self {
            head: DEFAULT_HEAD_SAMPLES,
            tail: DEFAULT_TAIL_SAMPLES,
            longest: DEFAULT_LONGEST_SAMPLES,
            preview_chars: DEFAULT_PREVIEW_CHARS,
            max_chunk_length: DEFAULT_MAX_CHUNK_LENGTH,
        }
    }
}

impl DiagnosticsOptions {
    /// Default sampling with the configured chunk length threshold.
    #[must_use]
    pub fn from_config(config: &SegmenterConfig) -> Self {
        Self {
            max_chunk_length: config.max_chunk_length_advisory,
            ..Self::default()
        }
    }
}

/// One sampled item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemSummary {
    /// Position in its sequence.
    pub position: usize,

    /// Length in characters.
    pub length: usize,

    /// Leading characters of the item.
    pub preview: String,
}

/// Samples of one output sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequenceSummary {
    pub count: usize,
    pub head: Vec<ItemSummary>,
    pub tail: Vec<ItemSummary>,
    pub longest: Vec<ItemSummary>,
}

/// A chunk over the advisory length threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OversizedChunk {
    /// Position in the chunk sequence.
    pub position: usize,

    /// Header code of the chunk's first member.
    pub code: String,

    /// Rendered length in characters.
    pub length: usize,
}

/// Diagnostics for one segmentation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticsReport {
    pub rule_entries: SequenceSummary,
    pub chunks: SequenceSummary,
    pub glossary_entries: SequenceSummary,
    pub max_chunk_length: usize,
    pub oversized_chunks: Vec<OversizedChunk>,
}

impl DiagnosticsReport {
    /// Compute the report. Pure: the segmentation is only read.
    #[must_use]
    pub fn compute(segmentation: &Segmentation<'_>, options: &DiagnosticsOptions) -> Self {
        let rule_texts: Vec<&str> = segmentation
            .rule_entries
            .iter()
            .map(|e| e.entry.text)
            .collect();
        let rendered = segmentation.rendered_chunks();
        let glossary_texts = segmentation.glossary_texts();

        let oversized_chunks = segmentation
            .chunks
            .iter()
            .zip(&rendered)
            .enumerate()
            .filter_map(|(position, (chunk, text))| {
                let length = char_len(text);
                (length > options.max_chunk_length).then(|| OversizedChunk {
                    position,
                    code: chunk
                        .lead_code()
                        .map(|c| c.as_str().to_string())
                        .unwrap_or_default(),
                    length,
                })
            })
            .collect();

        Self {
            rule_entries: summarize(&rule_texts, options),
            chunks: summarize(&rendered, options),
            glossary_entries: summarize(&glossary_texts, options),
            max_chunk_length: options.max_chunk_length,
            oversized_chunks,
        }
    }

    /// Emit the report as log events.
    pub fn log(&self) {
        log_sequence("rule entries", &self.rule_entries);
        log_sequence("chunks", &self.chunks);
        log_sequence("glossary entries", &self.glossary_entries);

        if self.oversized_chunks.is_empty() {
            tracing::info!(
                max_chunk_length = self.max_chunk_length,
                "No chunks over the advisory length"
            );
        }
        for chunk in &self.oversized_chunks {
            tracing::warn!(
                position = chunk.position,
                code = %chunk.code,
                length = chunk.length,
                max_chunk_length = self.max_chunk_length,
                "Chunk exceeds advisory length"
            );
        }
    }
}

fn summarize<S: AsRef<str>>(items: &[S], options: &DiagnosticsOptions) -> SequenceSummary {
    let summary = |position: usize| {
        let text: &str = items[position].as_ref();
        ItemSummary {
            position,
            length: char_len(text),
            preview: text.chars().take(options.preview_chars).collect(),
        }
    };

    let count = items.len();
    let head_end = options.head.min(count);
    // Tail never repeats items already shown in the head.
    let tail_start = count.saturating_sub(options.tail).max(head_end);

    let mut by_length: Vec<usize> = (0..count).collect();
    by_length.sort_by_key(|&i| std::cmp::Reverse(char_len(items[i].as_ref())));

    SequenceSummary {
        count,
        head: (0..head_end).map(summary).collect(),
        tail: (tail_start..count).map(summary).collect(),
        longest: by_length.into_iter().take(options.longest).map(summary).collect(),
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn log_sequence(label: &str, summary: &SequenceSummary) {
    tracing::info!(sequence = label, count = summary.count, "Sequence count");
    for (sample, items) in [
        ("head", &summary.head),
        ("tail", &summary.tail),
        ("longest", &summary.longest),
    ] {
        for item in items {
            tracing::info!(
                sequence = label,
                sample,
                position = item.position,
                length = item.length,
                preview = %item.preview,
                "Sample"
            );
        }
    }
}
