//! Command-line interface for the segmenter.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::SegmenterConfig;
use crate::diagnostics::{DiagnosticsOptions, DiagnosticsReport};
use crate::document::load_document;
use crate::error::Result;
use crate::index::{
    export_segmentation, ExportOptions, JsonlDirectorySink, DEFAULT_GLOSSARY_BATCHES,
    DEFAULT_RULES_BATCHES,
};
use crate::output::save_segmentation;
use crate::segmentation::OverrideSet;
use crate::segmenter::segment_document;
use crate::types::Segmentation;

/// Rulebook Segmenter - Split the Comprehensive Rules into indexable chunks.
#[derive(Parser)]
#[command(name = "rulebook-segmenter")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Segment a rules document, report diagnostics and optionally save artifacts.
    Segment {
        /// Path to the rules text file (e.g., MagicCompRules.txt)
        document: PathBuf,

        #[command(flatten)]
        config: ConfigArgs,

        /// Directory to write toc_entries.txt, grouped_rules.json and glossary_entries.json
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Segment a rules document and export index records in batches.
    Export {
        /// Path to the rules text file
        document: PathBuf,

        #[command(flatten)]
        config: ConfigArgs,

        /// Directory for the <namespace>.jsonl files and manifest
        #[arg(short, long)]
        output: PathBuf,

        /// Number of batches for rule chunks
        #[arg(long, default_value_t = DEFAULT_RULES_BATCHES)]
        rules_batches: usize,

        /// Number of batches for glossary entries
        #[arg(long, default_value_t = DEFAULT_GLOSSARY_BATCHES)]
        glossary_batches: usize,
    },
}

/// Configuration flags shared by all subcommands.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigArgs {
    /// YAML configuration file (markers, override_prefixes, max_chunk_length_advisory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Extra header code prefix that forces early chunk closure (repeatable)
    #[arg(long = "override-prefix", value_name = "PREFIX")]
    pub override_prefixes: Vec<String>,

    /// Drop the configured override prefixes before adding --override-prefix values
    #[arg(long)]
    pub no_overrides: bool,

    /// Advisory maximum chunk length in characters
    #[arg(long)]
    pub max_chunk_length: Option<usize>,
}

impl ConfigArgs {
    /// Build the effective configuration: file (or defaults), then flags.
    pub fn resolve(&self) -> Result<SegmenterConfig> {
        let mut config = match &self.config {
            Some(path) => SegmenterConfig::from_yaml_file(path)?,
            None => SegmenterConfig::default(),
        };

        if self.no_overrides {
            config.override_prefixes = OverrideSet::empty();
        }
        for prefix in &self.override_prefixes {
            config.override_prefixes = config.override_prefixes.with_prefix(prefix.clone());
        }
        if let Some(max_length) = self.max_chunk_length {
            config.max_chunk_length_advisory = max_length;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Segment {
            document,
            config,
            output,
        } => segment_command(&document, &config, output.as_deref()),
        Commands::Export {
            document,
            config,
            output,
            rules_batches,
            glossary_batches,
        } => export_command(
            &document,
            &config,
            &output,
            ExportOptions {
                rules_batches,
                glossary_batches,
            },
        ),
    }
}

/// Execute the segment command.
fn segment_command(document: &Path, args: &ConfigArgs, output: Option<&Path>) -> Result<()> {
    let config = args.resolve()?;
    let text = load_document(document)?;
    let segmentation = segment_document(&text, &config)?;

    report(&segmentation, &config);

    if let Some(output_dir) = output {
        let saved = save_segmentation(&segmentation, output_dir)?;
        println!();
        println!("{} {}", style("Saved:").green().bold(), saved.toc.display());
        println!("       {}", saved.rules.display());
        println!("       {}", saved.glossary.display());
    }

    Ok(())
}

/// Execute the export command.
fn export_command(
    document: &Path,
    args: &ConfigArgs,
    output: &Path,
    options: ExportOptions,
) -> Result<()> {
    let config = args.resolve()?;
    let text = load_document(document)?;
    let segmentation = segment_document(&text, &config)?;

    report(&segmentation, &config);

    let mut sink = JsonlDirectorySink::new(output)?;

    let pb = ProgressBar::new(0);
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .expect("valid template"),
    );

    let summary = match export_segmentation(&segmentation, &mut sink, &options, &pb) {
        Ok(summary) => summary,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };
    pb.finish_and_clear();

    let manifest = sink.write_manifest(&summary)?;

    println!();
    println!(
        "{} {} rule chunks in {} batches, {} glossary entries in {} batches",
        style("Exported").green().bold(),
        summary.rules_records,
        summary.rules_batches,
        summary.glossary_records,
        summary.glossary_batches
    );
    println!("{} {}", style("Index:").green().bold(), sink.dir().display());
    println!("       {}", manifest.display());

    Ok(())
}

/// Log diagnostics and print a short summary.
fn report(segmentation: &Segmentation<'_>, config: &SegmenterConfig) {
    let report = DiagnosticsReport::compute(segmentation, &DiagnosticsOptions::from_config(config));
    report.log();

    println!("  Rule entries: {}", report.rule_entries.count);
    println!("  Chunks: {}", style(report.chunks.count).cyan());
    println!("  Glossary entries: {}", style(report.glossary_entries.count).cyan());
    if !report.oversized_chunks.is_empty() {
        println!(
            "  Over {} characters: {}",
            report.max_chunk_length,
            style(report.oversized_chunks.len()).yellow().bold()
        );
    }
}
