//! Structural segmentation of a rules document.
//!
//! The pipeline runs leaf-first:
//!
//! ```text
//! document -> extract_regions -> rule body -> split_entries -> classify_entries
//!                                                           -> RuleGrouper -> chunks
//!                             -> glossary  -> segment_glossary -> glossary entries
//! ```

mod boundary;
mod config;
mod entries;
mod glossary;
mod grouper;
mod header;
mod types;

pub use boundary::{extract_regions, Regions};
pub use config::{create_comprehensive_rules_overrides, OverrideSet};
pub use entries::split_entries;
pub use glossary::segment_glossary;
pub use grouper::{group_rules, RuleGrouper};
pub use header::{classify_entries, classify_entry, parse_header};
pub use types::{Chunk, ClassifiedEntry, DepthClass, GlossaryEntry, HeaderCode, RawEntry, Region};
