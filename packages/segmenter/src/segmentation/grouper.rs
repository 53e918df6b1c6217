//! Rule grouping: classified entries in, labelled chunks out.
//!
//! The grouper is a state machine folded over the entry sequence. Each step
//! takes the state by value and returns the next one:
//!
//! ```text
//! depth class            open group                   current header
//! ---------------------  ---------------------------  ---------------------
//! Ignored                seal                         unchanged
//! Section                seal (under previous)        this entry
//! SubruleTerminal        seal, then start with entry  unchanged
//! SubruleContinuation    append; seal on override     unchanged
//! end of input           seal                         -
//! ```
//!
//! A section whose scope ends without any chunk sealed under it is emitted
//! as a chunk of its own, so childless sections still reach the index.

use super::config::OverrideSet;
use super::types::{Chunk, ClassifiedEntry, DepthClass};

/// Groups classified rule entries into chunks.
#[derive(Debug, Clone, Default)]
pub struct RuleGrouper {
    overrides: OverrideSet,
}

impl RuleGrouper {
    /// Create a grouper with the given override prefixes.
    #[must_use]
    pub fn new(overrides: OverrideSet) -> Self {
        Self { overrides }
    }

    /// Group entries into chunks, preserving document order.
    #[must_use]
    pub fn group<'a>(&self, entries: &[ClassifiedEntry<'a>]) -> Vec<Chunk<'a>> {
        let chunks = entries
            .iter()
            .fold(GroupState::default(), |state, entry| {
                state.step(*entry, &self.overrides)
            })
            .finish();

        tracing::debug!(
            entries = entries.len(),
            chunks = chunks.len(),
            "Grouped rule entries"
        );
        chunks
    }
}

/// Group entries with a one-off grouper.
#[must_use]
pub fn group_rules<'a>(entries: &[ClassifiedEntry<'a>], overrides: &OverrideSet) -> Vec<Chunk<'a>> {
    RuleGrouper::new(overrides.clone()).group(entries)
}

#[derive(Debug, Default)]
struct GroupState<'a> {
    /// Most recent section entry.
    current_header: Option<ClassifiedEntry<'a>>,

    /// Whether a chunk has been sealed under `current_header`.
    header_emitted: bool,

    /// Members of the chunk in progress.
    open_group: Vec<ClassifiedEntry<'a>>,

    /// Sealed chunks.
    chunks: Vec<Chunk<'a>>,
}

impl<'a> GroupState<'a> {
    fn step(mut self, entry: ClassifiedEntry<'a>, overrides: &OverrideSet) -> Self {
        match entry.depth {
            DepthClass::Ignored => self.seal(),
            DepthClass::Section => {
                self = self.seal().close_section();
                self.current_header = Some(entry);
                self.header_emitted = false;
                self
            }
            DepthClass::SubruleTerminal => {
                self = self.seal();
                self.open_group.push(entry);
                self
            }
            DepthClass::SubruleContinuation => {
                self.open_group.push(entry);
                if overrides.matches(entry.code.as_str()) {
                    tracing::trace!(code = %entry.code, "Override closes chunk");
                    self.seal()
                } else {
                    self
                }
            }
        }
    }

    fn finish(self) -> Vec<Chunk<'a>> {
        self.seal().close_section().chunks
    }

    /// Emit the open group, if any, under the current header.
    fn seal(mut self) -> Self {
        if self.open_group.is_empty() {
            return self;
        }

        let members = std::mem::take(&mut self.open_group);
        if self.current_header.is_none() {
            tracing::warn!(
                position = members[0].entry.position,
                code = %members[0].code,
                "Rule entries precede the first section header; emitting unlabelled chunk"
            );
        }

        self.chunks.push(Chunk {
            header: self.current_header.map(|h| h.entry.text),
            members,
        });
        self.header_emitted = true;
        self
    }

    /// End the current section's scope, emitting it on its own if it got no chunks.
    fn close_section(mut self) -> Self {
        if let Some(section) = self.current_header {
            if !self.header_emitted {
                self.chunks.push(Chunk {
                    header: Some(section.entry.text),
                    members: vec![section],
                });
                self.header_emitted = true;
            }
        }
        self
    }
}
