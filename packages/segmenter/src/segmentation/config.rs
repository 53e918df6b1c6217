//! Override configuration for the rule grouper.

use serde::{Deserialize, Serialize};

/// Header code prefixes that force a continuation group to close early.
///
/// Some sections nest one level deeper than the length/punctuation heuristic
/// can see (e.g. "702.16" Protection lists dozens of lettered sub-rules), so
/// without an override the whole section would collapse into one chunk.
/// The set is opaque configuration: prefixes are matched literally with
/// `starts_with`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverrideSet {
    prefixes: Vec<String>,
}

impl OverrideSet {
    /// Create an override set from a list of prefixes.
    #[must_use]
    pub fn new(prefixes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Create an empty override set.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add one more prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefixes.push(prefix.into());
        self
    }

    /// Whether `code` starts with any configured prefix.
    #[must_use]
    pub fn matches(&self, code: &str) -> bool {
        self.prefixes.iter().any(|p| code.starts_with(p.as_str()))
    }

    /// Iterate over the configured prefixes.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.prefixes.iter().map(String::as_str)
    }

    /// Number of configured prefixes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    /// Whether no prefixes are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

/// Create the override set for the Comprehensive Rules.
///
/// Each prefix names a rule whose lettered sub-rules are long enough to be
/// indexed one per chunk:
///
/// ```text
/// 107.3   X in costs            608.2   resolving spells
/// 123.6   stickers              611.2   continuous effects from resolution
/// 205.3   subtypes              702.16  protection
/// 206.3   expansion symbols     702.19  trample
/// 508.1   declaring attackers   702.26  phasing
/// 509.1   declaring blockers    704.5   state-based actions
/// 601.2   casting spells        707.9   copy exceptions
/// 607.2   linked abilities      707.10  copies of spells
/// 800.4   leaving the game      807.4   Grand Melee turns
/// ```
#[must_use]
pub fn create_comprehensive_rules_overrides() -> OverrideSet {
    OverrideSet::new([
        "107.3", "123.6", "205.3", "206.3", "508.1", "509.1", "601.2", "607.2", "608.2", "611.2",
        "702.16", "702.19", "702.26", "704.5", "707.9", "707.10", "800.4", "807.4",
    ])
}
