//! Search and failure policies.

use serde::{Deserialize, Serialize};

/// How a batch enrichment reacts to a failing movie.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnrichPolicy {
    /// Any failing movie fails the whole batch.
    #[default]
    FailFast,
    /// Failing movies are logged and dropped.
    BestEffort,
}

/// How a requested director name is compared with credit names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NameMatch {
    /// Byte-for-byte equality.
    Exact,
    /// Equality after lowercasing and trimming.
    #[default]
    CaseInsensitive,
}

impl NameMatch {
    /// Returns whether `candidate` names the person `wanted`.
    #[must_use]
    pub fn matches(self, candidate: &str, wanted: &str) -> bool {
        match self {
            Self::Exact => candidate == wanted,
            Self::CaseInsensitive => {
                candidate.trim().to_lowercase() == wanted.trim().to_lowercase()
            }
        }
    }
}

/// What a genre search does when no genre matches the requested name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownGenrePolicy {
    /// Produce an empty result.
    #[default]
    Empty,
    /// Fail with an `UNKNOWN_GENRE` error.
    Error,
}

/// Policies shared by every searcher of one query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Batch enrichment failure policy.
    pub enrich_policy: EnrichPolicy,
    /// Director name comparison.
    pub director_match: NameMatch,
    /// Unknown genre handling.
    pub unknown_genre: UnknownGenrePolicy,
}
