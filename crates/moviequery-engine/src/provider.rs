//! Provider descriptor.

use serde::Serialize;

/// Ontology class of the movies this engine returns.
pub const ONTOLOGY_CLASS: &str = "MOVIES AND TV";

/// Ontology subclass of the movies this engine returns.
pub const ONTOLOGY_SUBCLASS: &str = "MOVIE AND SERIES";

/// Filter attributes a [`FilterGroup`](crate::FilterGroup) accepts.
pub const ONTOLOGY_ATTRIBUTES: &[&str] = &["name", "cast", "director", "genre"];

/// Describes what kind of records the engine produces and how they can be
/// filtered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ontology {
    /// Record class.
    #[serde(rename = "ontologyClass")]
    pub class: &'static str,
    /// Record subclass.
    #[serde(rename = "ontologySubclass")]
    pub subclass: &'static str,
    /// Supported filter attributes.
    #[serde(rename = "ontologyAttributes")]
    pub attributes: &'static [&'static str],
}

/// Returns the descriptor of the TMDB movie provider.
#[must_use]
pub const fn ontology() -> Ontology {
    Ontology {
        class: ONTOLOGY_CLASS,
        subclass: ONTOLOGY_SUBCLASS,
        attributes: ONTOLOGY_ATTRIBUTES,
    }
}
