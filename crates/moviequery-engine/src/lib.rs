//! Movie query engine for moviequery.
//!
//! Resolves people and genres, enriches bare TMDB movie ids with details
//! and credits, and combines per-attribute searches with AND/OR semantics.

/// Domain error tags.
pub mod error;
/// Detail + credit enrichment.
pub mod enrich;
/// Search and failure policies.
pub mod options;
/// Person name resolution.
pub mod person;
/// Provider descriptor.
pub mod provider;
/// Filter groups and the query engine.
pub mod query;
/// Movie stubs and enriched records.
pub mod record;
/// Per-attribute search strategies.
pub mod search;

#[cfg(test)]
mod mock;

pub use enrich::{enrich, enrich_each};
pub use error::ErrorTag;
pub use options::{EnrichPolicy, NameMatch, SearchOptions, UnknownGenrePolicy};
pub use person::{PersonId, resolve_person};
pub use provider::{Ontology, ontology};
pub use query::{FilterGroup, QueryEngine, intersect_by_id, union_by_id};
pub use record::{Movie, MovieAttributes, MovieRecord, MovieStub};
