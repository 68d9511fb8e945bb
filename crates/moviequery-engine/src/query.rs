//! Filter groups and the AND/OR query engine.

use std::collections::HashSet;

use anyhow::{Context, Result};
use futures::future::try_join_all;
use moviequery_api::tmdb::LocalTmdbApi;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::ErrorTag;
use crate::options::SearchOptions;
use crate::record::{Movie, MovieRecord};
use crate::search::{by_cast, by_director, by_genre, by_title};

/// Searchable movie attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attribute {
    Name,
    Cast,
    Director,
    Genre,
}

/// One AND-combined cluster of attribute predicates.
///
/// Attributes left as `None` (or blank) do not take part in the group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterGroup {
    /// Title substring. Also accepted as `title`.
    #[serde(default, alias = "title", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Cast member name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cast: Option<String>,
    /// Director name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    /// Genre name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
}

impl FilterGroup {
    /// Returns whether no attribute is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active_attributes().is_empty()
    }

    /// Lists the non-blank attributes in `name, cast, director, genre` order.
    fn active_attributes(&self) -> Vec<(Attribute, &str)> {
        [
            (Attribute::Name, self.name.as_deref()),
            (Attribute::Cast, self.cast.as_deref()),
            (Attribute::Director, self.director.as_deref()),
            (Attribute::Genre, self.genre.as_deref()),
        ]
        .into_iter()
        .filter_map(|(attribute, value)| {
            value
                .filter(|v| !v.trim().is_empty())
                .map(|v| (attribute, v))
        })
        .collect()
    }
}

/// Intersects result lists by movie id (logical AND).
///
/// A record of the first list survives only if its id appears in every
/// other list. The first list's order and copies are kept; repeated ids
/// collapse to their first occurrence. No lists yields no records.
#[must_use]
pub fn intersect_by_id(lists: Vec<Vec<MovieRecord>>) -> Vec<MovieRecord> {
    let mut lists = lists.into_iter();
    let Some(first) = lists.next() else {
        return Vec::new();
    };
    let others: Vec<HashSet<u64>> = lists
        .map(|list| list.iter().map(MovieRecord::id).collect())
        .collect();

    let mut seen: HashSet<u64> = HashSet::new();
    first
        .into_iter()
        .filter(|record| others.iter().all(|ids| ids.contains(&record.id())))
        .filter(|record| seen.insert(record.id()))
        .collect()
}

/// Unions result lists by movie id (logical OR).
///
/// Lists are concatenated in order; the first occurrence of an id wins.
#[must_use]
pub fn union_by_id(lists: Vec<Vec<MovieRecord>>) -> Vec<MovieRecord> {
    let mut seen: HashSet<u64> = HashSet::new();
    lists
        .into_iter()
        .flatten()
        .filter(|record| seen.insert(record.id()))
        .collect()
}

/// Runs filter-group queries against a TMDB API.
#[derive(Debug)]
pub struct QueryEngine<A> {
    /// API used by every searcher; owns the shared rate limiter.
    api: A,
    /// Policies passed to every searcher.
    options: SearchOptions,
}

impl<A: LocalTmdbApi + Sync> QueryEngine<A> {
    /// Creates an engine over `api` with the given policies.
    pub const fn new(api: A, options: SearchOptions) -> Self {
        Self { api, options }
    }

    /// Evaluates `groups`: AND within each group, OR across groups.
    ///
    /// All groups and all attribute searches of a group run concurrently.
    /// Returned movies carry no internal id.
    ///
    /// # Errors
    ///
    /// Returns an error tagged [`ErrorTag::Api`] if any search fails.
    #[instrument(skip_all, fields(groups = groups.len()))]
    pub async fn execute(&self, groups: &[FilterGroup]) -> Result<Vec<Movie>> {
        let per_group = try_join_all(groups.iter().map(|group| self.run_group(group)))
            .await
            .context(ErrorTag::Api)?;

        let merged = union_by_id(per_group);
        tracing::info!(groups = groups.len(), movies = merged.len(), "Query completed");

        Ok(merged.into_iter().map(MovieRecord::into_movie).collect())
    }

    /// Evaluates one group as the intersection of its attribute searches.
    async fn run_group(&self, group: &FilterGroup) -> Result<Vec<MovieRecord>> {
        let attributes = group.active_attributes();
        if attributes.is_empty() {
            tracing::debug!("filter group has no attributes");
            return Ok(Vec::new());
        }

        let lists = try_join_all(
            attributes
                .iter()
                .map(|&(attribute, value)| self.search(attribute, value)),
        )
        .await?;

        let sizes: Vec<usize> = lists.iter().map(Vec::len).collect();
        let matched = intersect_by_id(lists);
        tracing::debug!(?sizes, matched = matched.len(), "filter group evaluated");
        Ok(matched)
    }

    /// Dispatches one attribute to its searcher.
    async fn search(&self, attribute: Attribute, value: &str) -> Result<Vec<MovieRecord>> {
        match attribute {
            Attribute::Name => by_title(&self.api, value, &self.options).await,
            Attribute::Cast => by_cast(&self.api, value, &self.options).await,
            Attribute::Director => by_director(&self.api, value, &self.options).await,
            Attribute::Genre => by_genre(&self.api, value, &self.options).await,
        }
    }
}
