//! Person name resolution.

use anyhow::{Context, Result};
use moviequery_api::tmdb::LocalTmdbApi;
use tracing::instrument;

/// TMDB person ID.
pub type PersonId = u64;

/// Resolves a free-text name to the first matching TMDB person.
///
/// Returns `Ok(None)` when the search yields no match; there is no
/// disambiguation beyond TMDB's own relevance order.
///
/// # Errors
///
/// Returns an error if the `search/person` request fails.
#[instrument(skip_all)]
pub async fn resolve_person(
    api: &(impl LocalTmdbApi + Sync),
    name: &str,
) -> Result<Option<PersonId>> {
    let response = api
        .search_person(name)
        .await
        .with_context(|| format!("person search failed: {name}"))?;

    let person_id = response.results.first().map(|person| person.id);
    match person_id {
        Some(id) => tracing::debug!(name, person_id = id, "person resolved"),
        None => tracing::debug!(name, "no person found"),
    }

    Ok(person_id)
}
