//! Detail + credit enrichment of movie stubs.

use anyhow::{Context, Result};
use futures::future::{join_all, try_join, try_join_all};
use moviequery_api::tmdb::{LocalTmdbApi, TmdbCredits, TmdbMovieDetails};
use tracing::instrument;

use crate::options::EnrichPolicy;
use crate::record::{MovieRecord, MovieStub};

/// Crew job that marks a director.
const DIRECTOR_JOB: &str = "Director";

/// Builds a record from a movie's details and credits.
///
/// Directors are the crew entries whose job is `"Director"`, in upstream
/// order and without de-duplication.
#[must_use]
pub fn merge(details: &TmdbMovieDetails, credits: &TmdbCredits) -> MovieRecord {
    let mut record = MovieRecord::new(details.id, details.title.as_str());
    if let Some(imdb_id) = details.imdb_id.as_deref().filter(|id| !id.is_empty()) {
        record.set_imdb_links(imdb_id);
    }

    record.attributes.genre = details.genres.iter().map(|g| g.name.clone()).collect();
    record.attributes.director = credits
        .crew
        .iter()
        .filter(|member| member.job == DIRECTOR_JOB)
        .map(|member| member.name.clone())
        .collect();
    record.attributes.cast = credits.cast.iter().map(|c| c.name.clone()).collect();
    record
}

/// Fetches details and credits of one movie concurrently and merges them.
async fn enrich_one(api: &(impl LocalTmdbApi + Sync), stub: MovieStub) -> Result<MovieRecord> {
    let (details, credits) = try_join(api.movie_details(stub.id), api.movie_credits(stub.id))
        .await
        .with_context(|| format!("failed to enrich movie {}", stub.id))?;
    Ok(merge(&details, &credits))
}

/// Enriches every stub concurrently, keeping one result per stub.
///
/// The output is positionally aligned with `stubs`.
#[instrument(skip_all, fields(count = stubs.len()))]
pub async fn enrich_each(
    api: &(impl LocalTmdbApi + Sync),
    stubs: &[MovieStub],
) -> Vec<Result<MovieRecord>> {
    join_all(stubs.iter().map(|stub| enrich_one(api, *stub))).await
}

/// Enriches every stub concurrently and aggregates the results by `policy`.
///
/// Records keep the order of `stubs`. An empty input issues no request.
///
/// # Errors
///
/// With [`EnrichPolicy::FailFast`], returns the first failing detail or
/// credit request. [`EnrichPolicy::BestEffort`] never fails.
#[instrument(skip_all, fields(count = stubs.len()))]
pub async fn enrich(
    api: &(impl LocalTmdbApi + Sync),
    stubs: &[MovieStub],
    policy: EnrichPolicy,
) -> Result<Vec<MovieRecord>> {
    if stubs.is_empty() {
        return Ok(Vec::new());
    }

    match policy {
        EnrichPolicy::FailFast => {
            try_join_all(stubs.iter().map(|stub| enrich_one(api, *stub))).await
        }
        EnrichPolicy::BestEffort => {
            let outcomes = enrich_each(api, stubs).await;
            let mut records = Vec::with_capacity(outcomes.len());
            for (stub, outcome) in stubs.iter().zip(outcomes) {
                match outcome {
                    Ok(record) => records.push(record),
                    Err(e) => tracing::warn!(
                        movie_id = stub.id,
                        error = %format!("{e:#}"),
                        "Skipping movie that failed to enrich"
                    ),
                }
            }
            tracing::debug!(
                enriched = records.len(),
                skipped = stubs.len().saturating_sub(records.len()),
                "best-effort enrichment completed"
            );
            Ok(records)
        }
    }
}
