//! Per-attribute search strategies.
//!
//! Each strategy produces candidate stubs from one TMDB endpoint and
//! enriches them. A person or genre that cannot be found yields an empty
//! list rather than an error.

use anyhow::{Context, Result, anyhow};
use moviequery_api::tmdb::{DiscoverMovieParams, LocalTmdbApi, TmdbMovieListResponse};
use tracing::instrument;

use crate::enrich::enrich;
use crate::error::ErrorTag;
use crate::options::{SearchOptions, UnknownGenrePolicy};
use crate::person::resolve_person;
use crate::record::{MovieRecord, MovieStub};

/// Collects the stubs of a movie list response.
fn stubs_of(response: &TmdbMovieListResponse) -> Vec<MovieStub> {
    response.results.iter().map(MovieStub::from).collect()
}

/// Searches movies by title.
///
/// TMDB title search is fuzzy, so results are narrowed to those whose
/// original title contains `text`, ignoring case.
///
/// # Errors
///
/// Returns an error if the search or enrichment fails.
#[instrument(skip_all)]
pub async fn by_title(
    api: &(impl LocalTmdbApi + Sync),
    text: &str,
    options: &SearchOptions,
) -> Result<Vec<MovieRecord>> {
    let response = api
        .search_movie(text)
        .await
        .with_context(|| format!("title search failed: {text}"))?;

    let needle = text.trim().to_lowercase();
    let stubs: Vec<MovieStub> = response
        .results
        .iter()
        .filter(|movie| movie.original_title.to_lowercase().contains(&needle))
        .map(MovieStub::from)
        .collect();

    tracing::debug!(
        query = text,
        fetched = response.results.len(),
        matched = stubs.len(),
        "title search narrowed"
    );

    enrich(api, &stubs, options.enrich_policy).await
}

/// Searches movies featuring a cast member.
///
/// # Errors
///
/// Returns an error if the person search, discovery or enrichment fails.
#[instrument(skip_all)]
pub async fn by_cast(
    api: &(impl LocalTmdbApi + Sync),
    name: &str,
    options: &SearchOptions,
) -> Result<Vec<MovieRecord>> {
    let Some(person_id) = resolve_person(api, name).await? else {
        return Ok(Vec::new());
    };

    let response = api
        .discover_movie(&DiscoverMovieParams::with_cast(person_id))
        .await
        .with_context(|| format!("cast discovery failed: {name}"))?;

    enrich(api, &stubs_of(&response), options.enrich_policy).await
}

/// Searches movies directed by a person.
///
/// Discovery by crew also returns movies the person wrote or produced, so
/// enriched records are kept only when their director list names the
/// person under `options.director_match`.
///
/// # Errors
///
/// Returns an error if the person search, discovery or enrichment fails.
#[instrument(skip_all)]
pub async fn by_director(
    api: &(impl LocalTmdbApi + Sync),
    name: &str,
    options: &SearchOptions,
) -> Result<Vec<MovieRecord>> {
    let Some(person_id) = resolve_person(api, name).await? else {
        return Ok(Vec::new());
    };

    let response = api
        .discover_movie(&DiscoverMovieParams::with_crew(person_id))
        .await
        .with_context(|| format!("crew discovery failed: {name}"))?;

    let mut records = enrich(api, &stubs_of(&response), options.enrich_policy).await?;
    let before = records.len();
    records.retain(|record| {
        record
            .attributes
            .director
            .iter()
            .any(|director| options.director_match.matches(director, name))
    });

    tracing::debug!(
        director = name,
        kept = records.len(),
        dropped = before.saturating_sub(records.len()),
        "director filter applied"
    );

    Ok(records)
}

/// Searches movies of a genre.
///
/// The genre name is compared with the TMDB taxonomy ignoring case and
/// surrounding whitespace; the first match wins.
///
/// # Errors
///
/// Returns an error if a request or enrichment fails, or if no genre
/// matches and `options.unknown_genre` is [`UnknownGenrePolicy::Error`].
#[instrument(skip_all)]
pub async fn by_genre(
    api: &(impl LocalTmdbApi + Sync),
    text: &str,
    options: &SearchOptions,
) -> Result<Vec<MovieRecord>> {
    let taxonomy = api
        .genre_list()
        .await
        .context("genre list request failed")?;

    let wanted = text.trim().to_lowercase();
    let Some(genre) = taxonomy
        .genres
        .iter()
        .find(|genre| genre.name.to_lowercase() == wanted)
    else {
        return match options.unknown_genre {
            UnknownGenrePolicy::Empty => {
                tracing::debug!(genre = text, "unknown genre, no results");
                Ok(Vec::new())
            }
            UnknownGenrePolicy::Error => {
                Err(anyhow!("unknown genre: {text}").context(ErrorTag::UnknownGenre))
            }
        };
    };

    let response = api
        .genre_movies(genre.id)
        .await
        .with_context(|| format!("genre movies request failed: {}", genre.name))?;

    enrich(api, &stubs_of(&response), options.enrich_policy).await
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use std::sync::atomic::Ordering;

    use super::*;
    use crate::options::NameMatch;

    use crate::mock::MockTmdbApi;

    fn catalog() -> MockTmdbApi {
        MockTmdbApi::new()
            .with_movie(
                218,
                "The Terminator",
                &["Action", "Science Fiction"],
                &["James Cameron"],
                &["Arnold Schwarzenegger", "Linda Hamilton"],
            )
            .with_movie(
                280,
                "Terminator 2: Judgment Day",
                &["Action", "Science Fiction"],
                &["James Cameron"],
                &["Arnold Schwarzenegger", "Linda Hamilton"],
            )
            .with_movie(
                2_124,
                "Terminal Velocity",
                &["Action"],
                &["Deran Sarafian"],
                &["Charlie Sheen"],
            )
            .with_movie(
                10_000,
                "Strange Days",
                &["Science Fiction"],
                &["Kathryn Bigelow"],
                &["Ralph Fiennes"],
            )
            .with_title_search(
                "Terminator",
                &[
                    (218, "The Terminator"),
                    (280, "Terminator 2: Judgment Day"),
                    (2_124, "Terminal Velocity"),
                ],
            )
            .with_person("Arnold Schwarzenegger", 1_100)
            .with_cast_credits(1_100, &[218, 280])
            .with_person("James Cameron", 2_710)
            .with_crew_credits(2_710, &[218, 280, 10_000])
            .with_genre(28, "Action", &[218, 2_124])
            .with_genre(878, "Science Fiction", &[280, 10_000])
    }

    fn ids(records: &[MovieRecord]) -> Vec<u64> {
        records.iter().map(MovieRecord::id).collect()
    }

    #[tokio::test]
    async fn test_by_title_keeps_substring_matches() {
        // Arrange
        let mock = catalog();

        // Act
        let records = by_title(&mock, "Terminator", &SearchOptions::default())
            .await
            .unwrap();

        // Assert
        assert_eq!(ids(&records), vec![218, 280]);
    }

    #[tokio::test]
    async fn test_by_title_without_matches_issues_one_request() {
        // Arrange
        let mock = catalog();

        // Act
        let records = by_title(&mock, "Nothing", &SearchOptions::default())
            .await
            .unwrap();

        // Assert
        assert!(records.is_empty());
        assert_eq!(mock.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_by_cast() {
        // Arrange
        let mock = catalog();

        // Act
        let records = by_cast(&mock, "Arnold Schwarzenegger", &SearchOptions::default())
            .await
            .unwrap();

        // Assert
        assert_eq!(ids(&records), vec![218, 280]);
    }

    #[tokio::test]
    async fn test_by_cast_unknown_person_is_empty() {
        // Arrange
        let mock = catalog();

        // Act
        let records = by_cast(&mock, "NoSuchPerson", &SearchOptions::default())
            .await
            .unwrap();

        // Assert
        assert!(records.is_empty());
        assert_eq!(mock.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_by_director_drops_non_directed_movies() {
        // Arrange
        let mock = catalog();

        // Act
        let records = by_director(&mock, "James Cameron", &SearchOptions::default())
            .await
            .unwrap();

        // Assert: 10000 is in his crew credits but directed by someone else
        assert_eq!(ids(&records), vec![218, 280]);
    }

    #[tokio::test]
    async fn test_by_director_exact_match_is_case_sensitive() {
        // Arrange
        let mock = catalog().with_person("james cameron", 2_710);
        let exact = SearchOptions {
            director_match: NameMatch::Exact,
            ..SearchOptions::default()
        };

        // Act
        let exact_records = by_director(&mock, "james cameron", &exact).await.unwrap();
        let relaxed_records = by_director(&mock, "james cameron", &SearchOptions::default())
            .await
            .unwrap();

        // Assert
        assert!(exact_records.is_empty());
        assert_eq!(ids(&relaxed_records), vec![218, 280]);
    }

    #[tokio::test]
    async fn test_by_director_unknown_person_is_empty() {
        // Arrange
        let mock = catalog();

        // Act
        let records = by_director(&mock, "Nobody", &SearchOptions::default())
            .await
            .unwrap();

        // Assert
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_by_genre_is_case_insensitive() {
        // Arrange
        let mock = catalog();
        let options = SearchOptions::default();

        // Act
        let upper = by_genre(&mock, "ACTION", &options).await.unwrap();
        let lower = by_genre(&mock, "action", &options).await.unwrap();

        // Assert
        assert_eq!(upper, lower);
        assert_eq!(ids(&upper), vec![218, 2_124]);
    }

    #[tokio::test]
    async fn test_by_genre_trims_input() {
        // Arrange
        let mock = catalog();

        // Act
        let records = by_genre(&mock, "  science fiction ", &SearchOptions::default())
            .await
            .unwrap();

        // Assert
        assert_eq!(ids(&records), vec![280, 10_000]);
    }

    #[tokio::test]
    async fn test_by_genre_unknown_is_empty_by_default() {
        // Arrange
        let mock = catalog();

        // Act
        let records = by_genre(&mock, "Western", &SearchOptions::default())
            .await
            .unwrap();

        // Assert
        assert!(records.is_empty());
        assert_eq!(mock.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_by_genre_unknown_can_fail() {
        // Arrange
        let mock = catalog();
        let options = SearchOptions {
            unknown_genre: UnknownGenrePolicy::Error,
            ..SearchOptions::default()
        };

        // Act
        let result = by_genre(&mock, "Western", &options).await;

        // Assert
        let err = result.unwrap_err();
        assert_eq!(err.downcast_ref::<ErrorTag>(), Some(&ErrorTag::UnknownGenre));
        assert!(format!("{err:#}").contains("unknown genre: Western"));
    }
}
