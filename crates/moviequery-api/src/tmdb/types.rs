//! TMDB API response types and request parameters.

use serde::Deserialize;

// --- Movie lists (search/movie, discover/movie, genre/{id}/movies) ---

/// Paged movie list returned by `search/movie`, `discover/movie`
/// and `genre/{genre_id}/movies`.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieListResponse {
    /// Current page number.
    #[serde(default)]
    pub page: u32,
    /// Movies on this page.
    #[serde(default)]
    pub results: Vec<TmdbMovieSearchResult>,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: u32,
    /// Total number of results.
    #[serde(default)]
    pub total_results: u32,
}

/// A single movie entry in a list response.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieSearchResult {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    #[serde(default)]
    pub title: String,
    /// Original title.
    #[serde(default)]
    pub original_title: String,
    /// Release date (YYYY-MM-DD or null).
    #[serde(default)]
    pub release_date: Option<String>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Popularity score.
    #[serde(default)]
    pub popularity: f64,
    /// Genre IDs.
    #[serde(default)]
    pub genre_ids: Vec<u32>,
}

// --- Movie Details ---

/// Response from `movie/{movie_id}` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Original title.
    #[serde(default)]
    pub original_title: String,
    /// IMDb ID (e.g. "tt0088247"); null for movies without one.
    #[serde(default)]
    pub imdb_id: Option<String>,
    /// Genres.
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    /// Release date.
    #[serde(default)]
    pub release_date: Option<String>,
    /// Runtime in minutes.
    #[serde(default)]
    pub runtime: Option<u32>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
}

/// Genre entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TmdbGenre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

/// Response from `genre/movie/list` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenreList {
    /// All movie genres known to TMDB.
    pub genres: Vec<TmdbGenre>,
}

// --- Credits ---

/// Response from `movie/{movie_id}/credits` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCredits {
    /// TMDB movie ID.
    pub id: u64,
    /// Cast in billing order.
    #[serde(default)]
    pub cast: Vec<TmdbCastMember>,
    /// Crew members.
    #[serde(default)]
    pub crew: Vec<TmdbCrewMember>,
}

/// A single cast entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCastMember {
    /// TMDB person ID.
    pub id: u64,
    /// Person name.
    pub name: String,
    /// Character played.
    #[serde(default)]
    pub character: Option<String>,
    /// Billing order.
    #[serde(default)]
    pub order: Option<u32>,
}

/// A single crew entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCrewMember {
    /// TMDB person ID.
    pub id: u64,
    /// Person name.
    pub name: String,
    /// Job title (e.g. "Director", "Screenplay").
    pub job: String,
    /// Department (e.g. "Directing").
    #[serde(default)]
    pub department: Option<String>,
}

// --- Search Person ---

/// Response from `search/person` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbPersonSearchResponse {
    /// Current page number.
    #[serde(default)]
    pub page: u32,
    /// Matching people, most relevant first.
    #[serde(default)]
    pub results: Vec<TmdbPersonSearchResult>,
    /// Total number of results.
    #[serde(default)]
    pub total_results: u32,
}

/// A single person search result.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbPersonSearchResult {
    /// TMDB person ID.
    pub id: u64,
    /// Person name.
    pub name: String,
    /// Main department (e.g. "Acting", "Directing").
    #[serde(default)]
    pub known_for_department: Option<String>,
    /// Popularity score.
    #[serde(default)]
    pub popularity: f64,
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    #[serde(default)]
    pub success: bool,
}

// --- Discover Parameters ---

/// Parameters for `discover/movie` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoverMovieParams {
    /// Only movies with this person in the cast.
    pub with_cast: Option<u64>,
    /// Only movies with this person in the crew.
    pub with_crew: Option<u64>,
}

impl DiscoverMovieParams {
    /// Discover movies featuring the given cast member.
    #[must_use]
    pub fn with_cast(person_id: u64) -> Self {
        Self {
            with_cast: Some(person_id),
            ..Self::default()
        }
    }

    /// Discover movies with the given crew member.
    #[must_use]
    pub fn with_crew(person_id: u64) -> Self {
        Self {
            with_crew: Some(person_id),
            ..Self::default()
        }
    }

    /// Builds the query pairs sent to TMDB.
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(id) = self.with_cast {
            query.push(("with_cast", id.to_string()));
        }
        if let Some(id) = self.with_crew {
            query.push(("with_crew", id.to_string()));
        }
        query
    }
}
