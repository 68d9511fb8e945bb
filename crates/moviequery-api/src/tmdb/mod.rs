//! TMDB API client module.
//!
//! Handles rate-limited HTTP requests to the TMDB API v3 endpoints
//! and retrieves movie, credit, person and genre data.

mod api;
mod client;
mod rate_limiter;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{TmdbClient, TmdbClientBuilder};
pub use rate_limiter::SlidingWindowLimiter;
#[allow(clippy::module_name_repetitions)]
pub use types::{
    DiscoverMovieParams, TmdbCastMember, TmdbCredits, TmdbCrewMember, TmdbErrorResponse,
    TmdbGenre, TmdbGenreList, TmdbMovieDetails, TmdbMovieListResponse, TmdbMovieSearchResult,
    TmdbPersonSearchResponse, TmdbPersonSearchResult,
};
