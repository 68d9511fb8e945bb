//! `TmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::types::{
    DiscoverMovieParams, TmdbCredits, TmdbGenreList, TmdbMovieDetails, TmdbMovieListResponse,
    TmdbPersonSearchResponse,
};

/// TMDB API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    /// Searches for movies by title (`search/movie`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn search_movie(&self, query: &str) -> Result<TmdbMovieListResponse>;

    /// Fetches movie details (`movie/{movie_id}`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_details(&self, movie_id: u64) -> Result<TmdbMovieDetails>;

    /// Fetches cast and crew of a movie (`movie/{movie_id}/credits`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_credits(&self, movie_id: u64) -> Result<TmdbCredits>;

    /// Searches for people by name (`search/person`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn search_person(&self, query: &str) -> Result<TmdbPersonSearchResponse>;

    /// Discovers movies matching cast/crew/genre filters (`discover/movie`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn discover_movie(&self, params: &DiscoverMovieParams)
    -> Result<TmdbMovieListResponse>;

    /// Fetches the movie genre taxonomy (`genre/movie/list`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn genre_list(&self) -> Result<TmdbGenreList>;

    /// Fetches movies of a genre (`genre/{genre_id}/movies`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn genre_movies(&self, genre_id: u32) -> Result<TmdbMovieListResponse>;
}
