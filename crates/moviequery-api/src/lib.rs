//! API client library for moviequery.
//!
//! Provides a rate-limited client for the TMDB API v3.

/// TMDB API client.
pub mod tmdb;
