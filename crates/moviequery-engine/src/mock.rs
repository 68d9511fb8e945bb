//! In-memory `LocalTmdbApi` used by unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU32, Ordering};

use anyhow::{Result, bail};
use moviequery_api::tmdb::{
    DiscoverMovieParams, LocalTmdbApi, TmdbCastMember, TmdbCredits, TmdbCrewMember, TmdbGenre,
    TmdbGenreList, TmdbMovieDetails, TmdbMovieListResponse, TmdbMovieSearchResult,
    TmdbPersonSearchResponse, TmdbPersonSearchResult,
};

/// Mock API backed by hash maps. Every method call bumps `calls`.
#[derive(Debug, Default)]
pub struct MockTmdbApi {
    title_searches: HashMap<String, Vec<(u64, String)>>,
    movies: HashMap<u64, (TmdbMovieDetails, TmdbCredits)>,
    people: HashMap<String, Vec<u64>>,
    cast_credits: HashMap<u64, Vec<u64>>,
    crew_credits: HashMap<u64, Vec<u64>>,
    genres: Vec<TmdbGenre>,
    genre_movies: HashMap<u32, Vec<u64>>,
    failing_movies: HashSet<u64>,
    fail_person_search: bool,
    pub calls: AtomicU32,
}

impl MockTmdbApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a movie with its details and credits.
    pub fn with_movie(
        mut self,
        id: u64,
        title: &str,
        genres: &[&str],
        directors: &[&str],
        cast: &[&str],
    ) -> Self {
        let details = TmdbMovieDetails {
            id,
            title: String::from(title),
            original_title: String::from(title),
            imdb_id: Some(format!("tt{id:07}")),
            genres: genres
                .iter()
                .zip(1..)
                .map(|(name, genre_id)| TmdbGenre {
                    id: genre_id,
                    name: String::from(*name),
                })
                .collect(),
            release_date: None,
            runtime: None,
            overview: None,
        };
        let mut crew: Vec<TmdbCrewMember> = Vec::new();
        for name in directors {
            crew.push(TmdbCrewMember {
                id: 1,
                name: String::from(*name),
                job: String::from("Director"),
                department: Some(String::from("Directing")),
            });
            crew.push(TmdbCrewMember {
                id: 1,
                name: String::from(*name),
                job: String::from("Producer"),
                department: Some(String::from("Production")),
            });
        }
        let credits = TmdbCredits {
            id,
            cast: cast
                .iter()
                .zip(0..)
                .map(|(name, order)| TmdbCastMember {
                    id: 1,
                    name: String::from(*name),
                    character: None,
                    order: Some(order),
                })
                .collect(),
            crew,
        };
        self.movies.insert(id, (details, credits));
        self
    }

    /// Registers the results of a `search/movie` query.
    pub fn with_title_search(mut self, query: &str, results: &[(u64, &str)]) -> Self {
        self.title_searches.insert(
            String::from(query),
            results
                .iter()
                .map(|(id, title)| (*id, String::from(*title)))
                .collect(),
        );
        self
    }

    /// Registers a person; repeated names produce several search results.
    pub fn with_person(mut self, name: &str, id: u64) -> Self {
        self.people.entry(String::from(name)).or_default().push(id);
        self
    }

    /// Registers the movies a person acted in.
    pub fn with_cast_credits(mut self, person_id: u64, movie_ids: &[u64]) -> Self {
        self.cast_credits.insert(person_id, movie_ids.to_vec());
        self
    }

    /// Registers the movies a person worked on as crew.
    pub fn with_crew_credits(mut self, person_id: u64, movie_ids: &[u64]) -> Self {
        self.crew_credits.insert(person_id, movie_ids.to_vec());
        self
    }

    /// Registers a genre and its movies.
    pub fn with_genre(mut self, id: u32, name: &str, movie_ids: &[u64]) -> Self {
        self.genres.push(TmdbGenre {
            id,
            name: String::from(name),
        });
        self.genre_movies.insert(id, movie_ids.to_vec());
        self
    }

    /// Makes detail requests for the movie fail.
    pub fn failing_movie(mut self, id: u64) -> Self {
        self.failing_movies.insert(id);
        self
    }

    /// Makes every person search fail.
    pub const fn failing_person_search(mut self) -> Self {
        self.fail_person_search = true;
        self
    }

    fn tick(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn movie_list(ids: &[u64]) -> TmdbMovieListResponse {
        TmdbMovieListResponse {
            page: 1,
            results: ids.iter().map(|&id| search_result(id, "")).collect(),
            total_pages: 1,
            total_results: u32::try_from(ids.len()).unwrap_or(u32::MAX),
        }
    }
}

fn search_result(id: u64, title: &str) -> TmdbMovieSearchResult {
    TmdbMovieSearchResult {
        id,
        title: String::from(title),
        original_title: String::from(title),
        release_date: None,
        overview: None,
        popularity: 0.0,
        genre_ids: Vec::new(),
    }
}

impl LocalTmdbApi for MockTmdbApi {
    async fn search_movie(&self, query: &str) -> Result<TmdbMovieListResponse> {
        self.tick();
        let results = self
            .title_searches
            .get(query)
            .map(|hits| {
                hits.iter()
                    .map(|(id, title)| search_result(*id, title))
                    .collect()
            })
            .unwrap_or_default();
        Ok(TmdbMovieListResponse {
            page: 1,
            results,
            total_pages: 1,
            total_results: 0,
        })
    }

    async fn movie_details(&self, movie_id: u64) -> Result<TmdbMovieDetails> {
        self.tick();
        if self.failing_movies.contains(&movie_id) {
            bail!("TMDB API error (HTTP 500 Internal Server Error): movie/{movie_id}");
        }
        match self.movies.get(&movie_id) {
            Some((details, _)) => Ok(details.clone()),
            None => bail!("TMDB API error (HTTP 404 Not Found): movie/{movie_id}"),
        }
    }

    async fn movie_credits(&self, movie_id: u64) -> Result<TmdbCredits> {
        self.tick();
        match self.movies.get(&movie_id) {
            Some((_, credits)) => Ok(credits.clone()),
            None => bail!("TMDB API error (HTTP 404 Not Found): movie/{movie_id}/credits"),
        }
    }

    async fn search_person(&self, query: &str) -> Result<TmdbPersonSearchResponse> {
        self.tick();
        if self.fail_person_search {
            bail!("TMDB API error (HTTP 503 Service Unavailable): search/person");
        }
        let results: Vec<TmdbPersonSearchResult> = self
            .people
            .get(query)
            .map(|ids| {
                ids.iter()
                    .map(|&id| TmdbPersonSearchResult {
                        id,
                        name: String::from(query),
                        known_for_department: None,
                        popularity: 0.0,
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(TmdbPersonSearchResponse {
            page: 1,
            total_results: u32::try_from(results.len()).unwrap_or(u32::MAX),
            results,
        })
    }

    async fn discover_movie(
        &self,
        params: &DiscoverMovieParams,
    ) -> Result<TmdbMovieListResponse> {
        self.tick();
        let ids = match (params.with_cast, params.with_crew) {
            (Some(person), _) => self.cast_credits.get(&person),
            (None, Some(person)) => self.crew_credits.get(&person),
            (None, None) => None,
        };
        Ok(Self::movie_list(ids.map_or(&[][..], Vec::as_slice)))
    }

    async fn genre_list(&self) -> Result<TmdbGenreList> {
        self.tick();
        Ok(TmdbGenreList {
            genres: self.genres.clone(),
        })
    }

    async fn genre_movies(&self, genre_id: u32) -> Result<TmdbMovieListResponse> {
        self.tick();
        let ids = self.genre_movies.get(&genre_id);
        Ok(Self::movie_list(ids.map_or(&[][..], Vec::as_slice)))
    }
}
