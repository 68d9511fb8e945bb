//! Movie stubs, enriched records and the caller-facing projection.

use moviequery_api::tmdb::TmdbMovieSearchResult;
use serde::Serialize;

/// Provenance tag of every record.
pub const SOURCE_TAG: &str = "themoviedb";

/// Media kind of every record.
pub const MEDIA_TYPE: &str = "video";

/// Movie/series discriminator; series are not searched.
pub const MOVIE_OR_SERIES: &str = "movie";

/// IMDb title page prefix used for canonical links.
const IMDB_TITLE_URL: &str = "http://www.imdb.com/title/";

/// Minimal movie reference returned by search/discover endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MovieStub {
    /// TMDB movie ID.
    pub id: u64,
}

impl MovieStub {
    /// Creates a stub for the given TMDB movie ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self { id }
    }
}

impl From<&TmdbMovieSearchResult> for MovieStub {
    fn from(result: &TmdbMovieSearchResult) -> Self {
        Self::new(result.id)
    }
}

/// Attribute group of a movie record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieAttributes {
    /// Genre names.
    pub genre: Vec<String>,
    /// Director names, in upstream crew order.
    pub director: Vec<String>,
    /// Cast names, in billing order.
    pub cast: Vec<String>,
    /// Always `"movie"`.
    pub movie_or_series: &'static str,
}

/// Enriched movie record.
///
/// The TMDB id is kept for deduplication and intersection only; it is
/// dropped by [`MovieRecord::into_movie`] before results leave the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieRecord {
    id: u64,
    /// Localized title.
    pub name: String,
    /// Canonical link.
    pub url: Option<String>,
    /// Canonical web link.
    pub web_url: Option<String>,
    /// Provenance tag.
    pub source: &'static str,
    /// Media kind.
    pub media_type: &'static str,
    /// Free-form tags, empty at construction.
    pub tags: Vec<String>,
    /// Genre, director and cast lists.
    pub attributes: MovieAttributes,
}

impl MovieRecord {
    /// Creates a record with empty attribute lists and no links.
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            url: None,
            web_url: None,
            source: SOURCE_TAG,
            media_type: MEDIA_TYPE,
            tags: Vec::new(),
            attributes: MovieAttributes {
                genre: Vec::new(),
                director: Vec::new(),
                cast: Vec::new(),
                movie_or_series: MOVIE_OR_SERIES,
            },
        }
    }

    /// Returns the internal TMDB id.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Sets `url` and `web_url` from an IMDb id.
    pub fn set_imdb_links(&mut self, imdb_id: &str) {
        let link = format!("{IMDB_TITLE_URL}{imdb_id}");
        self.web_url = Some(link.clone());
        self.url = Some(link);
    }

    /// Converts into the caller-facing projection, dropping the id.
    #[must_use]
    pub fn into_movie(self) -> Movie {
        Movie {
            name: self.name,
            url: self.url,
            web_url: self.web_url,
            source: self.source,
            media_type: self.media_type,
            tags: self.tags,
            attributes: self.attributes,
        }
    }
}

/// Caller-facing movie record, without the internal id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    /// Localized title.
    pub name: String,
    /// Canonical link.
    pub url: Option<String>,
    /// Canonical web link.
    pub web_url: Option<String>,
    /// Provenance tag.
    pub source: &'static str,
    /// Media kind.
    #[serde(rename = "type")]
    pub media_type: &'static str,
    /// Free-form tags.
    pub tags: Vec<String>,
    /// Genre, director and cast lists.
    pub attributes: MovieAttributes,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_new_record_has_fixed_tags() {
        // Arrange & Act
        let record = MovieRecord::new(218, "The Terminator");

        // Assert
        assert_eq!(record.id(), 218);
        assert_eq!(record.source, "themoviedb");
        assert_eq!(record.media_type, "video");
        assert_eq!(record.attributes.movie_or_series, "movie");
        assert!(record.tags.is_empty());
        assert!(record.url.is_none());
    }

    #[test]
    fn test_imdb_links() {
        // Arrange
        let mut record = MovieRecord::new(218, "The Terminator");

        // Act
        record.set_imdb_links("tt0088247");

        // Assert
        assert_eq!(
            record.url.as_deref(),
            Some("http://www.imdb.com/title/tt0088247")
        );
        assert_eq!(record.web_url, record.url);
    }

    #[test]
    fn test_movie_json_has_no_id() {
        // Arrange
        let mut record = MovieRecord::new(218, "The Terminator");
        record.attributes.director.push(String::from("James Cameron"));

        // Act
        let json = serde_json::to_value(record.into_movie()).unwrap();

        // Assert
        assert!(json.get("id").is_none());
        assert_eq!(json["type"], "video");
        assert_eq!(json["webUrl"], serde_json::Value::Null);
        assert_eq!(json["attributes"]["movieOrSeries"], "movie");
        assert_eq!(json["attributes"]["director"][0], "James Cameron");
    }
}
