//! Domain tags layered over `anyhow` errors.

use std::fmt;

/// Tag attached as context to errors leaving the engine.
///
/// Callers can recover it with `err.downcast_ref::<ErrorTag>()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorTag {
    /// An upstream request or its decoding failed.
    Api,
    /// A genre name did not match the TMDB taxonomy.
    UnknownGenre,
}

impl ErrorTag {
    /// Returns the tag string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Api => "API_ERROR",
            Self::UnknownGenre => "UNKNOWN_GENRE",
        }
    }
}

impl fmt::Display for ErrorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
