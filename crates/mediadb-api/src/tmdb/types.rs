//! TMDB API response types.

use serde::Deserialize;

use crate::query::MediaType;

/// TMDB resource family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TmdbMediaKind {
    /// `movie` resources.
    Movie,
    /// `tv` resources.
    Tv,
}

impl TmdbMediaKind {
    /// Resolves a `media_type` value from `search/multi`.
    #[must_use]
    pub fn from_media_type_field(value: &str) -> Option<Self> {
        match value {
            "movie" => Some(Self::Movie),
            "tv" => Some(Self::Tv),
            _ => None,
        }
    }

    /// Field carrying the title for this kind.
    #[must_use]
    pub const fn title_key(self) -> &'static str {
        match self {
            Self::Movie => "title",
            Self::Tv => "name",
        }
    }

    /// Field carrying the release date for this kind.
    #[must_use]
    pub const fn date_key(self) -> &'static str {
        match self {
            Self::Movie => "release_date",
            Self::Tv => "first_air_date",
        }
    }
}

impl From<MediaType> for TmdbMediaKind {
    fn from(media_type: MediaType) -> Self {
        match media_type {
            MediaType::Movie => Self::Movie,
            MediaType::Series => Self::Tv,
        }
    }
}

impl From<TmdbMediaKind> for MediaType {
    fn from(kind: TmdbMediaKind) -> Self {
        match kind {
            TmdbMediaKind::Movie => Self::Movie,
            TmdbMediaKind::Tv => Self::Series,
        }
    }
}

/// Any movie or TV object TMDB returns: search entries, `find` entries,
/// and detail responses all fit this shape.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbRawMedia {
    /// TMDB id.
    pub id: u64,
    /// IMDB id (movie details only).
    #[serde(default)]
    pub imdb_id: Option<String>,
    /// Movie title.
    #[serde(default)]
    pub title: Option<String>,
    /// TV series name.
    #[serde(default)]
    pub name: Option<String>,
    /// Movie release date (YYYY-MM-DD).
    #[serde(default)]
    pub release_date: Option<String>,
    /// TV first air date (YYYY-MM-DD).
    #[serde(default)]
    pub first_air_date: Option<String>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Full genre objects (details).
    #[serde(default)]
    pub genres: Option<Vec<TmdbGenre>>,
    /// Genre ids (search results).
    #[serde(default)]
    pub genre_ids: Option<Vec<u32>>,
    /// Vote average.
    #[serde(default)]
    pub vote_average: Option<f64>,
    /// `movie`, `tv` or `person` (`search/multi` only).
    #[serde(default)]
    pub media_type: Option<String>,
    /// External ids (`append_to_response=external_ids`).
    #[serde(default)]
    pub external_ids: Option<TmdbExternalIds>,
}

impl TmdbRawMedia {
    /// Title for the given kind (`title` or `name`).
    #[must_use]
    pub fn title_for(&self, kind: TmdbMediaKind) -> Option<&str> {
        match kind {
            TmdbMediaKind::Movie => self.title.as_deref(),
            TmdbMediaKind::Tv => self.name.as_deref(),
        }
    }

    /// Date for the given kind (`release_date` or `first_air_date`).
    #[must_use]
    pub fn date_for(&self, kind: TmdbMediaKind) -> Option<&str> {
        match kind {
            TmdbMediaKind::Movie => self.release_date.as_deref(),
            TmdbMediaKind::Tv => self.first_air_date.as_deref(),
        }
    }

    /// Guesses the kind from which title field is present.
    #[must_use]
    pub fn guess_kind(&self) -> Option<TmdbMediaKind> {
        if self.name.as_deref().is_some_and(|n| !n.is_empty()) {
            Some(TmdbMediaKind::Tv)
        } else if self.title.as_deref().is_some_and(|t| !t.is_empty()) {
            Some(TmdbMediaKind::Movie)
        } else {
            None
        }
    }
}

/// Genre entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

/// External ids of a TV series.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbExternalIds {
    /// IMDB id.
    #[serde(default)]
    pub imdb_id: Option<String>,
}

/// Response from the `search/*` endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSearchResponse {
    /// Current page number.
    pub page: u32,
    /// Search results.
    pub results: Vec<TmdbRawMedia>,
    /// Total number of pages.
    pub total_pages: u32,
    /// Total number of results.
    pub total_results: u32,
}

/// Response from `find/{external_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbFindResponse {
    /// Matching movies.
    #[serde(default)]
    pub movie_results: Vec<TmdbRawMedia>,
    /// Matching TV series.
    #[serde(default)]
    pub tv_results: Vec<TmdbRawMedia>,
}

impl TmdbFindResponse {
    /// First entry of the first non-empty result list.
    #[must_use]
    pub fn first_match(&self) -> Option<&TmdbRawMedia> {
        self.movie_results
            .first()
            .or_else(|| self.tv_results.first())
    }
}

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
}
