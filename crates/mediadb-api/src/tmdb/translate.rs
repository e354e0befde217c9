//! TMDB objects to [`MediaRecord`].

use super::types::{TmdbMediaKind, TmdbRawMedia, TmdbSearchResponse};
use crate::error::{MediaError, Result};
use crate::record::{Genre, MediaRecord, SearchResult, extract_year};

/// Prefix for `poster_path` values.
pub const IMAGE_BASE_URL: &str = "http://image.tmdb.org/t/p/original";

/// Builds a record from a raw TMDB object of the given kind.
///
/// # Errors
///
/// Returns `ParseFailure` if the title is missing or the date is missing or
/// not `YYYY-MM-DD`.
pub fn to_media_record(raw: &TmdbRawMedia, kind: TmdbMediaKind) -> Result<MediaRecord> {
    let title = raw.title_for(kind).ok_or_else(|| {
        MediaError::ParseFailure(format!(
            "TMDB item {} has no `{}` field",
            raw.id,
            kind.title_key()
        ))
    })?;
    let date = raw.date_for(kind).ok_or_else(|| {
        MediaError::ParseFailure(format!(
            "TMDB item {} has no `{}` field",
            raw.id,
            kind.date_key()
        ))
    })?;

    let imdb_id = raw
        .imdb_id
        .clone()
        .or_else(|| raw.external_ids.as_ref().and_then(|ids| ids.imdb_id.clone()))
        .filter(|id| !id.is_empty());

    Ok(MediaRecord {
        id: raw.id,
        imdb_id,
        title: String::from(title),
        year: extract_year(date)?,
        summary: raw.overview.clone(),
        poster: raw
            .poster_path
            .as_deref()
            .map(|path| format!("{IMAGE_BASE_URL}{path}")),
        genres: genres_of(raw),
        rating: raw.vote_average,
    })
}

/// Genre objects when present, otherwise bare ids.
fn genres_of(raw: &TmdbRawMedia) -> Vec<Genre> {
    if let Some(genres) = &raw.genres {
        return genres
            .iter()
            .map(|g| Genre {
                id: g.id,
                name: Some(g.name.clone()),
            })
            .collect();
    }
    raw.genre_ids
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|&id| Genre { id, name: None })
        .collect()
}

/// Translates a `search/multi` page, skipping entries that are neither
/// movies nor TV series.
///
/// # Errors
///
/// Returns `ParseFailure` if a movie or TV entry cannot be translated.
pub fn to_search_result(
    response: &TmdbSearchResponse,
    current_page: Option<u32>,
) -> Result<SearchResult<MediaRecord>> {
    let mut results = Vec::with_capacity(response.results.len());
    for item in &response.results {
        let media_type = item.media_type.as_deref().unwrap_or_default();
        let Some(kind) = TmdbMediaKind::from_media_type_field(media_type) else {
            tracing::debug!(id = item.id, media_type, "skipping non-media search result");
            continue;
        };
        results.push(to_media_record(item, kind)?);
    }

    Ok(SearchResult {
        current_page: current_page.unwrap_or(response.page),
        total_pages: response.total_pages,
        num_found: response.total_results,
        results,
    })
}
