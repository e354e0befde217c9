//! Normalized output records.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{MediaError, Result};

/// Matches a `YYYY-MM-DD` date and captures the year.
#[allow(clippy::expect_used)]
static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})-\d{2}-\d{2}").expect("failed to compile date regex"));

/// Extracts the 4-digit year from a `YYYY-MM-DD` shaped string.
///
/// # Errors
///
/// Returns `ParseFailure` if the input contains no such date.
pub fn extract_year(date: &str) -> Result<String> {
    DATE_RE
        .captures(date)
        .and_then(|caps| caps.get(1))
        .map(|m| String::from(m.as_str()))
        .ok_or_else(|| MediaError::ParseFailure(format!("not a YYYY-MM-DD date: {date:?}")))
}

/// Genre reference; search results only carry the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Genre {
    /// Provider genre id.
    pub id: u32,
    /// Genre name, when the payload carried it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Common movie/series record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRecord {
    /// Provider id.
    pub id: u64,
    /// IMDB id, when known.
    #[serde(rename = "imdbID")]
    pub imdb_id: Option<String>,
    /// Title (or series name).
    pub title: String,
    /// Four-digit release year.
    pub year: String,
    /// Overview text.
    pub summary: Option<String>,
    /// Absolute poster URL.
    pub poster: Option<String>,
    /// Genres.
    pub genres: Vec<Genre>,
    /// Average vote.
    pub rating: Option<f64>,
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult<R> {
    /// Page number of this result set.
    pub current_page: u32,
    /// Total number of pages.
    pub total_pages: u32,
    /// Total number of matches.
    pub num_found: u32,
    /// Records on this page.
    pub results: Vec<R>,
}

impl<R> SearchResult<R> {
    /// Result with no matches.
    #[must_use]
    pub const fn empty(current_page: u32) -> Self {
        Self {
            current_page,
            total_pages: 0,
            num_found: 0,
            results: Vec::new(),
        }
    }
}
