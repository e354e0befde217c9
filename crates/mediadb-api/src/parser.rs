//! Movie title and year extraction from file names.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{MediaError, Result};

/// `Title 2005`
#[allow(clippy::expect_used)]
static SPACE_FORMAT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(.+)\s(\d{4})").expect("failed to compile space format regex"));

/// `Title (2005)`
#[allow(clippy::expect_used)]
static BRACES_FORMAT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(.+)\s?\((\d{4})\)").expect("failed to compile braces format regex")
});

/// `Title.2005`
#[allow(clippy::expect_used)]
static DOT_FORMAT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([^.]+)\.(\d{4})").expect("failed to compile dot format regex")
});

/// Common video container extensions.
#[allow(clippy::expect_used)]
static VIDEO_EXTENSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.(mp4|mkv|avi|wmv|flv)").expect("failed to compile video extension regex")
});

/// Supported file name layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameFormat {
    /// `Batman Begins 2005`
    Space,
    /// `Batman Begins (2005)`
    #[default]
    Braces,
    /// `Batman Begins.2005`
    Dot,
}

impl NameFormat {
    fn regex(self) -> &'static Regex {
        match self {
            Self::Space => &SPACE_FORMAT_RE,
            Self::Braces => &BRACES_FORMAT_RE,
            Self::Dot => &DOT_FORMAT_RE,
        }
    }
}

/// Title and year taken from a file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedName {
    /// Movie title, trimmed.
    pub title: String,
    /// Four-digit year.
    pub year: String,
}

/// Extracts a movie title and year from `name` laid out as `format`.
///
/// # Errors
///
/// Returns `ParseFailure` if `name` does not match `format`.
pub fn parse_movie_name_and_year(name: &str, format: NameFormat) -> Result<ParsedName> {
    let caps = format.regex().captures(name).ok_or_else(|| {
        MediaError::ParseFailure(format!("movie info parsing failed: {name:?} ({format:?})"))
    })?;

    let title = caps.get(1).map_or("", |m| m.as_str().trim());
    let year = caps.get(2).map_or("", |m| m.as_str().trim());
    tracing::debug!(name, title, year, "parsed movie name");

    Ok(ParsedName {
        title: String::from(title),
        year: String::from(year),
    })
}

/// Removes the first video extension (`.mp4`, `.mkv`, `.avi`, `.wmv`, `.flv`).
#[must_use]
pub fn strip_video_extension(name: &str) -> String {
    VIDEO_EXTENSION_RE.replace(name, "").into_owned()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_parse_braces_format() {
        // Arrange & Act
        let parsed = parse_movie_name_and_year("Batman Begins (2005)", NameFormat::Braces).unwrap();

        // Assert
        assert_eq!(parsed.title, "Batman Begins");
        assert_eq!(parsed.year, "2005");
    }

    #[test]
    fn test_parse_space_format() {
        // Arrange & Act
        let parsed = parse_movie_name_and_year("Batman Begins 2005", NameFormat::Space).unwrap();

        // Assert
        assert_eq!(parsed.title, "Batman Begins");
        assert_eq!(parsed.year, "2005");
    }

    #[test]
    fn test_parse_dot_format() {
        // Arrange & Act
        let parsed = parse_movie_name_and_year("Saw.2004.1080p", NameFormat::Dot).unwrap();

        // Assert
        assert_eq!(parsed.title, "Saw");
        assert_eq!(parsed.year, "2004");
    }

    #[test]
    fn test_parse_without_year_fails() {
        // Arrange & Act
        let result = parse_movie_name_and_year("Batman Begins", NameFormat::Braces);

        // Assert
        assert!(matches!(result, Err(MediaError::ParseFailure(_))));
    }

    #[test]
    fn test_parse_format_mismatch_fails() {
        // Arrange & Act
        let result = parse_movie_name_and_year("Batman Begins 2005", NameFormat::Braces);

        // Assert
        assert!(matches!(result, Err(MediaError::ParseFailure(_))));
    }

    #[test]
    fn test_strip_video_extension() {
        // Arrange & Act & Assert
        assert_eq!(strip_video_extension("Saw (2004).mkv"), "Saw (2004)");
        assert_eq!(strip_video_extension("Saw.mp4.mp4"), "Saw.mp4");
        assert_eq!(strip_video_extension("Saw (2004)"), "Saw (2004)");
    }

    #[test]
    fn test_strip_then_parse() {
        // Arrange
        let name = strip_video_extension("Batman Begins (2005).avi");

        // Act
        let parsed = parse_movie_name_and_year(&name, NameFormat::Braces).unwrap();

        // Assert
        assert_eq!(parsed.title, "Batman Begins");
    }
}
