//! Resolves ambiguous TMDB search results against a title and year.

use std::sync::LazyLock;

use regex::Regex;

use super::types::{TmdbMediaKind, TmdbRawMedia};
use crate::error::{MediaError, Result};
use crate::record::extract_year;

/// Separators folded into a space when normalizing candidate titles.
#[allow(clippy::expect_used)]
static SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[_\-.:]").expect("failed to compile separator regex"));

/// How strictly a candidate must match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Normalized title and year both equal.
    #[default]
    Exact,
    /// Title containment or loosely equal year.
    Fuzzy,
}

/// Lowercases a candidate title and replaces its first separator with a
/// space.
#[must_use]
pub fn normalize_candidate_title(title: &str) -> String {
    SEPARATOR_RE.replace(&title.to_lowercase(), " ").into_owned()
}

/// Year equality that tolerates `"2004"` vs `"02004"` style differences.
fn years_loosely_equal(candidate: &str, query: &str) -> bool {
    match (candidate.parse::<u32>(), query.parse::<u32>()) {
        (Ok(a), Ok(b)) => a == b,
        _ => candidate == query,
    }
}

/// Filters `candidates` down to those matching `title` and `year`.
///
/// Survivors keep provider order; callers take the first.
///
/// # Errors
///
/// Returns `ParseFailure` when a candidate lacks a title or carries a
/// non-date release date.
pub fn find_matches<'a>(
    candidates: &'a [TmdbRawMedia],
    title: &str,
    year: Option<&str>,
    kind: TmdbMediaKind,
    mode: MatchMode,
) -> Result<Vec<&'a TmdbRawMedia>> {
    let query_title = title.to_lowercase();
    let mut matches = Vec::new();

    for candidate in candidates {
        let candidate_title = candidate.title_for(kind).ok_or_else(|| {
            MediaError::ParseFailure(format!(
                "TMDB candidate {} has no `{}` field",
                candidate.id,
                kind.title_key()
            ))
        })?;
        let candidate_year = extract_year(candidate.date_for(kind).unwrap_or_default())?;
        let candidate_title = normalize_candidate_title(candidate_title);

        let matched = match mode {
            MatchMode::Exact => {
                candidate_title == query_title && year == Some(candidate_year.as_str())
            }
            MatchMode::Fuzzy => {
                candidate_title.contains(&query_title)
                    || year.is_some_and(|y| years_loosely_equal(&candidate_year, y))
            }
        };

        if matched {
            matches.push(candidate);
        }
    }

    tracing::debug!(
        candidates = candidates.len(),
        matches = matches.len(),
        ?mode,
        "resolved TMDB candidates"
    );
    Ok(matches)
}
