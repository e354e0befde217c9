//! OMDb response translation: top-level keys are camelCased, values kept.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{MediaError, Result};

/// Leading capital, or a separator followed by a word character.
#[allow(clippy::expect_used)]
static CAMEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z])|[\s\-_](\w)").expect("failed to compile camelCase regex")
});

/// Converts `Big Bang`, `BigBang`, `big-bang`, `big_bang` to `bigBang`.
#[must_use]
pub fn to_camel_case(key: &str) -> String {
    CAMEL_RE
        .replace_all(key, |caps: &Captures<'_>| {
            caps.get(2).map_or_else(
                || caps.get(1).map_or_else(String::new, |m| m.as_str().to_lowercase()),
                |m| m.as_str().to_uppercase(),
            )
        })
        .into_owned()
}

/// One OMDb item with camelCased keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct OmdbRecord(Map<String, Value>);

impl OmdbRecord {
    /// Value of a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String value of a key.
    #[must_use]
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// `title` field.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.str_field("title")
    }

    /// `year` field.
    #[must_use]
    pub fn year(&self) -> Option<&str> {
        self.str_field("year")
    }

    /// `imdbID` field.
    #[must_use]
    pub fn imdb_id(&self) -> Option<&str> {
        self.str_field("imdbID")
    }

    /// Whether this is OMDb's `Response: "False"` envelope.
    #[must_use]
    pub fn is_error_response(&self) -> bool {
        self.str_field("response") == Some("False")
    }

    /// Error text of a `Response: "False"` envelope.
    #[must_use]
    pub fn error_text(&self) -> Option<&str> {
        self.str_field("error")
    }

    /// Keys and values.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Translated OMDb payload.
#[derive(Debug, Clone, PartialEq)]
pub enum OmdbPayload {
    /// Payload carried a `Search` list.
    List {
        /// Translated list entries.
        records: Vec<OmdbRecord>,
        /// `totalResults`, when present and numeric.
        total_results: Option<u32>,
    },
    /// Payload was a single object.
    Single(OmdbRecord),
}

/// camelCases every top-level key of an object.
#[must_use]
pub fn translate_object(raw: &Map<String, Value>) -> OmdbRecord {
    OmdbRecord(
        raw.iter()
            .map(|(key, value)| (to_camel_case(key), value.clone()))
            .collect(),
    )
}

/// Translates a full OMDb payload.
///
/// # Errors
///
/// Returns `ParseFailure` when a `Search` entry is not an object.
pub fn translate_payload(raw: &Map<String, Value>) -> Result<OmdbPayload> {
    let Some(Value::Array(entries)) = raw.get("Search") else {
        return Ok(OmdbPayload::Single(translate_object(raw)));
    };

    let records = entries
        .iter()
        .map(|entry| {
            entry.as_object().map(translate_object).ok_or_else(|| {
                MediaError::ParseFailure(String::from("OMDb Search entry is not an object"))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let total_results = raw.get("totalResults").and_then(|v| match v {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        _ => None,
    });

    Ok(OmdbPayload::List {
        records,
        total_results,
    })
}
