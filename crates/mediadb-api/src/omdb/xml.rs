//! OMDb XML bodies (`r=xml`) decoded into the JSON payload shape.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{MediaError, Result};

/// `<root>` element of an OMDb XML response.
#[derive(Debug, Deserialize)]
#[serde(rename = "root")]
struct OmdbXmlRoot {
    /// `True` or `False`.
    #[serde(rename = "@response", default)]
    response: Option<String>,
    /// Total match count on search responses.
    #[serde(rename = "@totalResults", default)]
    total_results: Option<String>,
    /// Single-item responses.
    #[serde(rename = "movie", default)]
    movies: Vec<BTreeMap<String, String>>,
    /// Search responses.
    #[serde(rename = "result", default)]
    results: Vec<BTreeMap<String, String>>,
    /// Error text when `response` is `False`.
    #[serde(default)]
    error: Option<String>,
}

/// Turns `@attr` keys into a JSON object.
fn attributes_to_object(attrs: BTreeMap<String, String>) -> Map<String, Value> {
    attrs
        .into_iter()
        .map(|(key, value)| {
            let key = key.strip_prefix('@').map_or_else(|| key.clone(), String::from);
            (key, Value::String(value))
        })
        .collect()
}

/// Decodes an OMDb XML body into the object the JSON API would return.
///
/// # Errors
///
/// Returns `ParseFailure` if the body is not OMDb XML.
pub fn decode(body: &str) -> Result<Map<String, Value>> {
    let root: OmdbXmlRoot = quick_xml::de::from_str(body)
        .map_err(|e| MediaError::ParseFailure(format!("failed to decode OMDb XML response: {e}")))?;

    let mut payload = Map::new();
    if let Some(movie) = root.movies.into_iter().next() {
        payload.extend(attributes_to_object(movie));
    }
    if !root.results.is_empty() {
        let entries = root
            .results
            .into_iter()
            .map(|attrs| Value::Object(attributes_to_object(attrs)))
            .collect();
        payload.insert(String::from("Search"), Value::Array(entries));
    }
    if let Some(total) = root.total_results {
        payload.insert(String::from("totalResults"), Value::String(total));
    }
    if let Some(error) = root.error {
        payload.insert(String::from("Error"), Value::String(error));
    }
    if let Some(response) = root.response {
        payload.insert(String::from("Response"), Value::String(response));
    }
    Ok(payload)
}
