//! OMDb provider capabilities.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::client::OmdbClient;
use super::translate::{OmdbRecord, translate_object};
use crate::error::Result;
use crate::http::HttpTransport;
use crate::provider::{Endpoint, KeyMap, Provider};
use crate::query::{MediaType, QueryField};

/// Common field to OMDb parameter mapping.
static OMDB_KEY_MAP: KeyMap = KeyMap::new(&[
    (QueryField::Title, "t"),
    (QueryField::Query, "s"),
    (QueryField::Year, "y"),
    (QueryField::ImdbId, "i"),
    (QueryField::Plot, "plot"),
    (QueryField::Format, "r"),
    (QueryField::Type, "type"),
    (QueryField::Page, "page"),
]);

/// OMDb error body (`{"Response":"False","Error":"..."}`).
#[derive(Debug, Deserialize)]
struct OmdbErrorResponse {
    #[serde(rename = "Error")]
    error: String,
}

/// The Open Movie Database.
#[derive(Debug, Clone, Copy)]
pub struct Omdb;

impl Provider for Omdb {
    type Raw = Map<String, Value>;
    type Record = OmdbRecord;
    type Client = OmdbClient;

    const NAME: &'static str = "OMDb";
    const AUTH_PARAM: &'static str = "apikey";
    const DEFAULT_BASE_URL: &'static str = "http://www.omdbapi.com/";

    fn key_map() -> &'static KeyMap {
        &OMDB_KEY_MAP
    }

    /// OMDb serves everything from a single endpoint.
    fn endpoint(_endpoint: &Endpoint<'_>) -> String {
        String::new()
    }

    fn translate_record(raw: &Self::Raw, _media_type: MediaType) -> Result<Self::Record> {
        Ok(translate_object(raw))
    }

    fn error_message(body: &str) -> Option<String> {
        serde_json::from_str::<OmdbErrorResponse>(body)
            .ok()
            .map(|e| e.error)
    }
}

impl From<HttpTransport<Omdb>> for OmdbClient {
    fn from(transport: HttpTransport<Omdb>) -> Self {
        Self::with_transport(transport)
    }
}
