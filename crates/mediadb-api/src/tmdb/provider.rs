//! TMDB provider capabilities.

use super::client::TmdbClient;
use super::translate::to_media_record;
use super::types::{TmdbErrorResponse, TmdbMediaKind, TmdbRawMedia};
use crate::error::Result;
use crate::http::HttpTransport;
use crate::provider::{Endpoint, KeyMap, Provider};
use crate::query::{MediaType, QueryField};
use crate::record::MediaRecord;

/// Common field to TMDB parameter mapping.
///
/// `query` is listed after `title` so it wins when both are set.
static TMDB_KEY_MAP: KeyMap = KeyMap::new(&[
    (QueryField::Title, "query"),
    (QueryField::Query, "query"),
    (QueryField::Page, "page"),
    (QueryField::Year, "primary_release_year"),
]);

/// The Movie Database, API v3.
#[derive(Debug, Clone, Copy)]
pub struct Tmdb;

impl Provider for Tmdb {
    type Raw = TmdbRawMedia;
    type Record = MediaRecord;
    type Client = TmdbClient;

    const NAME: &'static str = "TMDB";
    const AUTH_PARAM: &'static str = "api_key";
    const DEFAULT_BASE_URL: &'static str = "https://api.themoviedb.org/3/";

    fn key_map() -> &'static KeyMap {
        &TMDB_KEY_MAP
    }

    fn endpoint(endpoint: &Endpoint<'_>) -> String {
        match endpoint {
            Endpoint::Lookup(MediaType::Movie) => String::from("search/movie"),
            Endpoint::Lookup(MediaType::Series) => String::from("search/tv"),
            Endpoint::Search => String::from("search/multi"),
            Endpoint::Details(MediaType::Movie, id) => format!("movie/{id}"),
            Endpoint::Details(MediaType::Series, id) => format!("tv/{id}"),
            Endpoint::FindByImdbId(imdb_id) => format!("find/{imdb_id}"),
        }
    }

    fn translate_record(raw: &Self::Raw, media_type: MediaType) -> Result<Self::Record> {
        to_media_record(raw, TmdbMediaKind::from(media_type))
    }

    fn error_message(body: &str) -> Option<String> {
        serde_json::from_str::<TmdbErrorResponse>(body)
            .ok()
            .map(|e| e.status_message)
    }
}

impl From<HttpTransport<Tmdb>> for TmdbClient {
    fn from(transport: HttpTransport<Tmdb>) -> Self {
        Self::with_transport(transport)
    }
}
