//! `TmdbClient` - TMDB API client implementation.

use tracing::instrument;

use super::matcher::{MatchMode, find_matches};
use super::provider::Tmdb;
use super::translate::to_search_result;
use super::types::{TmdbFindResponse, TmdbMediaKind, TmdbRawMedia, TmdbSearchResponse};
use crate::api::LocalMediaApi;
use crate::error::{MediaError, Result};
use crate::http::{ClientBuilder, HttpTransport};
use crate::provider::{Endpoint, Provider, RequestParams};
use crate::query::{MediaType, Query};
use crate::record::{MediaRecord, SearchResult};

/// TMDB API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// Authenticated transport.
    transport: HttpTransport<Tmdb>,
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> ClientBuilder<Tmdb> {
        ClientBuilder::new()
    }

    /// Creates a client for the public TMDB v3 endpoint.
    ///
    /// # Errors
    ///
    /// Returns `MissingCredential` if `api_key` is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    pub(crate) const fn with_transport(transport: HttpTransport<Tmdb>) -> Self {
        Self { transport }
    }

    /// Fetches full details of one movie or series.
    ///
    /// Series details also pull `external_ids` so the record carries the
    /// IMDB id.
    ///
    /// # Errors
    ///
    /// Returns `Transport` on request failures and `ParseFailure` when the
    /// details lack a title or a `YYYY-MM-DD` date.
    #[instrument(skip_all, fields(id = id, kind = ?kind))]
    pub async fn get_details(&self, id: u64, kind: TmdbMediaKind) -> Result<MediaRecord> {
        let media_type = MediaType::from(kind);
        let mut params = RequestParams::new();
        if kind == TmdbMediaKind::Tv {
            params.set("append_to_response", "external_ids");
        }

        let raw: TmdbRawMedia = self
            .transport
            .get_json(&Endpoint::Details(media_type, id), &params)
            .await?;
        Tmdb::translate_record(&raw, media_type)
    }

    /// Resolves an IMDB id to a TMDB id and kind through `find`.
    async fn find_by_imdb_id(&self, imdb_id: &str) -> Result<Option<(u64, TmdbMediaKind)>> {
        let mut params = RequestParams::new();
        params.set("external_source", "imdb_id");

        let response: TmdbFindResponse = self
            .transport
            .get_json(&Endpoint::FindByImdbId(imdb_id), &params)
            .await?;

        let Some(first) = response.first_match() else {
            tracing::debug!(imdb_id, "TMDB find returned no results");
            return Ok(None);
        };
        let kind = first.guess_kind().ok_or_else(|| {
            MediaError::ParseFailure(format!(
                "TMDB find result {} has neither `title` nor `name`",
                first.id
            ))
        })?;
        Ok(Some((first.id, kind)))
    }

    /// Resolves a title, year and type to a TMDB id through `search/movie`
    /// or `search/tv`.
    async fn find_by_title(&self, query: &Query) -> Result<Option<(u64, TmdbMediaKind)>> {
        let media_type = query.media_type_or_default();
        let kind = TmdbMediaKind::from(media_type);
        let title = query.title_value().unwrap_or_default();
        let year = query.year_value();

        let mut params = Tmdb::key_map().translate(query);
        params.set("include_adult", "false");
        params.set("page", "1");
        if media_type == MediaType::Series {
            params.remove("primary_release_year");
            if let Some(year) = year {
                params.set("first_air_date_year", year);
            }
        }

        let response: TmdbSearchResponse = self
            .transport
            .get_json(&Endpoint::Lookup(media_type), &params)
            .await?;

        let matches = find_matches(&response.results, title, year, kind, MatchMode::Exact)?;
        Ok(matches.first().map(|m| (m.id, kind)))
    }
}

impl LocalMediaApi for TmdbClient {
    type Record = MediaRecord;

    #[instrument(skip_all)]
    async fn get(&self, query: &Query) -> Result<Option<MediaRecord>> {
        query.ensure_identifiable()?;

        let resolved = if let Some(imdb_id) = query.imdb_id_value() {
            self.find_by_imdb_id(imdb_id).await?
        } else {
            self.find_by_title(query).await?
        };

        let Some((id, kind)) = resolved else {
            return Ok(None);
        };
        self.get_details(id, kind).await.map(Some)
    }

    #[instrument(skip_all)]
    async fn search(&self, query: &Query) -> Result<SearchResult<MediaRecord>> {
        query.ensure_searchable()?;

        let mut params = Tmdb::key_map().translate(query);
        params.set("include_adult", "false");

        let response: TmdbSearchResponse = self
            .transport
            .get_json(&Endpoint::Search, &params)
            .await?;
        to_search_result(&response, query.page.filter(|p| *p > 0))
    }

    async fn get_by_title_and_year(
        &self,
        title: &str,
        year: &str,
        media_type: MediaType,
    ) -> Result<Option<MediaRecord>> {
        self.get(&Query::by_title_and_year(title, year, media_type))
            .await
    }

    async fn get_by_imdb_id(&self, imdb_id: &str) -> Result<Option<MediaRecord>> {
        self.get(&Query::by_imdb_id(imdb_id)).await
    }
}
