//! `OmdbClient` - OMDb API client implementation.

use serde_json::{Map, Value};
use tracing::instrument;

use super::provider::Omdb;
use super::translate::{OmdbPayload, OmdbRecord, translate_payload};
use super::xml;
use crate::api::LocalMediaApi;
use crate::error::{MediaError, Result};
use crate::http::{ClientBuilder, HttpTransport};
use crate::provider::{Endpoint, Provider, RequestParams};
use crate::query::{MediaType, Plot, Query, ResponseFormat};
use crate::record::SearchResult;

/// Number of entries OMDb returns per search page.
const OMDB_PAGE_SIZE: u32 = 10;

/// OMDb API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct OmdbClient {
    /// Authenticated transport.
    transport: HttpTransport<Omdb>,
}

impl OmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> ClientBuilder<Omdb> {
        ClientBuilder::new()
    }

    /// Creates a client for the public OMDb endpoint.
    ///
    /// # Errors
    ///
    /// Returns `MissingCredential` if `api_key` is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    pub(crate) const fn with_transport(transport: HttpTransport<Omdb>) -> Self {
        Self { transport }
    }

    /// Translates a query and applies OMDb's defaults (`plot=full`, `r=json`).
    fn request_params(query: &Query) -> RequestParams {
        let mut params = Omdb::key_map().translate(query);
        params.set_default("plot", Plot::Full.as_str());
        params.set_default("r", ResponseFormat::Json.as_str());
        params
    }

    /// Sends one request and translates the payload.
    ///
    /// `Search` lists go through [`translate_payload`]; every other body is a
    /// single object and goes through [`Omdb::translate_record`].
    async fn fetch(
        &self,
        endpoint: &Endpoint<'_>,
        params: &RequestParams,
        media_type: MediaType,
    ) -> Result<OmdbPayload> {
        let body = self.transport.get_text(endpoint, params).await?;

        let raw: Map<String, Value> = if params.get("r") == Some(ResponseFormat::Xml.as_str()) {
            xml::decode(&body)?
        } else {
            serde_json::from_str(&body).map_err(|e| {
                MediaError::ParseFailure(format!("failed to decode OMDb JSON response: {e}"))
            })?
        };

        match raw.get("Search") {
            Some(Value::Array(_)) => translate_payload(&raw),
            _ => Omdb::translate_record(&raw, media_type).map(OmdbPayload::Single),
        }
    }
}

impl LocalMediaApi for OmdbClient {
    type Record = OmdbRecord;

    #[instrument(skip_all)]
    async fn get(&self, query: &Query) -> Result<Option<OmdbRecord>> {
        query.ensure_identifiable()?;

        let media_type = query.media_type_or_default();
        let endpoint = query
            .imdb_id_value()
            .map_or(Endpoint::Lookup(media_type), Endpoint::FindByImdbId);
        let params = Self::request_params(query);

        match self.fetch(&endpoint, &params, media_type).await? {
            OmdbPayload::Single(record) if record.is_error_response() => {
                tracing::debug!(
                    error = record.error_text().unwrap_or("-"),
                    "OMDb returned no match"
                );
                Ok(None)
            }
            OmdbPayload::Single(record) => Ok(Some(record)),
            OmdbPayload::List { records, .. } => Ok(records.into_iter().next()),
        }
    }

    #[instrument(skip_all)]
    async fn search(&self, query: &Query) -> Result<SearchResult<OmdbRecord>> {
        query.ensure_searchable()?;

        let current_page = query.page.filter(|p| *p > 0).unwrap_or(1);
        let params = Self::request_params(query);

        let (records, total_results) = match self
            .fetch(&Endpoint::Search, &params, query.media_type_or_default())
            .await?
        {
            OmdbPayload::List {
                records,
                total_results,
            } => (records, total_results),
            OmdbPayload::Single(record) if record.is_error_response() => {
                tracing::debug!(
                    error = record.error_text().unwrap_or("-"),
                    "OMDb search returned no results"
                );
                return Ok(SearchResult::empty(current_page));
            }
            OmdbPayload::Single(record) => (vec![record], None),
        };

        let num_found = total_results
            .unwrap_or_else(|| u32::try_from(records.len()).unwrap_or(u32::MAX));

        Ok(SearchResult {
            current_page,
            total_pages: num_found.div_ceil(OMDB_PAGE_SIZE),
            num_found,
            results: records,
        })
    }

    async fn get_by_title_and_year(
        &self,
        title: &str,
        year: &str,
        media_type: MediaType,
    ) -> Result<Option<OmdbRecord>> {
        let query = Query::by_title_and_year(title, year, media_type)
            .format(ResponseFormat::Json)
            .plot(Plot::Short);
        self.get(&query).await
    }

    async fn get_by_imdb_id(&self, imdb_id: &str) -> Result<Option<OmdbRecord>> {
        let query = Query::by_imdb_id(imdb_id)
            .format(ResponseFormat::Json)
            .plot(Plot::Short);
        self.get(&query).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    fn client_for(mock_server: &wiremock::MockServer) -> OmdbClient {
        OmdbClient::builder()
            .base_url(format!("{}/", mock_server.uri()).parse().unwrap())
            .api_key("test-key")
            .build()
            .unwrap()
    }

    #[test]
    fn test_new_requires_api_key() {
        // Arrange & Act
        let result = OmdbClient::new("");

        // Assert
        assert!(matches!(result, Err(MediaError::MissingCredential { .. })));
    }

    #[test]
    fn test_request_params_apply_defaults() {
        // Arrange
        let query = Query::by_title_and_year("Saw", "2004", MediaType::Movie);

        // Act
        let params = OmdbClient::request_params(&query);

        // Assert
        assert_eq!(params.get("t"), Some("Saw"));
        assert_eq!(params.get("y"), Some("2004"));
        assert_eq!(params.get("type"), Some("movie"));
        assert_eq!(params.get("plot"), Some("full"));
        assert_eq!(params.get("r"), Some("json"));
    }

    #[test]
    fn test_request_params_keep_explicit_plot_and_format() {
        // Arrange
        let query = Query::by_imdb_id("tt0387564")
            .plot(Plot::Short)
            .format(ResponseFormat::Xml);

        // Act
        let params = OmdbClient::request_params(&query);

        // Assert
        assert_eq!(params.get("i"), Some("tt0387564"));
        assert_eq!(params.get("plot"), Some("short"));
        assert_eq!(params.get("r"), Some("xml"));
    }

    #[tokio::test]
    async fn test_get_without_identifier_makes_no_request() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::any())
            .respond_with(wiremock::ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;
        let client = client_for(&mock_server);
        let query = Query::new().title("Saw").year("2004");

        // Act
        let result = client.get(&query).await;

        // Assert
        assert!(matches!(result, Err(MediaError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_search_without_query_makes_no_request() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::any())
            .respond_with(wiremock::ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;
        let client = client_for(&mock_server);

        // Act
        let result = client.search(&Query::new().year("2004")).await;

        // Assert
        assert!(matches!(result, Err(MediaError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_get_by_imdb_id_via_http() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/omdb/title_saw.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/"))
            .and(wiremock::matchers::query_param("i", "tt0387564"))
            .and(wiremock::matchers::query_param("plot", "short"))
            .and(wiremock::matchers::query_param("r", "json"))
            .and(wiremock::matchers::query_param("apikey", "test-key"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;
        let client = client_for(&mock_server);

        // Act
        let record = client.get_by_imdb_id("tt0387564").await.unwrap().unwrap();

        // Assert
        assert_eq!(record.imdb_id(), Some("tt0387564"));
        assert_eq!(record.title(), Some("Saw"));
        assert_eq!(record.str_field("boxOffice"), Some("$55,968,727"));
        assert!(record.get("Title").is_none());
    }

    #[tokio::test]
    async fn test_get_by_imdb_id_not_found_returns_none() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/omdb/not_found.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;
        let client = client_for(&mock_server);

        // Act
        let record = client.get_by_imdb_id("tt0000001").await.unwrap();

        // Assert
        assert!(record.is_none());
    }

    #[tokio::test]
    async fn test_get_by_title_and_year_normalizes_keys() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/omdb/title_lost.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::query_param("t", "Lost"))
            .and(wiremock::matchers::query_param("y", "2004"))
            .and(wiremock::matchers::query_param("type", "series"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .mount(&mock_server)
            .await;
        let client = client_for(&mock_server);

        // Act
        let record = client
            .get_by_title_and_year("Lost", "2004", MediaType::Series)
            .await
            .unwrap()
            .unwrap();

        // Assert
        assert_eq!(record.str_field("totalSeasons"), Some("6"));
        assert_eq!(record.str_field("type"), Some("series"));
    }

    #[tokio::test]
    async fn test_get_xml_format() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let xml_body = include_str!("../../../../fixtures/omdb/title_saw.xml");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::query_param("r", "xml"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(xml_body))
            .mount(&mock_server)
            .await;
        let client = client_for(&mock_server);
        let query = Query::by_imdb_id("tt0387564").format(ResponseFormat::Xml);

        // Act
        let record = client.get(&query).await.unwrap().unwrap();

        // Assert
        assert_eq!(record.title(), Some("Saw"));
        assert_eq!(record.str_field("imdbRating"), Some("7.6"));
    }

    #[tokio::test]
    async fn test_search_via_http() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/omdb/search_saw.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::query_param("s", "saw"))
            .and(wiremock::matchers::query_param("page", "2"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;
        let client = client_for(&mock_server);

        // Act
        let page = client
            .search(&Query::search("saw").page(2))
            .await
            .unwrap();

        // Assert
        assert_eq!(page.current_page, 2);
        assert_eq!(page.num_found, 23);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.results.len(), 3);
        assert_eq!(page.results[1].title(), Some("Saw II"));
    }

    #[tokio::test]
    async fn test_search_xml_format() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let xml_body = include_str!("../../../../fixtures/omdb/search_saw.xml");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(xml_body))
            .mount(&mock_server)
            .await;
        let client = client_for(&mock_server);
        let query = Query::search("saw").format(ResponseFormat::Xml);

        // Act
        let page = client.search(&query).await.unwrap();

        // Assert
        assert_eq!(page.current_page, 1);
        assert_eq!(page.num_found, 2);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.results[0].imdb_id(), Some("tt0387564"));
    }

    #[tokio::test]
    async fn test_search_no_results_is_empty_page() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/omdb/not_found.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .mount(&mock_server)
            .await;
        let client = client_for(&mock_server);

        // Act
        let page = client.search(&Query::search("zzzzzz")).await.unwrap();

        // Assert
        assert_eq!(page.num_found, 0);
        assert!(page.results.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_api_key_is_transport_failure() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(
                wiremock::ResponseTemplate::new(401)
                    .set_body_string(r#"{"Response":"False","Error":"Invalid API key!"}"#),
            )
            .mount(&mock_server)
            .await;
        let client = client_for(&mock_server);

        // Act
        let result = client.get_by_imdb_id("tt0387564").await;

        // Assert
        let err = result.unwrap_err();
        assert!(matches!(err, MediaError::Transport { .. }));
        assert!(err.to_string().contains("Invalid API key!"));
    }
}
