//! Authenticated GET transport shared by the provider clients.

use std::marker::PhantomData;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use crate::error::{MediaError, Result};
use crate::provider::{Endpoint, Provider, RequestParams};

/// Default User-Agent sent with every request.
const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// HTTP transport bound to one provider.
///
/// Owns the API key and base URL; both are fixed at construction.
#[derive(Debug)]
pub struct HttpTransport<P> {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// API key injected under `P::AUTH_PARAM`.
    api_key: String,
    _provider: PhantomData<P>,
}

/// Builder for a provider client.
#[derive(Debug)]
pub struct ClientBuilder<P> {
    base_url: Option<Url>,
    api_key: Option<String>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
    _provider: PhantomData<P>,
}

impl<P: Provider> ClientBuilder<P> {
    /// Creates a new builder.
    pub(crate) const fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            user_agent: None,
            timeout: None,
            _provider: PhantomData,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the User-Agent (default: `mediadb-api/<version>`).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets a per-request timeout (default: none).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `MissingCredential` if `api_key` is unset or empty.
    /// - `Transport` if the `reqwest::Client` fails to build.
    pub fn build(self) -> Result<P::Client> {
        self.build_transport().map(P::Client::from)
    }

    fn build_transport(self) -> Result<HttpTransport<P>> {
        let api_key = self
            .api_key
            .filter(|k| !k.is_empty())
            .ok_or(MediaError::MissingCredential { provider: P::NAME })?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            Url::parse(P::DEFAULT_BASE_URL).map_err(|e| {
                MediaError::InvalidArgument(format!("invalid default base URL: {e}"))
            })?
        };

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| String::from(DEFAULT_USER_AGENT));

        let mut builder = Client::builder().user_agent(&user_agent).gzip(true);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| MediaError::http("failed to build HTTP client", e))?;

        Ok(HttpTransport {
            http_client,
            base_url,
            api_key,
            _provider: PhantomData,
        })
    }
}

impl<P: Provider> HttpTransport<P> {
    /// Base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Sends a GET request with the API key appended and returns the body.
    ///
    /// # Errors
    ///
    /// Returns `Transport` on connection failures and non-success statuses.
    #[instrument(skip_all, fields(provider = P::NAME))]
    pub async fn get_text(&self, endpoint: &Endpoint<'_>, params: &RequestParams) -> Result<String> {
        let path = P::endpoint(endpoint);
        let url = self
            .base_url
            .join(&path)
            .map_err(|e| MediaError::InvalidArgument(format!("failed to join URL path {path}: {e}")))?;

        let request = self
            .http_client
            .get(url)
            .query(params.as_slice())
            .query(&[(P::AUTH_PARAM, self.api_key.as_str())])
            .build()
            .map_err(|e| MediaError::http(&format!("failed to build request: {path}"), e))?;

        tracing::debug!(path = %path, params = ?params.as_slice(), "{} API request", P::NAME);

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|e| MediaError::http(&format!("request failed: {path}"), e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            if let Some(message) = P::error_message(&body) {
                return Err(MediaError::transport(format!(
                    "{} API error (HTTP {status}): {message}",
                    P::NAME
                )));
            }
            return Err(MediaError::transport(format!(
                "{} API error (HTTP {status}): {body}",
                P::NAME
            )));
        }

        response
            .text()
            .await
            .map_err(|e| MediaError::http(&format!("failed to read response body: {path}"), e))
    }

    /// Sends a GET request and decodes the JSON body.
    ///
    /// # Errors
    ///
    /// Returns `Transport` on request failures and `ParseFailure` when the
    /// body is not the expected JSON.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint<'_>,
        params: &RequestParams,
    ) -> Result<T> {
        let body = self.get_text(endpoint, params).await?;
        serde_json::from_str(&body).map_err(|e| {
            MediaError::ParseFailure(format!(
                "failed to decode {} JSON response: {e}",
                P::NAME
            ))
        })
    }
}
