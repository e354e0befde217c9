//! Per-provider capabilities: auth parameter, key map, endpoints and
//! response translation.

use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http::HttpTransport;
use crate::query::{MediaType, Query, QueryField};

/// Static mapping from common query fields to provider parameter names.
#[derive(Debug)]
pub struct KeyMap {
    entries: &'static [(QueryField, &'static str)],
}

impl KeyMap {
    /// Creates a key map from `(field, parameter)` pairs.
    #[must_use]
    pub const fn new(entries: &'static [(QueryField, &'static str)]) -> Self {
        Self { entries }
    }

    /// Provider parameter name for a common field.
    #[must_use]
    pub fn param_name(&self, field: QueryField) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, name)| *name)
    }

    /// Translates a query into provider parameters.
    ///
    /// Only fields present in both the query and the map survive; when two
    /// fields map to the same parameter the later one wins.
    #[must_use]
    pub fn translate(&self, query: &Query) -> RequestParams {
        let mut params = RequestParams::new();
        for (field, value) in query.fields() {
            if let Some(name) = self.param_name(field) {
                params.set(name, value);
            }
        }
        params
    }
}

/// Ordered list of query parameters with unique names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    pairs: Vec<(&'static str, String)>,
}

impl RequestParams {
    /// Creates an empty parameter list.
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Sets a parameter, replacing any previous value.
    pub fn set(&mut self, name: &'static str, value: impl Into<String>) {
        let value = value.into();
        if let Some(slot) = self.pairs.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.pairs.push((name, value));
        }
    }

    /// Sets a parameter only if it is not present yet.
    pub fn set_default(&mut self, name: &'static str, value: impl Into<String>) {
        if self.get(name).is_none() {
            self.pairs.push((name, value.into()));
        }
    }

    /// Removes a parameter.
    pub fn remove(&mut self, name: &str) {
        self.pairs.retain(|(n, _)| *n != name);
    }

    /// Value of a parameter.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Parameters as `(name, value)` pairs.
    #[must_use]
    pub fn as_slice(&self) -> &[(&'static str, String)] {
        &self.pairs
    }
}

/// Logical endpoint of a provider API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    /// Title lookup for one media type.
    Lookup(MediaType),
    /// Free-text search.
    Search,
    /// Details of one item by provider id.
    Details(MediaType, u64),
    /// Lookup by IMDB id.
    FindByImdbId(&'a str),
}

/// Capabilities one metadata provider supplies to the shared transport.
pub trait Provider: Sized + std::fmt::Debug + Send + Sync + 'static {
    /// Raw item payload as returned by the provider.
    type Raw: DeserializeOwned;
    /// Normalized record produced from a raw item.
    type Record;
    /// Client facade built on top of the transport.
    type Client: From<HttpTransport<Self>>;

    /// Display name used in logs and errors.
    const NAME: &'static str;
    /// Query parameter carrying the API key.
    const AUTH_PARAM: &'static str;
    /// Default API base URL.
    const DEFAULT_BASE_URL: &'static str;

    /// Common field to provider parameter mapping.
    fn key_map() -> &'static KeyMap;

    /// Path of an endpoint relative to the base URL.
    fn endpoint(endpoint: &Endpoint<'_>) -> String;

    /// Translates one raw item into a record.
    ///
    /// # Errors
    ///
    /// Returns `ParseFailure` when the raw item lacks a required field.
    fn translate_record(raw: &Self::Raw, media_type: MediaType) -> Result<Self::Record>;

    /// Extracts the provider's error message from an error body.
    fn error_message(body: &str) -> Option<String>;
}
