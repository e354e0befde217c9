//! OMDb API client module.
//!
//! Queries the single `omdbapi.com` endpoint and normalizes the
//! PascalCase payload keys to camelCase.

mod client;
mod provider;
mod translate;
mod xml;

#[allow(clippy::module_name_repetitions)]
pub use client::OmdbClient;
pub use provider::Omdb;
#[allow(clippy::module_name_repetitions)]
pub use translate::{OmdbPayload, OmdbRecord, to_camel_case, translate_object, translate_payload};
