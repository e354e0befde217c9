//! Movie metadata client library for mediadb.
//!
//! Provides clients for the OMDb and TMDB APIs that share one query
//! vocabulary, plus a file name parser for `Title (Year)` style names.

/// Shared client operations.
pub mod api;

/// Error type.
pub mod error;

/// Authenticated HTTP transport.
pub mod http;

/// OMDb API client.
pub mod omdb;

/// File name parser.
pub mod parser;

/// Per-provider capabilities.
pub mod provider;

/// Common query vocabulary.
pub mod query;

/// Normalized records.
pub mod record;

/// TMDB API client.
pub mod tmdb;

pub use api::{LocalMediaApi, MediaApi};
pub use error::{MediaError, Result};
pub use omdb::{OmdbClient, OmdbRecord};
pub use query::{MediaType, Plot, Query, ResponseFormat};
pub use record::{Genre, MediaRecord, SearchResult};
pub use tmdb::TmdbClient;
