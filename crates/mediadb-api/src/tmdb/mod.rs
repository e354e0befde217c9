//! TMDB (The Movie Database) API v3 client module.
//!
//! Resolves titles and IMDB ids to TMDB items and translates them into
//! [`MediaRecord`](crate::record::MediaRecord)s.

mod client;
pub mod matcher;
mod provider;
pub mod translate;
pub mod types;

#[allow(clippy::module_name_repetitions)]
pub use client::TmdbClient;
pub use matcher::{MatchMode, find_matches};
pub use provider::Tmdb;
#[allow(clippy::module_name_repetitions)]
pub use types::{TmdbMediaKind, TmdbRawMedia};
