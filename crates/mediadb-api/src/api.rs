//! `MediaApi` trait definition.
#![allow(clippy::future_not_send)]

use crate::error::Result;
use crate::query::{MediaType, Query};
use crate::record::SearchResult;

/// Metadata lookup operations shared by every provider client.
///
/// Clients implement `LocalMediaApi`. `trait_variant::make` generates the
/// `Send`-bound `MediaApi` variant, which only forwards to `LocalMediaApi`,
/// so generic callers bound on `LocalMediaApi` (plus `Sync` where needed).
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(MediaApi: Send)]
pub trait LocalMediaApi {
    /// Record type returned by this provider.
    type Record;

    /// Fetches one item by IMDB id, or by title, year and type.
    ///
    /// Returns `None` when the provider has no match.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` before any request when the query does not
    /// identify an item, and `Transport` / `ParseFailure` on request failures.
    async fn get(&self, query: &Query) -> Result<Option<Self::Record>>;

    /// Runs a free-text search and returns one page.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` when `query` is missing, and `Transport` /
    /// `ParseFailure` on request failures.
    async fn search(&self, query: &Query) -> Result<SearchResult<Self::Record>>;

    /// Fetches one item by title and year.
    ///
    /// # Errors
    ///
    /// Same as [`LocalMediaApi::get`].
    async fn get_by_title_and_year(
        &self,
        title: &str,
        year: &str,
        media_type: MediaType,
    ) -> Result<Option<Self::Record>>;

    /// Fetches one item by IMDB id.
    ///
    /// # Errors
    ///
    /// Same as [`LocalMediaApi::get`].
    async fn get_by_imdb_id(&self, imdb_id: &str) -> Result<Option<Self::Record>>;
}
