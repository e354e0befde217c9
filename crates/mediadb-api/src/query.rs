//! Provider-independent query vocabulary.

use crate::error::{MediaError, Result};

/// Kind of media a query is about.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MediaType {
    /// Feature film.
    #[default]
    Movie,
    /// TV series.
    Series,
}

impl MediaType {
    /// Common vocabulary name (`movie`, `series`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Series => "series",
        }
    }
}

/// Plot length requested from OMDb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plot {
    /// Short plot.
    Short,
    /// Full plot.
    Full,
}

impl Plot {
    /// Parameter value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Full => "full",
        }
    }
}

/// Body format requested from OMDb.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseFormat {
    /// JSON body.
    #[default]
    Json,
    /// XML body.
    Xml,
}

impl ResponseFormat {
    /// Parameter value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xml => "xml",
        }
    }
}

/// Names of the common query fields, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryField {
    /// Exact title lookup.
    Title,
    /// Free-text search.
    Query,
    /// Release year.
    Year,
    /// Media type.
    Type,
    /// IMDB identifier.
    ImdbId,
    /// Plot length.
    Plot,
    /// Response format.
    Format,
    /// Result page.
    Page,
}

impl QueryField {
    /// Common vocabulary name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Query => "query",
            Self::Year => "year",
            Self::Type => "type",
            Self::ImdbId => "imdbID",
            Self::Plot => "plot",
            Self::Format => "format",
            Self::Page => "page",
        }
    }
}

/// Lookup or search request in the common vocabulary.
///
/// Every field is optional; empty strings are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// Title for exact lookups.
    pub title: Option<String>,
    /// Free-text search string.
    pub query: Option<String>,
    /// Release year (e.g. `"2004"`).
    pub year: Option<String>,
    /// Media type.
    pub media_type: Option<MediaType>,
    /// IMDB identifier (e.g. `"tt0387564"`).
    pub imdb_id: Option<String>,
    /// Plot length.
    pub plot: Option<Plot>,
    /// Response format.
    pub format: Option<ResponseFormat>,
    /// Result page (1-based).
    pub page: Option<u32>,
}

impl Query {
    /// Creates an empty query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Query that identifies one item by IMDB id.
    pub fn by_imdb_id(imdb_id: impl Into<String>) -> Self {
        Self::new().imdb_id(imdb_id)
    }

    /// Query that identifies one item by title, year and type.
    pub fn by_title_and_year(
        title: impl Into<String>,
        year: impl Into<String>,
        media_type: MediaType,
    ) -> Self {
        Self::new().title(title).year(year).media_type(media_type)
    }

    /// Free-text search query.
    pub fn search(query: impl Into<String>) -> Self {
        Self::new().query(query)
    }

    /// Sets the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the search string.
    #[must_use]
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Sets the year.
    #[must_use]
    pub fn year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    /// Sets the media type.
    #[must_use]
    pub const fn media_type(mut self, media_type: MediaType) -> Self {
        self.media_type = Some(media_type);
        self
    }

    /// Sets the IMDB id.
    #[must_use]
    pub fn imdb_id(mut self, imdb_id: impl Into<String>) -> Self {
        self.imdb_id = Some(imdb_id.into());
        self
    }

    /// Sets the plot length.
    #[must_use]
    pub const fn plot(mut self, plot: Plot) -> Self {
        self.plot = Some(plot);
        self
    }

    /// Sets the response format.
    #[must_use]
    pub const fn format(mut self, format: ResponseFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Title, if non-empty.
    #[must_use]
    pub fn title_value(&self) -> Option<&str> {
        non_empty(self.title.as_deref())
    }

    /// Search string, if non-empty.
    #[must_use]
    pub fn query_value(&self) -> Option<&str> {
        non_empty(self.query.as_deref())
    }

    /// Year, if non-empty.
    #[must_use]
    pub fn year_value(&self) -> Option<&str> {
        non_empty(self.year.as_deref())
    }

    /// IMDB id, if non-empty.
    #[must_use]
    pub fn imdb_id_value(&self) -> Option<&str> {
        non_empty(self.imdb_id.as_deref())
    }

    /// Media type, `movie` when unset.
    #[must_use]
    pub fn media_type_or_default(&self) -> MediaType {
        self.media_type.unwrap_or_default()
    }

    /// Present fields with their parameter values, in declaration order.
    #[must_use]
    pub fn fields(&self) -> Vec<(QueryField, String)> {
        let mut fields = Vec::new();
        let mut push = |field: QueryField, value: Option<String>| {
            if let Some(v) = value.filter(|v| !v.is_empty()) {
                fields.push((field, v));
            }
        };
        push(QueryField::Title, self.title.clone());
        push(QueryField::Query, self.query.clone());
        push(QueryField::Year, self.year.clone());
        push(
            QueryField::Type,
            self.media_type.map(|t| String::from(t.as_str())),
        );
        push(QueryField::ImdbId, self.imdb_id.clone());
        push(QueryField::Plot, self.plot.map(|p| String::from(p.as_str())));
        push(
            QueryField::Format,
            self.format.map(|f| String::from(f.as_str())),
        );
        // Page 0 is treated like an unset page.
        push(
            QueryField::Page,
            self.page.filter(|p| *p > 0).map(|p| p.to_string()),
        );
        fields
    }

    /// Checks that the query identifies a single item.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` unless `imdb_id` is set, or all of
    /// `title`, `year` and `media_type` are set.
    pub fn ensure_identifiable(&self) -> Result<()> {
        if self.imdb_id_value().is_some() {
            return Ok(());
        }
        if self.title_value().is_none() || self.year_value().is_none() || self.media_type.is_none()
        {
            return Err(MediaError::InvalidArgument(String::from(
                "either one of the format of data must be provided: imdbID | (title, year, type)",
            )));
        }
        Ok(())
    }

    /// Checks that the query carries a search string.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` when `query` is absent or empty.
    pub fn ensure_searchable(&self) -> Result<()> {
        if self.query_value().is_none() {
            return Err(MediaError::InvalidArgument(String::from(
                "query must be given",
            )));
        }
        Ok(())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
